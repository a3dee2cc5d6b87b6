use thiserror::Error;

/// Errors raised while reading form configuration.
///
/// Rendering itself never fails; only parsing of user supplied values does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridFormError {
    #[error("invalid grid track: {0:?}")]
    InvalidTrack(String),

    #[error("unknown view mode: {0:?} (expected `default` or `detail`)")]
    UnknownViewMode(String),

    #[error("unknown color variant: {0:?} (expected `primary` or `secondary`)")]
    UnknownVariant(String),

    #[error("duplicate field id: {0}")]
    DuplicateFieldId(String),
}

pub type Result<T, E = GridFormError> = std::result::Result<T, E>;
