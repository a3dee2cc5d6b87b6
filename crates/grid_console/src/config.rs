use std::path::{Path, PathBuf};
use std::{env, fs};

use color_eyre::Result;
use directories::ProjectDirs;
use grid_form::FormConfig;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::debug;

use crate::cli::FormArgs;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Layered settings: defaults, config directory files, `--config`, environment.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    /// Defaults for every rendered form; a form file never overrides these.
    #[serde(default)]
    pub form: FormConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

const CONFIG_FILES: [(&str, config::FileFormat); 2] = [
    ("config.json5", config::FileFormat::Json5),
    ("config.toml", config::FileFormat::Toml),
];

impl Config {
    pub fn new(extra: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load(&get_config_dir(), &get_data_dir(), extra)
    }

    pub fn load(
        config_dir: &Path,
        data_dir: &Path,
        extra: Option<&Path>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?;

        let mut found_config = false;
        for (file, format) in &CONFIG_FILES {
            let path = config_dir.join(file);
            builder = builder.add_source(
                config::File::from(path.clone())
                    .format(*format)
                    .required(false),
            );
            found_config |= path.exists();
        }
        if let Some(extra) = extra {
            builder = builder.add_source(config::File::from(extra).required(true));
            found_config = true;
        }
        if !found_config {
            debug!(dir = %config_dir.display(), "no configuration file found, using defaults");
        }

        // GRID_CONSOLE__FORM__VIEW_MODE=detail -> form.view_mode
        builder = builder.add_source(
            config::Environment::with_prefix(&PROJECT_NAME)
                .prefix_separator("__")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }
}

impl FormArgs {
    /// Command line flags win over every configuration layer.
    pub fn apply(&self, mut form: FormConfig) -> FormConfig {
        if let Some(mode) = self.mode {
            form = form.view_mode(mode);
        }
        if let Some(variant) = self.variant {
            form = form.color_variant(variant);
        }
        if let Some(width) = &self.label_width {
            form = form.label_column_width(width.clone());
        }
        form
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "grid-form", env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_dir_exists(data_dir: &Path) -> std::io::Result<()> {
    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_form::{ColorVariant, Track, ViewMode};
    use pretty_assertions::assert_eq;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = env::temp_dir().join(format!("grid_console_{name}_{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_without_files() {
        let dir = scratch_dir("defaults");
        let cfg = Config::load(&dir, &dir.join("data"), None).unwrap();
        assert_eq!(cfg.form, FormConfig::default());
        assert_eq!(cfg.config.config_dir, dir);
    }

    #[test]
    fn config_dir_file_then_extra_file() {
        let dir = scratch_dir("layers");
        fs::write(
            dir.join("config.toml"),
            "[form]\nview_mode = \"detail\"\nrules_column_width = \"240px\"\n",
        )
        .unwrap();
        let extra = dir.join("extra.json");
        fs::write(&extra, r#"{ "form": { "color_variant": "secondary", "rules_column_width": "260px" } }"#)
            .unwrap();

        let cfg = Config::load(&dir, &dir, None).unwrap();
        assert_eq!(cfg.form.view_mode, ViewMode::Detail);
        assert_eq!(cfg.form.rules_column_width, Track::Px(240));

        let cfg = Config::load(&dir, &dir, Some(&extra)).unwrap();
        assert_eq!(cfg.form.view_mode, ViewMode::Detail);
        assert_eq!(cfg.form.color_variant, ColorVariant::Secondary);
        assert_eq!(cfg.form.rules_column_width, Track::Px(260));
    }

    #[test]
    fn camel_case_keys_survive_case_folding() {
        let dir = scratch_dir("camel");
        fs::write(
            dir.join("config.toml"),
            "[form]\nviewMode = \"detail\"\nlabelColumnWidth = \"180px\"\npageColumns = 2\n",
        )
        .unwrap();
        let cfg = Config::load(&dir, &dir, None).unwrap();
        assert_eq!(cfg.form.view_mode, ViewMode::Detail);
        assert_eq!(cfg.form.label_column_width, Some(Track::Px(180)));
        assert_eq!(cfg.form.page_columns, 2);
    }

    #[test]
    fn missing_extra_file_is_an_error() {
        let dir = scratch_dir("missing");
        assert!(Config::load(&dir, &dir, Some(&dir.join("nope.toml"))).is_err());
    }

    #[test]
    fn flags_override_config() {
        let args = FormArgs {
            form: PathBuf::from("f.json"),
            mode: Some(ViewMode::Detail),
            variant: None,
            label_width: Some(Track::Px(150)),
        };
        let form = args.apply(FormConfig::default().color_variant(ColorVariant::Secondary));
        assert_eq!(form.view_mode, ViewMode::Detail);
        assert_eq!(form.color_variant, ColorVariant::Secondary);
        assert_eq!(form.label_column_width, Some(Track::Px(150)));
    }
}
