//! Error reports and panic handling for `grid-console`.
//!
//! Reports go through color-eyre. A panic first hands the terminal back (the TUI may
//! have left it in raw mode), then logs the stripped report to the log file and
//! prints it: a human-panic dump in release builds, a full better-panic trace in
//! debug builds.

use std::panic::PanicHookInfo;
use std::sync::OnceLock;

use color_eyre::{Result, config::PanicHook};
use tracing::error;

static HOOKS: OnceLock<()> = OnceLock::new();

/// Text appended to every panic report.
fn crash_note() -> String {
    format!(
        "grid-console {} crashed. Re-run with GRID_CONSOLE_LOG=debug and include the log \
         file and the form description when reporting it.",
        env!("CARGO_PKG_VERSION")
    )
}

/// Install the report and panic hooks once per process.
pub fn init() -> Result<()> {
    if HOOKS.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(crash_note())
        .capture_span_trace_by_default(false)
        .display_location_section(cfg!(debug_assertions))
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |info| on_panic(&panic_hook, info)));

    let _ = HOOKS.set(());
    Ok(())
}

fn on_panic(hook: &PanicHook, info: &PanicHookInfo<'_>) {
    if let Err(err) = crate::tui::restore() {
        error!(%err, "terminal could not be restored");
    }

    let report = hook.panic_report(info).to_string();
    error!(report = %strip_ansi_escapes::strip_str(&report), "panic");

    #[cfg(not(debug_assertions))]
    {
        use human_panic::{handle_dump, metadata, print_msg};
        let meta = metadata!();
        let dump = handle_dump(&meta, info);
        if print_msg(dump, &meta).is_err() {
            eprintln!("{report}");
        }
    }

    #[cfg(debug_assertions)]
    {
        better_panic::Settings::auto()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Medium)
            .create_panic_handler()(info);
    }

    std::process::exit(libc::EXIT_FAILURE);
}
