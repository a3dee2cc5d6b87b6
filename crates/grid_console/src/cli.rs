// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use grid_form::{ColorVariant, Track, ViewMode};

#[derive(Parser, Debug)]
#[command(name = "grid-console", version, about = "Render grid forms as HTML or in the terminal")]
pub struct Cli {
    /// Extra configuration file, layered over the one in the config directory
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print a form as a standalone HTML document
    Html {
        #[command(flatten)]
        form: FormArgs,
        /// Write to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print estimated text widths and the label column each text would need
    Measure {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Browse a form interactively
    Tui {
        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    /// Form description (.json, .json5 or .toml)
    #[arg(long, short, value_name = "FILE")]
    pub form: PathBuf,

    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ViewMode>,

    #[arg(long, value_parser = parse_variant)]
    pub variant: Option<ColorVariant>,

    /// Fixed label column width, e.g. `180px`
    #[arg(long, value_parser = parse_track)]
    pub label_width: Option<Track>,
}

fn parse_mode(s: &str) -> Result<ViewMode, String> {
    ViewMode::parse(s).map_err(|e| e.to_string())
}

fn parse_variant(s: &str) -> Result<ColorVariant, String> {
    ColorVariant::parse(s).map_err(|e| e.to_string())
}

fn parse_track(s: &str) -> Result<Track, String> {
    s.parse::<Track>().map_err(|e| e.to_string())
}
