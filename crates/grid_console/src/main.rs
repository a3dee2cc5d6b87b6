mod app;
mod cli;
mod config;
mod draw;
mod errors;
mod form_file;
mod logging;
mod theme;
mod tui;

use std::fs;

use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};
use grid_form::{Element, Node, Row, ViewSelector, estimate_width, html, infer_label_width};
use tracing::info;

use crate::app::App;
use crate::cli::{Cli, Cmd, FormArgs};
use crate::form_file::FormFile;
use crate::tui::Tui;

fn main() -> Result<()> {
    let args = Cli::parse();
    errors::init()?;

    let settings = config::Config::new(args.config.as_deref())?;
    config::ensure_data_dir_exists(&settings.config.data_dir)?;
    let _log_guard = logging::init(&settings.config.data_dir)?;
    info!(config_dir = %settings.config.config_dir.display(), "grid-console starting");

    match args.cmd {
        Cmd::Html { form, output } => {
            let page = render_html(&form, &settings)?;
            match output {
                Some(path) => fs::write(&path, page)
                    .wrap_err_with(|| format!("writing {}", path.display()))?,
                None => print!("{page}"),
            }
        }
        Cmd::Measure { texts } => {
            for text in texts {
                let row: Node = Row::new().label(text.as_str()).into();
                println!(
                    "{text}\t{}px\tlabel column {}",
                    estimate_width(&text),
                    infer_label_width(&[row])
                );
            }
        }
        Cmd::Tui { form } => {
            let file = FormFile::load(&form.form)?;
            let container = file.container(form.apply(settings.form.clone()));
            let mut tui = Tui::new()?;
            App::new(file.title.as_str(), container).run(&mut tui)?;
        }
    }
    Ok(())
}

fn render_html(args: &FormArgs, settings: &config::Config) -> Result<String> {
    let file = FormFile::load(&args.form)?;
    let rendered = file.container(args.apply(settings.form.clone())).render();
    info!(
        rows = rendered.row_count(),
        label_width = %rendered.label_width,
        "form rendered"
    );
    let body = Node::fragment([
        Node::from(Element::new("h1").class("gf-title").child(file.title.as_str())),
        ViewSelector::new(rendered.view_mode).render(),
        rendered.root,
    ]);
    Ok(html::document(&file.title, &body))
}
