//! Typecard CLI - render styled text to a PNG file or stdout

mod cli;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use typecard::{FontCatalog, FontRegistry, Pipeline, Result};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

/// `--catalog` beats `TYPECARD_CATALOG`, `--font-dir` beats everything
fn load_catalog(cli: &Cli) -> Result<FontCatalog> {
    let catalog = match &cli.catalog {
        Some(path) => FontCatalog::load(path)?,
        None => FontCatalog::from_env()?,
    };
    Ok(match &cli.font_dir {
        Some(dir) => catalog.with_font_dir(dir.clone()),
        None => catalog,
    })
}

fn run(cli: &Cli) -> Result<()> {
    let catalog = load_catalog(cli)?;

    if cli.list_fonts {
        let mut stdout = std::io::stdout().lock();
        for name in catalog.family_names() {
            writeln!(stdout, "{}", name)?;
        }
        return Ok(());
    }

    let pipeline = Pipeline::new(Arc::new(FontRegistry::new(catalog)));
    let image = pipeline.render_png(&cli.to_request())?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &image.bytes)?;
            log::info!(
                "Wrote {}x{} image to {}",
                image.width,
                image.height,
                path.display()
            );
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&image.bytes)?;
            stdout.flush()?;
        },
    }

    Ok(())
}
