use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use elements::{FileFetcher, Window};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod widgets;

#[derive(Parser, Debug)]
#[command(name = "cicara")]
#[command(about = "Load a document with the application's custom elements and dump its tree")]
struct Args {
    /// HTML document to load
    document: PathBuf,
    /// Directory templates are resolved against. Defaults to the document's directory
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let assets = match args.assets {
        Some(assets) => assets,
        None => args
            .document
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default(),
    };

    let mut window = Window::new(FileFetcher::new(&assets));
    widgets::register_all(&mut window).context("failed to register elements")?;
    // Templates finish loading before the document connects any element.
    window.run();

    let html = std::fs::read_to_string(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;

    eprintln!("Started loading '{}'", args.document.display());
    let before = Instant::now();
    window.load_document(&html)?;
    eprintln!("Finished loading document! Took {:?}!", before.elapsed());
    eprintln!();

    eprintln!("---- DOM Tree ----");
    print!("{}", window.dom().dump(window.document()));

    Ok(())
}
