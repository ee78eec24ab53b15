//! Easel: replay a painting script and export the result.

use anyhow::{Context, Result};
use clap::Parser;
use easel_app::{AppConfig, AppError, Script, Session, failure_banner};
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay a JSON event script through the Easel engine and export PNG.
#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(about = "Replay a painting script and export the result as PNG")]
#[command(version)]
struct Args {
    /// Event script (JSON array)
    script: PathBuf,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the drawing
    #[arg(short, long, default_value = "easel.png")]
    output: PathBuf,

    /// Also write the on-screen view (zoom, pan and overlay applied)
    #[arg(long)]
    view: Option<PathBuf>,

    /// Surface width, overriding the config
    #[arg(long)]
    width: Option<u32>,

    /// Surface height, overriding the config
    #[arg(long)]
    height: Option<u32>,
}

fn run(args: &Args) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())
        .context("loading configuration")?
        .with_size(args.width, args.height);
    let script = Script::load(&args.script)?;

    let mut session = Session::new(&config)?;
    let handled = session.play(&script)?;
    log::info!("Replayed {handled} events");

    session
        .export(&args.output)
        .with_context(|| format!("exporting {}", args.output.display()))?;
    if let Some(view) = &args.view {
        session
            .export_view(view)
            .with_context(|| format!("exporting view {}", view.display()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting Easel");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            let init_failure = err.downcast_ref::<AppError>().is_some_and(AppError::is_init_failure);
            if init_failure {
                eprintln!("{}", failure_banner("Easel could not start", &format!("{err:#}")));
            } else {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
