//! Main application entry point (native).

use clap::Parser;
use sketchboard_app::{AppResult, Script, Session, ShortcutRegistry};
use sketchboard_core::SketchConfig;
use sketchboard_core::storage::{FileStorage, PlatformStorage, create_default_storage};
use sketchboard_render::SvgSurface;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "sketchboard", about = "Replay a SketchBoard input script and render it to SVG")]
struct Cli {
    /// JSON event script to replay.
    #[arg(required_unless_present = "shortcuts")]
    script: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding saved sketches (defaults to the user data dir).
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Where to write the rendered canvas.
    #[arg(long, default_value = "sketch.svg")]
    out: PathBuf,

    /// Print the keyboard shortcuts and exit.
    #[arg(long)]
    shortcuts: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.shortcuts {
        ShortcutRegistry::print_all();
        return;
    }

    log::info!("Starting SketchBoard");
    if let Err(e) = pollster::block_on(run(cli)) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = match &cli.config {
        Some(path) => SketchConfig::from_file(path)?,
        None => SketchConfig::default(),
    };
    let storage: Arc<PlatformStorage> = match cli.storage {
        Some(dir) => Arc::new(FileStorage::new(dir)?),
        None => create_default_storage()?,
    };

    let Some(script_path) = cli.script else {
        return Ok(());
    };
    let script = Script::from_file(&script_path)?;

    let mut session = Session::start(config, storage).await;
    let summary = session.run(&script, Instant::now()).await;

    let mut surface = SvgSurface::new(session.canvas_size());
    session.render(&mut surface)?;
    surface.save(&cli.out)?;

    println!(
        "{} events, {} shapes, {} saves -> {}",
        summary.events,
        summary.shapes,
        summary.saves,
        cli.out.display()
    );
    Ok(())
}
