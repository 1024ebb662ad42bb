//! Sobaka Run - terminal entry point

use std::fs::File;

use glam::Vec2;
use sobaka_run::{
    Game, Result, Settings,
    assets::ProceduralAssets,
    audio::{AudioBackend, AudioManager, TerminalBell},
    platform::{TerminalGuard, TerminalInput},
    renderer::TerminalRenderer,
};

/// Environment variable naming a log file
const LOG_ENV: &str = "SOBAKA_LOG";

/// Logs share the terminal with the game, so they go to a file when asked
fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = std::env::var_os(LOG_ENV) {
        match File::create(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {e}", path.to_string_lossy()),
        }
    }
    builder.init();
}

fn run(settings: &Settings) -> Result<()> {
    let guard = TerminalGuard::enter()?;

    let backend: Option<Box<dyn AudioBackend>> = if settings.terminal_bell {
        Some(Box::new(TerminalBell::stdout()))
    } else {
        None
    };
    let audio = AudioManager::from_settings(settings, backend);
    let screen = Vec2::new(settings.screen_width, settings.screen_height);

    let mut game = Game::new(
        settings,
        Box::new(ProceduralAssets::new()),
        Box::new(TerminalRenderer::stdout(screen)?),
        Box::new(TerminalInput::new(guard.keyboard_enhanced())),
        Box::new(audio),
    )?;
    let result = game.run();

    // Restore before anything is printed
    drop(guard);
    result
}

fn main() -> Result<()> {
    init_logging();
    log::info!("Sobaka Run starting...");

    let settings = Settings::load();
    log::info!("Settings: {settings:?}");

    if let Err(e) = run(&settings) {
        log::error!("Fatal: {e}");
        return Err(e);
    }
    log::info!("Bye");
    Ok(())
}
