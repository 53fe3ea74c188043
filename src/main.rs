use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use snake_term::canvas::{Canvas, Painter, select_painter};
use snake_term::config::{GridSize, RenderMode, Settings};
use snake_term::error::AppError;
use snake_term::game::{GameState, Outcome};
use snake_term::input::{KeyInput, read_input, wait_for_key};
use snake_term::logging::init_logging;
use snake_term::platform::Platform;
use snake_term::terminal_runtime::{TerminalSession, restore_terminal};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Draw with plain characters even when colors are available.
    #[arg(long)]
    ascii: bool,

    /// Milliseconds to wait for a key before the snake moves on its own.
    #[arg(long = "tick-ms", value_name = "MS")]
    tick_ms: Option<u64>,

    /// Number of segments the snake starts with.
    #[arg(long, value_name = "N")]
    length: Option<usize>,

    /// Seed for fruit placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to read instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a debug log to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Loads the settings file and applies command-line overrides on top.
    fn settings(&self) -> Result<Settings, AppError> {
        let mut settings = match self.config.clone().or_else(Settings::default_path) {
            Some(path) => Settings::load(&path)?,
            None => Settings::default(),
        };

        if self.ascii {
            settings.render_mode = RenderMode::Ascii;
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_ms = tick_ms;
        }
        if let Some(length) = self.length {
            settings.initial_length = length;
        }

        Ok(settings.validate()?)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(&cli) {
        Ok(score) => {
            info!("session over with score {score}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!("{error}");
            report(&error);
            ExitCode::FAILURE
        }
    }
}

fn start(cli: &Cli) -> Result<u32, AppError> {
    let settings = cli.settings()?;
    init_logging(cli.log_file.as_deref())?;

    let platform = Platform::detect();
    let painter = select_painter(settings.render_mode, platform);
    info!("starting with {settings:?}, painter {painter:?}");

    install_panic_hook();
    run(&settings, cli.seed, painter)
}

fn run(
    settings: &Settings,
    seed: Option<u64>,
    painter: Box<dyn Painter>,
) -> Result<u32, AppError> {
    let mut session = TerminalSession::enter()?;
    let size = session.size()?;
    let mut canvas = Canvas::new(size, painter);
    let mut state = match seed {
        Some(seed) => GameState::new_with_seed(size, settings.initial_length, seed),
        None => GameState::new(size, settings.initial_length),
    };
    state.paint(&mut canvas);

    let tick = Duration::from_millis(settings.tick_ms);
    let mut turn = None;

    loop {
        if state.tick(turn, &mut canvas) == Outcome::Died {
            break;
        }
        session.present(&canvas)?;

        turn = match read_input(tick)? {
            Some(KeyInput::Quit) => break,
            Some(KeyInput::Direction(direction)) => Some(direction),
            Some(KeyInput::Resize(width, height)) => {
                let bounds = GridSize { width, height };
                canvas.resize(bounds);
                state.fit_to(bounds);
                state.paint(&mut canvas);
                None
            }
            Some(KeyInput::Other) | None => None,
        };
    }

    info!(
        "game ended after {} ticks, length {}",
        state.tick_count,
        state.snake.len()
    );
    canvas.show_death_message();
    session.present(&canvas)?;
    wait_for_key()?;

    Ok(state.score)
}

fn report(error: &AppError) {
    eprintln!("snake-term: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
