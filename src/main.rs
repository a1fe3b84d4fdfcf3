use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{GameConfig, SelfCollision};
use grid_snake::error::Result;
use grid_snake::game::{Engine, GameState};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging;
use grid_snake::renderer::CanvasLayout;
use grid_snake::terminal_runtime::BoardSession;
use grid_snake::timer::Ticker;
use log::info;

#[derive(Debug, Parser)]
#[command(name = "grid-snake", version, about = "Snake on a fixed grid")]
struct Cli {
    /// JSON config file. Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Pixels per grid cell.
    #[arg(long)]
    scale: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long)]
    delay: Option<u64>,

    /// Segments of a new snake.
    #[arg(long = "start-nodes")]
    start_nodes: Option<u16>,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// End the game when the head runs into the body.
    #[arg(long = "strict-collisions")]
    strict_collisions: bool,

    /// Append logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match setup(&cli).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn setup(cli: &Cli) -> Result<GameConfig> {
    logging::init(cli.log_file.as_deref())?;

    let mut config = GameConfig::load(cli.config.as_deref())?;
    apply_overrides(&mut config, cli);
    config.validate()?;

    info!("starting with {config:?}");
    Ok(config)
}

fn apply_overrides(config: &mut GameConfig, cli: &Cli) {
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(scale) = cli.scale {
        config.scale_factor = scale;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(start_nodes) = cli.start_nodes {
        config.start_node_count = start_nodes;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.strict_collisions {
        config.self_collision = SelfCollision::Coordinates;
    }
}

fn run(config: GameConfig) -> Result<()> {
    let mut session = BoardSession::open(CanvasLayout::from_config(&config))?;
    let mut input = InputHandler::new();

    let mut ticker = Ticker::new(Duration::from_millis(config.delay_ms));
    let mut engine = Engine::new(config);
    let mut state = engine.init_game(&GameState::empty());
    let mut last_status = state.status;

    loop {
        session.show(&state)?;

        if let Some(game_input) = input.poll_input(ticker.time_until_next(Instant::now()))? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Restart => {
                    info!("restarting, previous score {}", state.score);
                    state = engine.init_game(&GameState::empty());
                }
                GameInput::Key(key) => state = engine.set_direction(&state, &key),
            }
        }

        if ticker.poll(Instant::now()) {
            state = engine.advance_tick(&state);
        }

        if state.status != last_status {
            info!("status {last_status:?} -> {:?}", state.status);
            last_status = state.status;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use grid_snake::config::{GameConfig, SelfCollision};

    use super::{Cli, apply_overrides};

    fn file_config() -> GameConfig {
        GameConfig {
            width: 20,
            height: 15,
            delay_ms: 120,
            seed: Some(5),
            ..GameConfig::default()
        }
    }

    #[test]
    fn cli_flags_win_over_file_values() {
        let cli = Cli::parse_from([
            "grid-snake",
            "--width",
            "40",
            "--delay",
            "90",
            "--seed",
            "8",
            "--strict-collisions",
        ]);
        let mut config = file_config();

        apply_overrides(&mut config, &cli);

        assert_eq!(config.width, 40);
        assert_eq!(config.delay_ms, 90);
        assert_eq!(config.seed, Some(8));
        assert_eq!(config.self_collision, SelfCollision::Coordinates);
        assert_eq!(config.height, 15);
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let cli = Cli::parse_from(["grid-snake"]);
        let mut config = file_config();

        apply_overrides(&mut config, &cli);

        assert_eq!(config, file_config());
    }
}
