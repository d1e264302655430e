mod config;
mod ui;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use common::games::SessionRng;
use common::games::snake::SnakeGame;
use common::{log, logger};
use eframe::egui;

use config::{Config, default_config_path, get_config_manager};
use ui::{SessionOutcome, SnakeApp};

#[derive(Parser)]
#[command(name = "the_snake", about = "Snake on a wrap-around board, with apples and a stone")]
struct Args {
    /// Config file, defaults to the_snake_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for item placement, overrides the config seed.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the default config to the config path and exit.
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_path = args.config.unwrap_or_else(default_config_path);
    let config_manager = get_config_manager(&config_path);

    if args.write_default_config {
        config_manager.set_config(&Config::default())?;
        log!("Default config written to {}", config_path.display());
        return Ok(());
    }

    let config = config_manager.get_config()?;
    let rng = match args.seed.or(config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let game = SnakeGame::new(config.game.clone(), config.window.title.clone(), rng)?;
    let title = game.window_title();

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.game.board_width as f32, config.game.board_height as f32])
        .with_resizable(false)
        .with_title(title);
    if config.window.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let outcome: SessionOutcome = Rc::new(RefCell::new(None));
    let app_outcome = outcome.clone();
    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(SnakeApp::new(game, app_outcome)))),
    )?;

    let result = outcome.borrow_mut().take();
    match result {
        Some(Ok(reason)) => log!("Session ended: {:?}", reason),
        Some(Err(err)) => return Err(err.into()),
        None => log!("Window closed"),
    }

    Ok(())
}
