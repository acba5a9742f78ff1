mod app;
mod command;
mod config;
mod consts;
mod intro;
mod leaderboard;
mod logging;
mod mode;
mod play;
mod player;
mod statusbar;
mod timer;
mod util;
use crate::app::{App, AppError};
use crate::config::Config;
use crate::mode::Context;
use crate::util::ErrorChain;
use ratatui::layout::Size;
use std::io::ErrorKind;
use std::process::ExitCode;

fn main() -> ExitCode {
    app_exit(run())
}

fn run() -> Result<(), AppError> {
    let config = match Config::default_path() {
        Ok(path) => Config::load(&path, true)?,
        Err(_) => Config::default(),
    };
    let styles = config.styles.resolve()?;
    if let Some(path) = config.log_file() {
        if let Err(e) = logging::init(&path) {
            eprintln!("Warning: logging disabled: {e:#}");
        }
    }
    let (width, height) = crossterm::terminal::size()?;
    let size = Size::new(width, height);
    app::check_screen_size(size)?;
    tracing::info!(width, height, "Starting snake-arcade");
    let ctx = Context::new(config.leaderboard(), styles);
    let terminal = ratatui::init();
    let r = App::new(size, ctx).run(terminal);
    ratatui::restore();
    r
}

fn app_exit(r: Result<(), AppError>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Io(e)) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %ErrorChain(&e), "Exiting on error");
            eprintln!("{}", ErrorChain(&e));
            ExitCode::from(2)
        }
    }
}
