use crate::command::Command;
use crate::config::ConfigError;
use crate::consts;
use crate::intro::{IntroMode, PromptOutcome};
use crate::mode::{Context, Mode, Screen};
use crate::play::PlayMode;
use crate::statusbar::{StatusBar, TimeFormat};
use crate::util::{content_area, status_bar_area};
use chrono::{DateTime, Local};
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, RngCore};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Position, Rect, Size},
    widgets::{Block, Widget},
    Terminal,
};
use std::io;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug)]
pub(crate) struct App<R = ThreadRng> {
    rng: R,
    /// The whole terminal
    area: Rect,
    ctx: Context,
    screen: Screen,
    time_format: TimeFormat,
    quitting: bool,
}

impl App<ThreadRng> {
    pub(crate) fn new(size: Size, ctx: Context) -> App<ThreadRng> {
        App::with_rng(size, ctx, rand::rng())
    }
}

impl<R: RngCore> App<R> {
    pub(crate) fn with_rng(size: Size, ctx: Context, mut rng: R) -> App<R> {
        let area = Rect::from((Position::ORIGIN, size));
        let screen = Screen::from(IntroMode::new(content_area(area), &mut rng));
        App {
            rng,
            area,
            ctx,
            screen,
            time_format: TimeFormat::default(),
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> Result<(), AppError> {
        loop {
            self.handle_global_keys();
            if self.quitting {
                break;
            }
            self.screen
                .update(&mut self.ctx, &mut self.rng, Instant::now());
            self.draw(&mut terminal)?;
            if self.awaiting_name() {
                self.capture_name(&mut terminal)?;
            } else if poll(consts::INPUT_POLL_PERIOD)? {
                self.handle_event(&read()?)?;
            }
        }
        Ok(())
    }

    /// Block until the player has typed a name at the intro screen's prompt
    /// (or asked to quit)
    fn capture_name<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        while self.awaiting_name() {
            self.handle_prompt_event(&read()?)?;
            self.draw(terminal)?;
        }
        Ok(())
    }

    fn awaiting_name(&self) -> bool {
        !self.quitting && self.ctx.player.is_none() && self.screen.is_intro()
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let now = Local::now();
        terminal.draw(|frame| {
            self.render(&now, frame.buffer_mut());
            if let Some(pos) = self.cursor_position() {
                frame.set_cursor_position(pos);
            }
        })?;
        Ok(())
    }

    fn render(&self, now: &DateTime<Local>, buf: &mut Buffer) {
        Block::bordered()
            .border_style(self.ctx.styles.border)
            .render(self.area, buf);
        let logo = format!("SNAKE GAME [{} x {}]", self.area.width, self.area.height);
        StatusBar::new(logo, now, self.time_format, self.ctx.styles.border)
            .render(status_bar_area(self.area), buf);
        self.screen.render(&self.ctx, buf);
    }

    fn cursor_position(&self) -> Option<Position> {
        match self.screen {
            Screen::Intro(ref intro) if self.awaiting_name() => Some(intro.prompt_cursor()),
            _ => None,
        }
    }

    fn handle_event(&mut self, event: &Event) -> Result<(), AppError> {
        if let Event::Resize(..) = event {
            return Err(AppError::Resized);
        }
        if let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        {
            self.ctx.press(cmd);
        }
        Ok(())
    }

    fn handle_prompt_event(&mut self, event: &Event) -> Result<(), AppError> {
        if let Event::Resize(..) = event {
            return Err(AppError::Resized);
        }
        let Screen::Intro(ref mut intro) = self.screen else {
            return Ok(());
        };
        match intro.handle_prompt_event(event) {
            PromptOutcome::Pending => (),
            PromptOutcome::Entered(name) => {
                tracing::info!(player = %name, "Player entered name");
                self.ctx.player = Some(name);
            }
            PromptOutcome::Quit => self.quitting = true,
        }
        Ok(())
    }

    /// Act on a pending keypress that means the same thing in every mode
    fn handle_global_keys(&mut self) {
        let Some(cmd) = self.ctx.take_key_with(|c| {
            matches!(
                c,
                Command::Quit | Command::CycleTimeFormat | Command::Start | Command::Intro
            )
            .then_some(c)
        }) else {
            return;
        };
        let area = content_area(self.area);
        match cmd {
            Command::Quit => {
                tracing::debug!("Quitting");
                self.quitting = true;
            }
            Command::CycleTimeFormat => self.time_format = self.time_format.next(),
            Command::Start if !self.screen.is_play() => {
                tracing::debug!("Switching to play mode");
                self.screen = Screen::from(PlayMode::new(area, &self.ctx, &mut self.rng));
            }
            Command::Intro if !self.screen.is_intro() => {
                tracing::debug!("Switching to intro mode");
                self.screen = Screen::from(IntroMode::new(area, &mut self.rng));
            }
            _ => (),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(
        "Current terminal size: [{width} x {height}]. Minimum required size: {} x {}",
        consts::MIN_SCREEN_SIZE.width,
        consts::MIN_SCREEN_SIZE.height
    )]
    TooSmall { width: u16, height: u16 },
    #[error("Terminal resize not supported")]
    Resized,
    #[error("failed to load configuration")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Fail if the terminal is smaller than the game needs
pub(crate) fn check_screen_size(size: Size) -> Result<(), AppError> {
    let min = consts::MIN_SCREEN_SIZE;
    if size.width < min.width || size.height < min.height {
        Err(AppError::TooSmall {
            width: size.width,
            height: size.height,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Styles;
    use crate::leaderboard::LeaderboardFile;
    use crate::player::PlayerName;
    use chrono::TimeZone;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn app() -> App<ChaCha12Rng> {
        let ctx = Context::new(LeaderboardFile::disabled(), Styles::default());
        App::with_rng(
            consts::MIN_SCREEN_SIZE,
            ctx,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn named_app() -> App<ChaCha12Rng> {
        let mut app = app();
        app.ctx.player = PlayerName::new("tester");
        app
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[rstest]
    #[case(140, 40, true)]
    #[case(200, 60, true)]
    #[case(139, 40, false)]
    #[case(140, 39, false)]
    #[case(80, 24, false)]
    fn test_check_screen_size(#[case] width: u16, #[case] height: u16, #[case] ok: bool) {
        assert_eq!(check_screen_size(Size::new(width, height)).is_ok(), ok);
    }

    #[test]
    fn too_small_message() {
        let e = check_screen_size(Size::new(80, 24)).unwrap_err();
        assert_eq!(
            e.to_string(),
            "Current terminal size: [80 x 24]. Minimum required size: 140 x 40"
        );
    }

    #[test]
    fn starts_in_intro_awaiting_name() {
        let app = app();
        assert!(app.screen.is_intro());
        assert!(app.awaiting_name());
        assert_eq!(app.cursor_position(), Some(Position::new(56, 14)));
    }

    #[test]
    fn prompt_sets_player() {
        let mut app = app();
        app.handle_prompt_event(&key(KeyCode::Char('a'))).unwrap();
        app.handle_prompt_event(&key(KeyCode::Char('b'))).unwrap();
        assert!(app.awaiting_name());
        app.handle_prompt_event(&key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ctx.player, PlayerName::new("AB"));
        assert!(!app.awaiting_name());
        assert_eq!(app.cursor_position(), None);
    }

    #[test]
    fn ctrl_c_at_prompt_quits() {
        let mut app = app();
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        app.handle_prompt_event(&ev).unwrap();
        assert!(app.quitting);
        assert!(!app.awaiting_name());
    }

    #[test]
    fn resize_is_fatal() {
        let mut app = named_app();
        assert!(matches!(
            app.handle_event(&Event::Resize(150, 50)),
            Err(AppError::Resized)
        ));
        let mut app = self::app();
        assert!(matches!(
            app.handle_prompt_event(&Event::Resize(150, 50)),
            Err(AppError::Resized)
        ));
    }

    #[test]
    fn switch_modes() {
        let mut app = named_app();
        app.handle_event(&key(KeyCode::Char('s'))).unwrap();
        app.handle_global_keys();
        assert!(app.screen.is_play());
        assert_eq!(app.ctx.pending(), None);
        // Starting again while playing keeps the current game.
        let Screen::Play(ref before) = app.screen else {
            panic!("not playing");
        };
        let before = before.clone();
        app.handle_event(&key(KeyCode::Char('s'))).unwrap();
        app.handle_global_keys();
        assert_eq!(app.ctx.pending(), None);
        assert_eq!(app.screen, Screen::Play(before));
        app.handle_event(&key(KeyCode::Char('i'))).unwrap();
        app.handle_global_keys();
        assert!(app.screen.is_intro());
        assert_eq!(app.ctx.pending(), None);
        assert!(!app.awaiting_name());
    }

    #[test]
    fn cycle_time_format() {
        let mut app = named_app();
        assert_eq!(app.time_format, TimeFormat::DateTime);
        for expected in [
            TimeFormat::DateTimeMicros,
            TimeFormat::Date,
            TimeFormat::Time,
            TimeFormat::DateTime,
        ] {
            app.handle_event(&key(KeyCode::Char('t'))).unwrap();
            app.handle_global_keys();
            assert_eq!(app.time_format, expected);
        }
    }

    #[test]
    fn quit_key() {
        let mut app = named_app();
        app.handle_event(&key(KeyCode::Char('q'))).unwrap();
        app.handle_global_keys();
        assert!(app.quitting);
    }

    #[test]
    fn mode_keys_left_for_mode() {
        let mut app = named_app();
        app.handle_event(&key(KeyCode::Left)).unwrap();
        app.handle_global_keys();
        assert_eq!(app.ctx.pending(), Some(Command::Left));
        app.handle_event(&key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.ctx.pending(), Some(Command::Left));
        app.handle_event(&key(KeyCode::Char('p'))).unwrap();
        assert_eq!(app.ctx.pending(), Some(Command::Pause));
    }

    #[test]
    fn render_frame() {
        let app = named_app();
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let mut buf = Buffer::empty(app.area);
        app.render(&now, &mut buf);
        assert_eq!(row_text(&buf, 0), format!("┌{}┐", "─".repeat(138)));
        assert_eq!(
            row_text(&buf, 38),
            format!(
                "│SNAKE GAME [140 x 40]{}09.03.2024 14:05:07 │",
                " ".repeat(137 - 21 - 19)
            )
        );
        assert_eq!(row_text(&buf, 39), format!("└{}┘", "─".repeat(138)));
    }
}
