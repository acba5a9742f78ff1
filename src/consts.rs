//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Style},
};
use std::ops::RangeInclusive;
use std::time::Duration;

/// The smallest terminal the game will run in
pub(crate) const MIN_SCREEN_SIZE: Size = Size {
    width: 140,
    height: 40,
};

/// How long the main loop waits for a keypress before drawing the next
/// frame
pub(crate) const INPUT_POLL_PERIOD: Duration = Duration::from_millis(10);

/// Width of the statistics panel to the right of the playfield, including
/// the gap between the two
pub(crate) const STATS_PANEL_WIDTH: u16 = 60;

/// Number of cells the snake has when a game starts
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 5;

/// The snake's starting speed, in tenths.  A speed of `s` tenths moves the
/// snake once every `1/s` seconds.
pub(crate) const INITIAL_SPEED_TENTHS: u32 = 10;

/// Every time the score reaches a multiple of this, the speed goes up by a
/// tenth.
pub(crate) const SPEEDUP_INTERVAL: u32 = 5;

/// How long the prey stays visible (and then invisible) while blinking
pub(crate) const PREY_BLINK_PERIOD: Duration = Duration::from_millis(300);

/// Maximum number of entries kept in the leaderboard
pub(crate) const LEADERBOARD_SIZE: usize = 5;

/// Maximum length of a player's name, in grapheme clusters
pub(crate) const MAX_NAME_LENGTH: usize = 10;

/// The phrase scrolled down the intro screen's background columns
pub(crate) const MATRIX_PHRASE: &str = "SNAKE GAME ";

/// Horizontal distance between two background columns
pub(crate) const MATRIX_COLUMN_SPACING: usize = 5;

/// Range of delays between glyphs of a background column, in hundredths of
/// a second
pub(crate) const MATRIX_TIMEOUTS_CS: RangeInclusive<u64> = 5..=9;

/// Longest run of blanks in a background column
pub(crate) const MATRIX_MAX_BLANKS: usize = 4;

/// Size of the bordered panel in the middle of the intro screen
pub(crate) const ABOUT_PANEL_SIZE: Size = Size {
    width: 65,
    height: 30,
};

/// Glyph for every cell of the snake
pub(crate) const SNAKE_SYMBOL: char = '#';

/// Glyph for the prey
pub(crate) const PREY_SYMBOL: char = '◉';

/// Glyph drawn where the snake's head crashed
pub(crate) const COLLISION_SYMBOL: char = '×';

pub(crate) const WELCOME_TEXT: &str = "!!! WELCOME TO SNAKE GAME !!!";

pub(crate) const NAME_PROMPT: &str = "ENTER YOUR NAME: ";

pub(crate) const PAUSE_TEXT: &str = "*** PAUSE ***";

pub(crate) const GAME_OVER_TEXT: &str = "*** GAME OVER ***";

/// Default style for borders, the status bar, and the snake
pub(crate) const BORDER_STYLE: Style = Style::new().fg(Color::Cyan);

/// Default style for panel text
pub(crate) const TEXT_STYLE: Style = Style::new().fg(Color::Yellow);

/// Default style for the snake
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Default style for the prey and for collision markers
pub(crate) const PREY_STYLE: Style = Style::new().fg(Color::Red);

/// Default style for the intro screen's background columns
pub(crate) const DECORATION_STYLE: Style = Style::new().fg(Color::Cyan);

/// Key legend shown on the intro screen once a name has been entered
pub(crate) const INTRO_LEGEND: [&str; 4] = [
    "USE ← ↑ → ↓ TO CONTROL SNAKE",
    "PRESS 's' TO START GAME",
    "PRESS 't' TO CHANGE TIMESTAMP FORMAT",
    "PRESS 'q' TO EXIT",
];

/// Key legend shown at the bottom of the playing screen's statistics panel
pub(crate) const PLAY_LEGEND: [&str; 5] = [
    "USE ← ↑ → ↓ TO CONTROL SNAKE",
    "PRESS 'i' TO INTRO SCREEN",
    "PRESS 'p' TO PAUSE",
    "PRESS 't' TO CHANGE TIMESTAMP FORMAT",
    "PRESS 'q' TO EXIT",
];
