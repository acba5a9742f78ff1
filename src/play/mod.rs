mod direction;
mod prey;
mod snake;
use self::direction::Direction;
use self::prey::Prey;
use self::snake::{Snake, Step};
use crate::command::Command;
use crate::consts;
use crate::leaderboard::Leaderboard;
use crate::mode::{Context, Mode};
use crate::player::PlayerName;
use crate::timer::Timer;
use crate::util::{text_width, Canvas};
use rand::RngCore;
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    widgets::{Block, BorderType, Widget},
};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

/// Where the parts of the playing screen go
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PlayLayout {
    /// The playfield including its border
    field_block: Rect,

    /// The cells the snake may occupy
    field: Rect,

    /// The statistics panel to the right of the playfield
    stats: Rect,
}

impl PlayLayout {
    fn new(area: Rect) -> PlayLayout {
        let field_block = Rect {
            width: area.width.saturating_sub(consts::STATS_PANEL_WIDTH),
            ..area
        };
        let field = field_block.inner(Margin::new(1, 1));
        let stats_x = field_block.right().saturating_add(2).min(area.right());
        let stats = Rect {
            x: stats_x,
            width: area.right().saturating_sub(stats_x),
            ..area
        };
        PlayLayout {
            field_block,
            field,
            stats,
        }
    }
}

/// A game of snake in progress (or over)
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PlayMode {
    layout: PlayLayout,
    snake: Snake,
    mover: Timer,
    prey: Prey,
    score: u32,
    speed_tenths: u32,
    paused: bool,
    /// Where the snake crashed.  The game is over iff this is set.
    collision: Option<Position>,
    /// The leaderboard as shown in the statistics panel
    leaderboard: Leaderboard,
}

impl PlayMode {
    /// Start a new game drawn in `area`, with the snake in the middle of the
    /// playfield heading up
    pub(crate) fn new(area: Rect, ctx: &Context, rng: &mut dyn RngCore) -> PlayMode {
        let layout = PlayLayout::new(area);
        let field = layout.field;
        let head = Position::new(field.x + field.width / 2, field.y + field.height / 2);
        let speed_tenths = consts::INITIAL_SPEED_TENTHS;
        PlayMode {
            layout,
            snake: Snake::new(head, Direction::Up, consts::INITIAL_SNAKE_LENGTH),
            mover: Timer::new(tick_period(speed_tenths)),
            prey: Prey::new(field, rng),
            score: 0,
            speed_tenths,
            paused: false,
            collision: None,
            leaderboard: ctx.leaderboard.load(),
        }
    }

    pub(crate) fn game_over(&self) -> bool {
        self.collision.is_some()
    }

    fn speed_text(&self) -> String {
        format!("{}.{}", self.speed_tenths / 10, self.speed_tenths % 10)
    }

    fn move_snake(&mut self, ctx: &mut Context, now: Instant) {
        if self.paused || self.game_over() || !self.mover.is_due(now) {
            return;
        }
        if let Some(d) = ctx.take_key_with(Direction::from_command) {
            self.snake.turn(d);
        }
        match self.snake.step(self.layout.field) {
            Step::Moved => self.mover.reset(now),
            Step::Crashed(pos) => self.end_game(ctx, pos),
        }
    }

    fn end_game(&mut self, ctx: &Context, pos: Position) {
        self.collision = Some(pos);
        let player = ctx.player.as_ref().map_or("", PlayerName::as_str);
        tracing::info!(player, score = self.score, "Game over");
        let Some(score) = NonZeroU32::new(self.score) else {
            return;
        };
        if player.is_empty() {
            tracing::warn!("No player name entered; not recording score");
        } else {
            self.leaderboard = ctx.leaderboard.record(player, score);
        }
    }

    fn eat_prey(&mut self, rng: &mut dyn RngCore) {
        if self.snake.head() != self.prey.position() {
            return;
        }
        self.prey.respawn(self.layout.field, rng);
        self.score += 1;
        if self.score % consts::SPEEDUP_INTERVAL == 0 {
            self.speed_tenths += 1;
            self.mover.set_period(tick_period(self.speed_tenths));
            tracing::debug!(
                score = self.score,
                speed = %self.speed_text(),
                period = ?self.mover.period(),
                "Speeding up"
            );
        }
        self.snake.grow();
    }

    fn render_stats(&self, ctx: &Context, buf: &mut Buffer) {
        let style = ctx.styles.text;
        let Position { x, y } = self.layout.stats.as_position();
        let mut canvas = Canvas {
            area: self.layout.stats,
            buf,
        };
        canvas.draw_str(
            Position::new(x, y + 1),
            &format!("YOUR POINTS = {}", self.score),
            style,
        );
        canvas.draw_str(
            Position::new(x, y + 3),
            &format!("YOUR SPEED = {}", self.speed_text()),
            style,
        );
        canvas.draw_str(
            Position::new(x, y + 5),
            &format!("SNAKE LENGTH = {}", self.snake.len()),
            style,
        );
        if let Some(ref player) = ctx.player {
            canvas.draw_str(Position::new(x, y + 7), &format!("PLAYER: {player}"), style);
        }
        if !self.leaderboard.is_empty() {
            canvas.draw_str(Position::new(x, y + 10), "TOP 5 USERS:", style);
            canvas.draw_str(Position::new(x, y + 11), "************", style);
            for (row, entry) in (y + 12..).zip(self.leaderboard.entries()) {
                canvas.draw_str(
                    Position::new(x, row),
                    &format!("{} - {}", entry.name, entry.score),
                    style,
                );
            }
        }
        // The legend sits directly above the playfield's bottom border.
        let bottom = self.layout.field_block.bottom().saturating_sub(1);
        for (row, line) in (0..bottom).rev().zip(consts::PLAY_LEGEND.iter().rev()) {
            canvas.draw_str(Position::new(x, row), line, style);
        }
    }
}

impl Mode for PlayMode {
    fn update(&mut self, ctx: &mut Context, rng: &mut dyn RngCore, now: Instant) {
        self.move_snake(ctx, now);
        self.prey.blink(now);
        self.eat_prey(rng);
        if ctx.take_key(Command::Pause) {
            self.paused = !self.paused;
            tracing::debug!(paused = self.paused, "Toggled pause");
        }
    }

    fn render(&self, ctx: &Context, buf: &mut Buffer) {
        let styles = ctx.styles;
        let block = self.layout.field_block;
        Block::bordered()
            .border_type(BorderType::Double)
            .border_style(styles.border)
            .render(block, buf);
        self.render_stats(ctx, buf);
        let mut canvas = Canvas { area: block, buf };
        for pos in self.snake.cells() {
            canvas.draw_cell(pos, consts::SNAKE_SYMBOL, styles.snake);
        }
        if self.prey.visible() {
            canvas.draw_cell(self.prey.position(), consts::PREY_SYMBOL, styles.prey);
        }
        if let Some(pos) = self.collision {
            canvas.draw_cell(pos, consts::COLLISION_SYMBOL, styles.prey);
        }
        let banner = if self.game_over() {
            Some(consts::GAME_OVER_TEXT)
        } else if self.paused {
            Some(consts::PAUSE_TEXT)
        } else {
            None
        };
        if let Some(text) = banner {
            let pos = Position::new(
                block.x + block.width.saturating_sub(text_width(text)) / 2,
                block.y + block.height.saturating_sub(1) / 2,
            );
            canvas.draw_str(pos, text, styles.text);
        }
    }
}

/// How long the snake waits between moves at the given speed
fn tick_period(speed_tenths: u32) -> Duration {
    Duration::from_secs(1) / speed_tenths.max(1)
}
