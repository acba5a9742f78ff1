use crate::consts;
use crate::timer::Timer;
use crate::util::Canvas;
use rand::{Rng, RngCore};
use ratatui::{layout::Position, style::Style};
use std::time::{Duration, Instant};

/// One column of the intro screen's falling-text background.  Glyphs are
/// written into a ring buffer one at a time, so the text appears to scroll
/// downwards and wrap around.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct MatrixColumn {
    origin: Position,
    glyphs: Vec<char>,
    /// Index in `glyphs` of the next glyph to write
    cursor: usize,
    run: Run,
    timer: Timer,
}

/// A stretch of glyphs fed into a column
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Run {
    /// This many blanks remain
    Blanks(usize),
    /// The phrase, with this many of its characters already emitted
    Phrase(usize),
}

impl Run {
    fn random(rng: &mut dyn RngCore) -> Run {
        if rng.random_bool(0.5) {
            Run::Phrase(0)
        } else {
            Run::Blanks(rng.random_range(1..=consts::MATRIX_MAX_BLANKS))
        }
    }

    fn next_glyph(&mut self) -> Option<char> {
        match self {
            Run::Blanks(0) => None,
            Run::Blanks(n) => {
                *n -= 1;
                Some(' ')
            }
            Run::Phrase(i) => {
                let ch = consts::MATRIX_PHRASE.chars().nth(*i)?;
                *i += 1;
                Some(ch)
            }
        }
    }
}

fn random_timeout(rng: &mut dyn RngCore) -> Duration {
    Duration::from_millis(10 * rng.random_range(consts::MATRIX_TIMEOUTS_CS))
}

impl MatrixColumn {
    /// Create a blank column `len` cells tall whose top cell is at `origin`
    pub(super) fn new(origin: Position, len: usize, rng: &mut dyn RngCore) -> MatrixColumn {
        MatrixColumn {
            origin,
            glyphs: vec![' '; len],
            cursor: 0,
            run: Run::random(rng),
            timer: Timer::new(random_timeout(rng)),
        }
    }

    /// Write the next glyph if the column's delay has passed.  When the
    /// current run is used up, a new one is started with a fresh delay.
    pub(super) fn update(&mut self, rng: &mut dyn RngCore, now: Instant) {
        if self.glyphs.is_empty() || !self.timer.fire(now) {
            return;
        }
        let glyph = match self.run.next_glyph() {
            Some(ch) => ch,
            None => {
                self.run = Run::random(rng);
                self.timer.set_period(random_timeout(rng));
                self.run.next_glyph().unwrap_or(' ')
            }
        };
        if let Some(slot) = self.glyphs.get_mut(self.cursor) {
            *slot = glyph;
        }
        self.cursor = (self.cursor + 1) % self.glyphs.len();
    }

    pub(super) fn render(&self, canvas: &mut Canvas<'_>, style: Style) {
        for (y, &ch) in (self.origin.y..).zip(&self.glyphs) {
            canvas.draw_cell(Position::new(self.origin.x, y), ch, style);
        }
    }
}
