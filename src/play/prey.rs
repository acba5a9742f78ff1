use crate::consts;
use crate::timer::Timer;
use rand::{Rng, RngCore};
use ratatui::layout::{Position, Rect};
use std::time::Instant;

/// The thing the snake eats.  It blinks while waiting to be eaten.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Prey {
    pub(super) pos: Position,
    visible: bool,
    blink: Timer,
}

impl Prey {
    pub(super) fn new(field: Rect, rng: &mut dyn RngCore) -> Prey {
        Prey {
            pos: random_cell(field, rng),
            visible: true,
            blink: Timer::new(consts::PREY_BLINK_PERIOD),
        }
    }

    pub(super) fn position(&self) -> Position {
        self.pos
    }

    pub(super) fn visible(&self) -> bool {
        self.visible
    }

    /// Toggle visibility if a blink period has passed
    pub(super) fn blink(&mut self, now: Instant) {
        if self.blink.fire(now) {
            self.visible = !self.visible;
        }
    }

    /// Move the prey to a random cell of `field`.  The cell may lie under the
    /// snake.
    pub(super) fn respawn(&mut self, field: Rect, rng: &mut dyn RngCore) {
        self.pos = random_cell(field, rng);
    }
}

fn random_cell(field: Rect, rng: &mut dyn RngCore) -> Position {
    if field.is_empty() {
        return field.as_position();
    }
    Position {
        x: rng.random_range(field.left()..field.right()),
        y: rng.random_range(field.top()..field.bottom()),
    }
}
