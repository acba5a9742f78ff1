mod matrix;
use self::matrix::MatrixColumn;
use crate::consts;
use crate::mode::{Context, Mode};
use crate::player::{NameInput, PlayerName};
use crate::util::{center_rect, text_width, Canvas};
use crossterm::event::{Event, KeyCode, KeyModifiers};
use rand::RngCore;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
    widgets::{Block, BorderType, Clear, Widget},
};
use std::time::Instant;

/// Rows between the top of the about panel and its title
const TITLE_OFFSET: u16 = 2;

/// Row of the about panel's separator line, relative to its top
const SEPARATOR_OFFSET: u16 = 4;

/// Row of the prompt or first legend line, relative to the panel's top
const BODY_OFFSET: u16 = 10;

/// Columns between the panel's left edge and the prompt or legend
const BODY_INDENT: u16 = 2;

/// The welcome screen: a panel asking for the player's name (or, once that
/// has been given, listing the controls) in front of columns of falling
/// text
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct IntroMode {
    area: Rect,
    /// The about panel's border
    about: Rect,
    columns: Vec<MatrixColumn>,
    input: NameInput,
}

/// Result of feeding an event to the name prompt
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PromptOutcome {
    Pending,
    Entered(PlayerName),
    Quit,
}

impl IntroMode {
    pub(crate) fn new(area: Rect, rng: &mut dyn RngCore) -> IntroMode {
        let size = consts::ABOUT_PANEL_SIZE;
        let about = center_rect(
            area,
            Size {
                height: size.height.saturating_add(1),
                ..size
            },
        );
        let top = area.y.saturating_add(1);
        let len = usize::from(area.height.saturating_sub(2));
        let columns = (area.x.saturating_add(1)..area.right().saturating_sub(2))
            .step_by(consts::MATRIX_COLUMN_SPACING)
            .map(|x| MatrixColumn::new(Position::new(x, top), len, rng))
            .collect();
        IntroMode {
            area,
            about,
            columns,
            input: NameInput::default(),
        }
    }

    /// Apply a terminal event to the name prompt
    pub(crate) fn handle_prompt_event(&mut self, event: &Event) -> PromptOutcome {
        let Some(key) = event.as_key_press_event() else {
            return PromptOutcome::Pending;
        };
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => PromptOutcome::Quit,
            (_, KeyCode::Enter) => match self.input.submit() {
                Some(name) => PromptOutcome::Entered(name),
                None => PromptOutcome::Pending,
            },
            (_, KeyCode::Backspace) => {
                self.input.backspace();
                PromptOutcome::Pending
            }
            (m, KeyCode::Char(ch)) if (KeyModifiers::NONE | KeyModifiers::SHIFT).contains(m) => {
                self.input.push(ch);
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }

    fn body_origin(&self) -> Position {
        Position::new(self.about.x + BODY_INDENT, self.about.y + BODY_OFFSET)
    }

    /// Where the terminal cursor goes while the name is being typed
    pub(crate) fn prompt_cursor(&self) -> Position {
        let Position { x, y } = self.body_origin();
        let x = x + text_width(consts::NAME_PROMPT) + text_width(self.input.as_str());
        Position::new(x.min(self.about.right().saturating_sub(2)), y)
    }

    fn render_about(&self, ctx: &Context, buf: &mut Buffer) {
        let styles = ctx.styles;
        let about = self.about;
        let margin = Rect::new(
            about.x.saturating_sub(1),
            about.y.saturating_sub(1),
            about.width.saturating_add(2),
            about.height.saturating_add(2),
        )
        .intersection(self.area);
        Clear.render(margin, buf);
        Block::bordered()
            .border_type(BorderType::Double)
            .border_style(styles.border)
            .render(about, buf);
        let mut canvas = Canvas { area: about, buf };
        let inner = usize::from(about.width.saturating_sub(2));
        canvas.draw_str(
            Position::new(about.x, about.y + SEPARATOR_OFFSET),
            &format!("╠{}╣", "═".repeat(inner)),
            styles.border,
        );
        let title = consts::WELCOME_TEXT;
        canvas.draw_str(
            Position::new(
                about.x + about.width.saturating_sub(text_width(title)) / 2,
                about.y + TITLE_OFFSET,
            ),
            title,
            styles.text,
        );
        let origin = self.body_origin();
        if ctx.player.is_some() {
            for (y, line) in (origin.y..).step_by(2).zip(consts::INTRO_LEGEND) {
                canvas.draw_str(Position::new(origin.x, y), line, styles.text);
            }
        } else {
            canvas.draw_str(
                origin,
                &format!("{}{}", consts::NAME_PROMPT, self.input.as_str()),
                styles.text,
            );
        }
    }
}

impl Mode for IntroMode {
    fn update(&mut self, ctx: &mut Context, rng: &mut dyn RngCore, now: Instant) {
        if ctx.player.is_some() {
            for col in &mut self.columns {
                col.update(rng, now);
            }
        }
    }

    fn render(&self, ctx: &Context, buf: &mut Buffer) {
        if ctx.player.is_some() {
            let mut canvas = Canvas {
                area: self.area,
                buf,
            };
            for col in &self.columns {
                col.render(&mut canvas, ctx.styles.decoration);
            }
        }
        self.render_about(ctx, buf);
    }
}
