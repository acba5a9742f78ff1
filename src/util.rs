use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect, Size},
    style::Style,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Bottom,
    Right,
}

pub(crate) trait RectExt: Sized {
    fn shave(self, side: Side) -> Self;
}

impl RectExt for Rect {
    fn shave(mut self, side: Side) -> Self {
        match side {
            Side::Bottom => {
                self.height = self.height.saturating_sub(1);
            }
            Side::Right => {
                self.width = self.width.saturating_sub(1);
            }
        }
        if self.is_empty() {
            Rect::ZERO
        } else {
            self
        }
    }
}

/// The region inside the screen border and above the status bar in which
/// the active mode draws
pub(crate) fn content_area(screen: Rect) -> Rect {
    screen.inner(Margin::new(1, 1)).shave(Side::Bottom)
}

/// The single row of the status bar, just above the screen's bottom border
pub(crate) fn status_bar_area(screen: Rect) -> Rect {
    let content = content_area(screen);
    Rect {
        y: content.bottom(),
        height: 1,
        ..content
    }
    .shave(Side::Right)
}

/// Return a `Rect` of the given size centered within `area`, rounding
/// towards the top-left.  The result is clipped to `area`.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let x = area.x + area.width.saturating_sub(size.width) / 2;
    let y = area.y + area.height.saturating_sub(size.height) / 2;
    Rect::new(x, y, size.width, size.height).intersection(area)
}

/// Number of terminal columns `s` occupies
pub(crate) fn text_width(s: &str) -> u16 {
    u16::try_from(unicode_width::UnicodeWidthStr::width(s)).unwrap_or(u16::MAX)
}

/// Write-only view of a region of a buffer, addressed in absolute screen
/// coordinates.  Writes outside the region are dropped.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Canvas<'a> {
    pub(crate) area: Rect,
    pub(crate) buf: &'a mut Buffer,
}

impl Canvas<'_> {
    pub(crate) fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if !self.area.contains(pos) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut(pos) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }

    /// Draw `text` starting at `pos` and running rightwards, clipped to the
    /// canvas
    pub(crate) fn draw_str(&mut self, pos: Position, text: &str, style: Style) {
        if !self.area.contains(pos) {
            return;
        }
        let room = self.area.right().saturating_sub(pos.x);
        self.buf
            .set_stringn(pos.x, pos.y, text, usize::from(room), style);
    }
}

/// Display adapter that prints an error followed by all of its sources
#[derive(Clone, Copy, Debug)]
pub(crate) struct ErrorChain<'a>(pub(crate) &'a dyn std::error::Error);

impl std::fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(e) = source {
            write!(f, ": {e}")?;
            source = e.source();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rect::new(5, 7, 20, 10), Side::Bottom, Rect::new(5, 7, 20, 9))]
    #[case(Rect::new(5, 7, 20, 10), Side::Right, Rect::new(5, 7, 19, 10))]
    #[case(Rect::new(5, 7, 1, 1), Side::Bottom, Rect::ZERO)]
    #[case(Rect::new(5, 7, 1, 1), Side::Right, Rect::ZERO)]
    #[case(Rect::ZERO, Side::Bottom, Rect::ZERO)]
    #[case(Rect::ZERO, Side::Right, Rect::ZERO)]
    fn test_shave(#[case] before: Rect, #[case] side: Side, #[case] after: Rect) {
        assert_eq!(before.shave(side), after);
    }

    #[test]
    fn screen_regions() {
        let screen = Rect::new(0, 0, 140, 40);
        assert_eq!(content_area(screen), Rect::new(1, 1, 138, 37));
        assert_eq!(status_bar_area(screen), Rect::new(1, 38, 137, 1));
    }

    #[test]
    fn centered() {
        assert_eq!(
            center_rect(Rect::new(1, 1, 138, 37), Size::new(65, 31)),
            Rect::new(37, 4, 65, 31)
        );
    }

    #[test]
    fn canvas_clips() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        let mut canvas = Canvas {
            area: Rect::new(2, 1, 5, 1),
            buf: &mut buf,
        };
        canvas.draw_cell(Position::new(1, 1), 'x', Style::new());
        canvas.draw_cell(Position::new(2, 1), '#', Style::new());
        canvas.draw_str(Position::new(4, 1), "abcdef", Style::new());
        assert_eq!(buf, Buffer::with_lines(["", "  # abc   ", ""]));
    }
}
