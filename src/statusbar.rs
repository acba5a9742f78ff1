use chrono::{DateTime, TimeZone};
use enum_map::Enum;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::fmt::Display;

/// The ways the status bar can show the current time.  `t` steps through
/// them in declaration order.
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(crate) enum TimeFormat {
    #[default]
    DateTime,
    DateTimeMicros,
    Date,
    Time,
}

impl TimeFormat {
    /// The `chrono` format string for this format
    pub(crate) fn pattern(self) -> &'static str {
        match self {
            TimeFormat::DateTime => "%d.%m.%Y %H:%M:%S",
            TimeFormat::DateTimeMicros => "%d.%m.%Y %H:%M:%S%.6f",
            TimeFormat::Date => "%d.%m.%Y",
            TimeFormat::Time => "%H:%M:%S",
        }
    }

    /// Return the following format, wrapping around after the last one
    pub(crate) fn next(self) -> TimeFormat {
        TimeFormat::from_usize((self.into_usize() + 1) % Self::LENGTH)
    }
}

/// The footer shown under every mode: a logo on the left and a timestamp on
/// the right
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct StatusBar {
    logo: String,
    timestamp: String,
    style: Style,
}

impl StatusBar {
    pub(crate) fn new<Tz>(
        logo: String,
        now: &DateTime<Tz>,
        format: TimeFormat,
        style: Style,
    ) -> StatusBar
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        StatusBar {
            logo,
            timestamp: now.format(format.pattern()).to_string(),
            style,
        }
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = format!(
            "{logo:<width$}{timestamp}",
            logo = self.logo,
            timestamp = self.timestamp,
            width = usize::from(area.width).saturating_sub(self.timestamp.chars().count()),
        );
        buf.set_stringn(area.x, area.y, line, usize::from(area.width), self.style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    fn sample_time() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|d| d.and_hms_micro_opt(9, 5, 2, 123_456))
            .map(|dt| dt.and_utc())
            .expect("sample timestamp should be valid")
    }

    #[rstest]
    #[case(TimeFormat::DateTime, "07.03.2024 09:05:02")]
    #[case(TimeFormat::DateTimeMicros, "07.03.2024 09:05:02.123456")]
    #[case(TimeFormat::Date, "07.03.2024")]
    #[case(TimeFormat::Time, "09:05:02")]
    fn test_pattern(#[case] format: TimeFormat, #[case] s: &str) {
        assert_eq!(sample_time().format(format.pattern()).to_string(), s);
    }

    #[test]
    fn next_cycles_and_wraps() {
        let mut fmt = TimeFormat::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(fmt);
            fmt = fmt.next();
        }
        assert_eq!(
            seen,
            [
                TimeFormat::DateTime,
                TimeFormat::DateTimeMicros,
                TimeFormat::Date,
                TimeFormat::Time,
                TimeFormat::DateTime,
            ]
        );
    }

    #[test]
    fn render_justified() {
        let bar = StatusBar::new(
            String::from("SNAKE GAME [40 x 3]"),
            &sample_time(),
            TimeFormat::Time,
            Style::new(),
        );
        let area = Rect::new(0, 0, 40, 1);
        let mut buffer = Buffer::empty(area);
        bar.render(area, &mut buffer);
        assert_eq!(
            buffer,
            Buffer::with_lines(["SNAKE GAME [40 x 3]             09:05:02"])
        );
    }
}
