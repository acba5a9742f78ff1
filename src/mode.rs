use crate::command::Command;
use crate::config::Styles;
use crate::intro::IntroMode;
use crate::leaderboard::LeaderboardFile;
use crate::play::PlayMode;
use crate::player::PlayerName;
use enum_dispatch::enum_dispatch;
use rand::RngCore;
use ratatui::buffer::Buffer;
use std::time::Instant;

/// State shared between the application loop and whichever mode is active
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Context {
    /// The most recent recognized keypress that nothing has consumed yet.  A
    /// new keypress replaces it.
    pending: Option<Command>,

    /// The name entered on the intro screen
    pub(crate) player: Option<PlayerName>,

    pub(crate) leaderboard: LeaderboardFile,

    pub(crate) styles: Styles,
}

impl Context {
    pub(crate) fn new(leaderboard: LeaderboardFile, styles: Styles) -> Context {
        Context {
            pending: None,
            player: None,
            leaderboard,
            styles,
        }
    }

    pub(crate) fn press(&mut self, cmd: Command) {
        self.pending = Some(cmd);
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> Option<Command> {
        self.pending
    }

    /// Consume the pending keypress if it is `cmd`
    pub(crate) fn take_key(&mut self, cmd: Command) -> bool {
        self.take_key_with(|c| (c == cmd).then_some(())).is_some()
    }

    /// Consume the pending keypress if `f` maps it to something
    pub(crate) fn take_key_with<T, F>(&mut self, f: F) -> Option<T>
    where
        F: FnOnce(Command) -> Option<T>,
    {
        let value = f(self.pending?)?;
        self.pending = None;
        Some(value)
    }
}

/// A full-screen mode of the application
#[enum_dispatch]
pub(crate) trait Mode {
    /// Advance the mode's state to time `now`, consuming any keypress from
    /// `ctx` that the mode understands
    fn update(&mut self, ctx: &mut Context, rng: &mut dyn RngCore, now: Instant);

    /// Draw the mode into the region it was created for
    fn render(&self, ctx: &Context, buf: &mut Buffer);
}

#[enum_dispatch(Mode)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Screen {
    Intro(IntroMode),
    Play(PlayMode),
}

impl Screen {
    pub(crate) fn is_intro(&self) -> bool {
        matches!(self, Screen::Intro(_))
    }

    pub(crate) fn is_play(&self) -> bool {
        matches!(self, Screen::Play(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context::new(LeaderboardFile::disabled(), Styles::default())
    }

    #[test]
    fn take_matching_key() {
        let mut ctx = context();
        ctx.press(Command::Pause);
        assert!(!ctx.take_key(Command::Start));
        assert_eq!(ctx.pending(), Some(Command::Pause));
        assert!(ctx.take_key(Command::Pause));
        assert_eq!(ctx.pending(), None);
        assert!(!ctx.take_key(Command::Pause));
    }

    #[test]
    fn newer_key_replaces_older() {
        let mut ctx = context();
        ctx.press(Command::Left);
        ctx.press(Command::Up);
        assert_eq!(
            ctx.take_key_with(|c| (c != Command::Pause).then_some(c)),
            Some(Command::Up)
        );
        assert_eq!(ctx.pending(), None);
    }
}
