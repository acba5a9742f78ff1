use crate::consts;
use std::fmt;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;

/// The name the player entered on the intro screen: one to
/// [`MAX_NAME_LENGTH`][consts::MAX_NAME_LENGTH] upper-case grapheme clusters
/// with no surrounding whitespace
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PlayerName(String);

impl PlayerName {
    /// Normalize raw input into a name.  Returns `None` if nothing but
    /// whitespace remains.
    pub(crate) fn new(raw: &str) -> Option<PlayerName> {
        let upper = raw.trim().to_uppercase();
        let name = upper
            .graphemes(true)
            .take(consts::MAX_NAME_LENGTH)
            .collect::<String>();
        let name = name.trim_end();
        (!name.is_empty()).then(|| PlayerName(name.to_owned()))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// The text typed so far at the name prompt
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct NameInput(String);

impl NameInput {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a typed character.  Control and formatting characters are
    /// ignored, as is anything typed once the input is full.
    pub(crate) fn push(&mut self, ch: char) {
        if ch.general_category_group() == GeneralCategoryGroup::Other {
            return;
        }
        let mut extended = self.0.clone();
        extended.push(ch);
        // A combining character extends the last grapheme rather than
        // starting a new one, so check the length after appending.
        if extended.graphemes(true).count() <= consts::MAX_NAME_LENGTH {
            self.0 = extended;
        }
    }

    /// Delete the last grapheme cluster
    pub(crate) fn backspace(&mut self) {
        if let Some((i, _)) = self.0.grapheme_indices(true).next_back() {
            self.0.truncate(i);
        }
    }

    /// Try to turn the input into a name.  On failure, the input is cleared
    /// so that the player can start over.
    pub(crate) fn submit(&mut self) -> Option<PlayerName> {
        let name = PlayerName::new(&self.0);
        if name.is_none() {
            self.0.clear();
        }
        name
    }
}
