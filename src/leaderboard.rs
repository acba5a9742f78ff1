use crate::consts;
use crate::util::ErrorChain;
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use std::io::ErrorKind;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The best scores seen so far, at most
/// [`LEADERBOARD_SIZE`][consts::LEADERBOARD_SIZE] of them, highest first.
/// Equal scores keep the order in which they were first recorded.
///
/// On disk this is a JSON array of `[name, score]` pairs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Leaderboard(Vec<LeaderboardEntry>);

impl Leaderboard {
    pub(crate) fn entries(&self) -> &[LeaderboardEntry] {
        &self.0
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record that `name` scored `score`.  An existing entry for `name` is
    /// only changed if `score` beats it.
    pub(crate) fn upsert(&mut self, name: &str, score: NonZeroU32) {
        if let Some(entry) = self.0.iter_mut().find(|e| e.name == name) {
            if score > entry.score {
                entry.score = score;
            }
        } else {
            self.0.push(LeaderboardEntry {
                name: name.to_owned(),
                score,
            });
        }
        self.normalize();
    }

    /// Restore the ordering & size invariants after loading from a file that
    /// may have been edited by hand
    fn normalize(&mut self) {
        let mut seen = Vec::<LeaderboardEntry>::new();
        for entry in std::mem::take(&mut self.0) {
            if let Some(prev) = seen.iter_mut().find(|e| e.name == entry.name) {
                prev.score = prev.score.max(entry.score);
            } else {
                seen.push(entry);
            }
        }
        // `sort_by` is stable, so ties stay in insertion order.
        seen.sort_by(|a, b| b.score.cmp(&a.score));
        seen.truncate(consts::LEADERBOARD_SIZE);
        self.0 = seen;
    }
}

impl Serialize for Leaderboard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0
            .iter()
            .map(|e| (e.name.as_str(), e.score))
            .collect::<Vec<_>>()
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Leaderboard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(String, NonZeroU32)>::deserialize(deserializer)?;
        let mut board = Leaderboard(
            pairs
                .into_iter()
                .map(|(name, score)| LeaderboardEntry { name, score })
                .collect(),
        );
        board.normalize();
        Ok(board)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LeaderboardEntry {
    pub(crate) name: String,
    pub(crate) score: NonZeroU32,
}

/// Where the leaderboard lives on disk.  A store without a path neither
/// reads nor writes anything.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct LeaderboardFile {
    path: Option<PathBuf>,
}

impl LeaderboardFile {
    pub(crate) fn new(path: PathBuf) -> LeaderboardFile {
        LeaderboardFile { path: Some(path) }
    }

    /// A store that never touches the disk
    pub(crate) fn disabled() -> LeaderboardFile {
        LeaderboardFile { path: None }
    }

    /// Return the default leaderboard file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("snake-arcade").join("leaderboard.json"))
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the leaderboard.  A missing or unreadable file is treated as an
    /// empty leaderboard; problems are logged, never returned.
    pub(crate) fn load(&self) -> Leaderboard {
        let Some(path) = self.path() else {
            return Leaderboard::default();
        };
        match read_leaderboard(path) {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %ErrorChain(&e), "Could not load leaderboard; starting empty");
                Leaderboard::default()
            }
        }
    }

    /// Merge a finished game's score into the stored leaderboard and write it
    /// back.  Returns the merged leaderboard whether or not it could be
    /// saved; save failures are logged.
    pub(crate) fn record(&self, name: &str, score: NonZeroU32) -> Leaderboard {
        let mut board = self.load();
        board.upsert(name, score);
        if let Some(path) = self.path() {
            match write_leaderboard(path, &board) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), name, score = score.get(), "Saved leaderboard");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %ErrorChain(&e), "Could not save leaderboard");
                }
            }
        }
        board
    }
}

fn read_leaderboard(path: &Path) -> Result<Leaderboard, LoadError> {
    let src = match fs_err::read(path) {
        Ok(src) => src,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Leaderboard::default()),
        Err(e) => return Err(LoadError::read(e)),
    };
    serde_json::from_slice(&src).map_err(LoadError::deserialize)
}

fn write_leaderboard(path: &Path, board: &Leaderboard) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
    }
    let mut src = serde_json::to_string(board).map_err(SaveError::serialize)?;
    src.push('\n');
    fs_err::write(path, &src).map_err(SaveError::write)?;
    Ok(())
}

#[derive(Debug, Error)]
#[error("Failed to save leaderboard to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize leaderboard")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write leaderboard file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read leaderboard from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read leaderboard file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize leaderboard")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).expect("test scores should be nonzero")
    }

    fn board(pairs: &[(&str, u32)]) -> Leaderboard {
        let mut board = Leaderboard::default();
        for &(name, score) in pairs {
            board.upsert(name, nz(score));
        }
        board
    }

    fn pairs(board: &Leaderboard) -> Vec<(&str, u32)> {
        board
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.score.get()))
            .collect()
    }

    #[test]
    fn upsert_updates_existing_name() {
        let mut lb = board(&[("AA", 50), ("BB", 40)]);
        lb.upsert("AA", nz(60));
        assert_eq!(pairs(&lb), [("AA", 60), ("BB", 40)]);
    }

    #[test]
    fn upsert_keeps_higher_previous_score() {
        let mut lb = board(&[("AA", 50), ("BB", 40)]);
        lb.upsert("AA", nz(10));
        assert_eq!(pairs(&lb), [("AA", 50), ("BB", 40)]);
    }

    #[test]
    fn upsert_reorders_and_truncates() {
        let mut lb = board(&[("A", 5), ("B", 4), ("C", 3), ("D", 2), ("E", 1)]);
        lb.upsert("F", nz(3));
        assert_eq!(
            pairs(&lb),
            [("A", 5), ("B", 4), ("C", 3), ("F", 3), ("D", 2)]
        );
        lb.upsert("E", nz(10));
        assert_eq!(
            pairs(&lb),
            [("E", 10), ("A", 5), ("B", 4), ("C", 3), ("F", 3)]
        );
        lb.upsert("G", nz(1));
        assert_eq!(lb.entries().len(), 5);
        assert!(!lb.entries().iter().any(|e| e.name == "G"));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let lb = board(&[("X", 7), ("Y", 7), ("Z", 9)]);
        assert_eq!(pairs(&lb), [("Z", 9), ("X", 7), ("Y", 7)]);
    }

    #[test]
    fn serializes_as_pairs() {
        let lb = board(&[("AA", 60), ("BB", 40)]);
        assert_eq!(
            serde_json::to_string(&lb).unwrap(),
            r#"[["AA",60],["BB",40]]"#
        );
    }

    #[test]
    fn deserializing_normalizes() {
        let lb = serde_json::from_str::<Leaderboard>(
            r#"[["B",1],["A",9],["B",4],["C",2],["D",3],["E",5],["F",6]]"#,
        )
        .unwrap();
        assert_eq!(
            pairs(&lb),
            [("A", 9), ("F", 6), ("E", 5), ("B", 4), ("D", 3)]
        );
    }

    #[test]
    fn missing_file_is_empty() {
        let tmpdir = tempfile::tempdir().unwrap();
        let store = LeaderboardFile::new(tmpdir.path().join("nowhere.json"));
        assert_eq!(store.load(), Leaderboard::default());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("leaderboard.json");
        fs_err::write(&path, "{not json").unwrap();
        let store = LeaderboardFile::new(path);
        assert_eq!(store.load(), Leaderboard::default());
    }

    #[test]
    fn zero_score_in_file_is_corrupt() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("leaderboard.json");
        fs_err::write(&path, r#"[["AA",0]]"#).unwrap();
        assert!(LeaderboardFile::new(path).load().is_empty());
    }

    #[test]
    fn record_merges_with_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("sub").join("leaderboard.json");
        let store = LeaderboardFile::new(path.clone());
        let _ = store.record("AA", nz(50));
        let _ = store.record("BB", nz(40));
        let merged = store.record("AA", nz(60));
        assert_eq!(pairs(&merged), [("AA", 60), ("BB", 40)]);
        assert_eq!(store.load(), merged);
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "[[\"AA\",60],[\"BB\",40]]\n"
        );
    }

    #[test]
    fn record_into_unwritable_location_still_returns_board() {
        let tmpdir = tempfile::tempdir().unwrap();
        let blocker = tmpdir.path().join("file");
        fs_err::write(&blocker, "").unwrap();
        let store = LeaderboardFile::new(blocker.join("leaderboard.json"));
        let board = store.record("AA", nz(3));
        assert_eq!(pairs(&board), [("AA", 3)]);
    }

    #[test]
    fn disabled_store_never_touches_disk() {
        let store = LeaderboardFile::disabled();
        assert_eq!(store.path(), None);
        let board = store.record("AA", nz(3));
        assert_eq!(pairs(&board), [("AA", 3)]);
        assert!(store.load().is_empty());
    }
}
