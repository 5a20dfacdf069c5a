//! Top ten leaderboard
//!
//! Persisted as a small text file, one entry per line. Each line is
//! `name,score` with every character XOR'd against [`SECRET_KEY`], which keeps
//! casual editors from bumping their own score.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of entries on the board
pub const MAX_LEADERS: usize = 10;

/// XOR key for the file format
pub const SECRET_KEY: u8 = 42;

/// Placeholder name for empty slots
const DEFAULT_NAME: &str = "AAA";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderEntry {
    fn placeholder() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            score: 0,
        }
    }

    fn encode(&self) -> String {
        xor(&format!("{},{}", self.name, self.score))
    }

    fn decode(line: &str, number: usize) -> Result<Self> {
        let plain = xor(line);
        let malformed = |reason: &str| Error::MalformedLeaderboard {
            line: number,
            reason: reason.to_string(),
        };
        let (name, score) = plain
            .split_once(',')
            .ok_or_else(|| malformed("missing separator"))?;
        if score.contains(',') {
            return Err(malformed("too many fields"));
        }
        let score = score
            .parse::<u64>()
            .map_err(|e| malformed(&format!("bad score {score:?}: {e}")))?;
        Ok(Self {
            name: name.to_string(),
            score,
        })
    }
}

fn xor(text: &str) -> String {
    text.chars()
        .map(|c| char::from_u32(c as u32 ^ u32::from(SECRET_KEY)).unwrap_or(c))
        .collect()
}

/// Names may not contain the field separator or anything that encodes to a
/// line break
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c == ',' || c.is_whitespace() || c.is_control() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        cleaned
    }
}

/// Top ten scores, highest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderEntry>,
    /// Changed since load; only dirty boards are written back
    dirty: bool,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaderboard {
    /// A fresh board of placeholder entries. Starts dirty so it gets written.
    pub fn new() -> Self {
        Self {
            entries: vec![LeaderEntry::placeholder(); MAX_LEADERS],
            dirty: true,
        }
    }

    /// Load from `path`, or start fresh if the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            log::info!("No leaderboard at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)?;
        let board = Self::from_lines(text.lines())?;
        log::info!("Loaded leaderboard from {}", path.display());
        Ok(board)
    }

    /// Decode encoded lines. Blank lines are skipped; the result is sorted
    /// and padded or cut to [`MAX_LEADERS`] entries.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut entries = Vec::with_capacity(MAX_LEADERS);
        for (i, line) in lines.into_iter().enumerate() {
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }
            entries.push(LeaderEntry::decode(line, i + 1)?);
        }
        // Stable, so ties keep file order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.resize(MAX_LEADERS, LeaderEntry::placeholder());
        Ok(Self {
            entries,
            dirty: false,
        })
    }

    /// Encoded lines, one per entry
    pub fn to_lines(&self) -> Vec<String> {
        self.entries.iter().map(LeaderEntry::encode).collect()
    }

    /// Whether `score` would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Insert a score ahead of the first strictly lower entry, dropping the
    /// last. Returns the rank achieved (1-indexed) or None if it didn't make
    /// the cut.
    pub fn add(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            LeaderEntry {
                name: sanitize_name(name),
                score,
            },
        );
        self.entries.truncate(MAX_LEADERS);
        self.dirty = true;
        Some(pos + 1)
    }

    /// Write to `path` if anything changed. Returns whether a write happened.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let path = path.as_ref();
        let mut text = self.to_lines().join("\n");
        text.push('\n');
        std::fs::write(path, text)?;
        self.dirty = false;
        log::info!("Leaderboard saved to {}", path.display());
        Ok(true)
    }

    pub fn entries(&self) -> &[LeaderEntry] {
        &self.entries
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Top score
    pub fn top_score(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

impl fmt::Display for Leaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}     {:09}", entry.name, entry.score)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("masteroids-{tag}-{}.board", std::process::id()))
    }

    #[test]
    fn test_new_board() {
        let board = Leaderboard::new();
        assert_eq!(board.entries().len(), MAX_LEADERS);
        assert!(board.entries().iter().all(|e| e.name == "AAA" && e.score == 0));
        assert!(board.is_dirty());
    }

    #[test]
    fn test_qualifies() {
        let mut board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
        for s in 1..=10 {
            board.add("P", s * 10);
        }
        assert!(!board.qualifies(10));
        assert!(board.qualifies(11));
    }

    #[test]
    fn test_add_ranks() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add("ONE", 100), Some(1));
        assert_eq!(board.add("TWO", 50), Some(2));
        assert_eq!(board.add("TOP", 200), Some(1));
        // Ties go after existing equal scores
        assert_eq!(board.add("TIE", 100), Some(3));
        assert_eq!(board.entries().len(), MAX_LEADERS);
        assert_eq!(board.entries()[0].name, "TOP");
        assert_eq!(board.entries()[2].name, "TIE");
        assert_eq!(board.add("NOPE", 0), None);
    }

    #[test]
    fn test_add_sanitizes_name() {
        let mut board = Leaderboard::new();
        board.add("a,b c", 5);
        assert_eq!(board.entries()[0].name, "a_b_c");
        board.add("   ", 6);
        assert_eq!(board.entries()[0].name, "AAA");
    }

    #[test]
    fn test_encoded_lines_hide_plaintext() {
        let mut board = Leaderboard::new();
        board.add("ZED", 1234);
        let lines = board.to_lines();
        assert!(!lines[0].contains("ZED"));
        assert!(!lines[0].contains("1234"));

        let decoded = Leaderboard::from_lines(lines.iter().map(String::as_str)).unwrap();
        assert_eq!(decoded.entries(), board.entries());
        assert!(!decoded.is_dirty());
    }

    #[test]
    fn test_from_lines_skips_blanks_and_pads() {
        let line = LeaderEntry {
            name: "BOB".into(),
            score: 7,
        }
        .encode();
        let board = Leaderboard::from_lines(["", line.as_str(), "\r"]).unwrap();
        assert_eq!(board.entries().len(), MAX_LEADERS);
        assert_eq!(board.entries()[0].name, "BOB");
        assert_eq!(board.entries()[1].score, 0);
    }

    #[test]
    fn test_malformed_lines() {
        let no_sep = xor("nobody");
        let err = Leaderboard::from_lines([no_sep.as_str()]).unwrap_err();
        assert!(matches!(err, Error::MalformedLeaderboard { line: 1, .. }));

        let bad_score = xor("AAA,lots");
        let good = xor("AAA,1");
        let err = Leaderboard::from_lines([good.as_str(), bad_score.as_str()]).unwrap_err();
        assert!(matches!(err, Error::MalformedLeaderboard { line: 2, .. }));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save");
        let mut board = Leaderboard::new();
        board.add("ACE", 900);
        assert!(board.save(&path).unwrap());
        assert!(!board.is_dirty());
        // Clean boards are not rewritten
        assert!(!board.save(&path).unwrap());

        let loaded = Leaderboard::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.entries(), board.entries());
        assert_eq!(loaded.top_score(), 900);
    }

    #[test]
    fn test_load_missing_file_starts_fresh() {
        let board = Leaderboard::load(temp_path("missing")).unwrap();
        assert_eq!(board, Leaderboard::new());
    }

    #[test]
    fn test_display() {
        let mut board = Leaderboard::new();
        board.add("MAX", 42);
        let text = board.to_string();
        assert!(text.starts_with("MAX     000000042\n"));
        assert_eq!(text.lines().count(), MAX_LEADERS);
    }
}
