//! In-memory high-score list kept across "play again" rounds.

/// Number of entries retained.
pub(crate) const LIST_CAPACITY: usize = 10;

/// Longest player name kept on the list.
pub(crate) const MAX_NAME_LENGTH: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
struct HighScore {
    name: String,
    score: u32,
}

/// Best scores in descending order; ties keep their arrival order.
#[derive(Debug, Default)]
pub(crate) struct HighScores {
    entries: Vec<HighScore>,
}

impl HighScores {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a finished session and returns its one-based rank, if it made the list.
    pub(crate) fn record(&mut self, name: &str, score: u32) -> Option<usize> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.entries.len());
        if position >= LIST_CAPACITY {
            return None;
        }

        self.entries.insert(
            position,
            HighScore {
                name: name.chars().take(MAX_NAME_LENGTH).collect(),
                score,
            },
        );
        self.entries.truncate(LIST_CAPACITY);
        Some(position + 1)
    }

    /// One line per entry, best first.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| format!("{}. {}: {}", index + 1, entry.name, entry.score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_listed_best_first() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record("ana", 175), Some(1));
        assert_eq!(scores.record("bo", 600), Some(1));
        assert_eq!(scores.record("cy", 0), Some(3));

        assert_eq!(scores.lines(), vec!["1. bo: 600", "2. ana: 175", "3. cy: 0"]);
    }

    #[test]
    fn ties_keep_their_arrival_order() {
        let mut scores = HighScores::new();
        let _ = scores.record("first", 100);
        let _ = scores.record("second", 100);

        assert_eq!(scores.lines(), vec!["1. first: 100", "2. second: 100"]);
    }

    #[test]
    fn only_the_best_ten_are_kept() {
        let mut scores = HighScores::new();
        for score in 1..=10 {
            let _ = scores.record("p", score * 10);
        }

        assert_eq!(scores.record("late", 10), None);
        assert_eq!(scores.record("strong", 55), Some(6));
        assert_eq!(scores.lines().len(), LIST_CAPACITY);
        assert_eq!(scores.lines()[9], "10. p: 20");
    }

    #[test]
    fn long_names_are_truncated() {
        let mut scores = HighScores::new();
        let _ = scores.record("abcdefghijklmnopqrstuvwxyz", 5);

        assert_eq!(scores.lines(), vec!["1. abcdefghijklmnopqrst: 5"]);
    }
}
