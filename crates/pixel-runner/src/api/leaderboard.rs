use serde::{Deserialize, Serialize};

/// Entries kept for display.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u64,
    /// Run length in seconds.
    pub time: f32,
    /// Host-formatted date string.
    pub date: String,
}

/// High score plus the top runs. The host persists the JSON form; this type only orders and caps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    pub high_score: u64,
    #[serde(default)]
    pub entries: Vec<LeaderboardEntry>,
}

impl HighScores {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.normalize();
        Ok(scores)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Record a finished run. Returns true when it beats the stored high score.
    pub fn submit(&mut self, entry: LeaderboardEntry) -> bool {
        let is_record = entry.score > self.high_score;
        if is_record {
            self.high_score = entry.score;
        }
        self.entries.push(entry);
        self.normalize();
        is_record
    }

    fn normalize(&mut self) {
        // Stable sort keeps the earlier run ahead on ties.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_SIZE);
        if let Some(best) = self.entries.first() {
            self.high_score = self.high_score.max(best.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            score,
            time: 12.5,
            date: "2024-01-01".into(),
        }
    }

    #[test]
    fn keeps_top_ten_descending() {
        let mut board = HighScores::default();
        for s in [50, 10, 300, 20, 90, 70, 1, 2, 3, 4, 5, 6] {
            board.submit(entry(s));
        }
        assert_eq!(board.entries.len(), LEADERBOARD_SIZE);
        assert_eq!(board.entries[0].score, 300);
        assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(!board.entries.iter().any(|e| e.score == 1 || e.score == 2));
    }

    #[test]
    fn submit_reports_new_record() {
        let mut board = HighScores::default();
        assert!(board.submit(entry(100)));
        assert!(!board.submit(entry(50)));
        assert!(board.submit(entry(101)));
        assert_eq!(board.high_score, 101);
    }

    #[test]
    fn json_round_trip_sorts_unsorted_input() {
        let json = r#"{"entries":[{"score":5,"time":1.0,"date":"a"},{"score":9,"time":2.0,"date":"b"}]}"#;
        let board = HighScores::from_json(json).unwrap();
        assert_eq!(board.entries[0].score, 9);
        assert_eq!(board.high_score, 9);
        let back = HighScores::from_json(&board.to_json().unwrap()).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(HighScores::from_json("not json").is_err());
    }
}
