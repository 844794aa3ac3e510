use serde::{Deserialize, Serialize};

use crate::constants::MAX_HIGH_SCORES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    pub date: String,
}

impl HighScore {
    pub fn today(score: u32) -> Self {
        HighScore {
            score,
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Persistence collaborator for the top scores. Implementations report their own
/// failures and always hand back a usable list.
pub trait ScoreStore {
    fn load_top_scores(&self) -> Vec<HighScore>;
    fn submit_score(&mut self, score: u32) -> Vec<HighScore>;
}

/// Insert `entry`, order by score descending and keep the best `MAX_HIGH_SCORES`.
/// Equal scores keep their existing order, so older entries rank first.
pub fn rank_scores(mut scores: Vec<HighScore>, entry: HighScore) -> Vec<HighScore> {
    scores.push(entry);
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(MAX_HIGH_SCORES);
    scores
}

pub fn is_high_score(scores: &[HighScore], score: u32) -> bool {
    scores.len() < MAX_HIGH_SCORES || scores.last().is_some_and(|lowest| score > lowest.score)
}

#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    scores: Vec<HighScore>,
}

impl ScoreStore for MemoryScoreStore {
    fn load_top_scores(&self) -> Vec<HighScore> {
        self.scores.clone()
    }

    fn submit_score(&mut self, score: u32) -> Vec<HighScore> {
        self.scores = rank_scores(std::mem::take(&mut self.scores), HighScore::today(score));
        self.scores.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32) -> HighScore {
        HighScore { score, date: "2025-01-01".to_string() }
    }

    #[test]
    fn test_rank_keeps_five_descending() {
        let mut scores = Vec::new();
        for s in [30, 10, 70, 50, 20, 60, 40] {
            scores = rank_scores(scores, entry(s));
        }
        let values: Vec<u32> = scores.iter().map(|h| h.score).collect();
        assert_eq!(values, vec![70, 60, 50, 40, 30]);
    }

    #[test]
    fn test_is_high_score() {
        let scores: Vec<HighScore> = [50, 40, 30, 20].into_iter().map(entry).collect();
        assert!(is_high_score(&scores, 1));
        let scores = rank_scores(scores, entry(10));
        assert!(!is_high_score(&scores, 10));
        assert!(is_high_score(&scores, 11));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryScoreStore::default();
        assert!(store.load_top_scores().is_empty());
        store.submit_score(120);
        let top = store.submit_score(300);
        assert_eq!(top[0].score, 300);
        assert_eq!(store.load_top_scores(), top);
    }
}
