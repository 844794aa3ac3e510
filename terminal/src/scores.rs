use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use common::{rank_scores, HighScore, ScoreStore, MAX_HIGH_SCORES};
use tracing::warn;

/// Top scores kept in a JSON file. Read or write failures are logged and the
/// store carries on with what it last had.
pub struct JsonScoreStore {
    path: PathBuf,
    scores: Vec<HighScore>,
}

impl JsonScoreStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = read_scores(&path).unwrap_or_else(|err| {
            warn!("Ignoring unreadable score file {:?}: {:#}", path, err);
            Vec::new()
        });
        Self { path, scores }
    }

    fn write_scores(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(&self.scores)?;
        fs::write(&self.path, json).with_context(|| format!("Failed to write scores to {:?}", self.path))
    }
}

fn read_scores(path: &Path) -> Result<Vec<HighScore>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let mut scores: Vec<HighScore> = serde_json::from_str(&json).context("Failed to parse score file")?;
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(MAX_HIGH_SCORES);
    Ok(scores)
}

impl ScoreStore for JsonScoreStore {
    fn load_top_scores(&self) -> Vec<HighScore> {
        match read_scores(&self.path) {
            Ok(scores) => scores,
            Err(err) => {
                warn!("Failed to load scores: {:#}", err);
                self.scores.clone()
            }
        }
    }

    fn submit_score(&mut self, score: u32) -> Vec<HighScore> {
        self.scores = rank_scores(self.load_top_scores(), HighScore::today(score));
        if let Err(err) = self.write_scores() {
            warn!("Failed to save score {}: {:#}", score, err);
        }
        self.scores.clone()
    }
}
