//! Running score, session clock, and the end-of-level summary

use serde::{Deserialize, Serialize};

use super::progress::PlayerProgress;
use super::scoring::star_rating;
use crate::tuning::Tuning;

/// Running score and elapsed play time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScore {
    /// May go negative; hazard penalties are not floored
    pub total_score: i64,
    /// Seconds of active play
    pub elapsed_secs: f64,
}

impl SessionScore {
    pub fn add_points(&mut self, points: u32) {
        self.total_score += i64::from(points);
    }

    pub fn apply_penalty(&mut self, penalty: u32) {
        self.total_score -= i64::from(penalty);
    }

    pub fn advance_clock(&mut self, dt: f32) {
        self.elapsed_secs += f64::from(dt.max(0.0));
    }

    /// Whole seconds elapsed (for display and the final summary)
    pub fn elapsed_whole_secs(&self) -> u32 {
        self.elapsed_secs.floor() as u32
    }
}

/// Summary handed to the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOutcome {
    pub final_score: i64,
    pub elapsed_seconds: u32,
    /// 0..=3
    pub stars_awarded: u8,
}

impl LevelOutcome {
    pub fn evaluate(score: &SessionScore, tuning: &Tuning) -> Self {
        Self {
            final_score: score.total_score,
            elapsed_seconds: score.elapsed_whole_secs(),
            stars_awarded: star_rating(score.total_score, &tuning.stars),
        }
    }
}

/// Win condition: top tier reached and its quota fully eaten
pub fn level_won(progress: &PlayerProgress, tuning: &Tuning) -> bool {
    progress.is_complete(tuning)
}
