//! Score and life accounting

use serde::{Deserialize, Serialize};

/// Cumulative score and remaining lives for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u64,
    lives: u32,
}

impl Scoreboard {
    pub fn new(lives: u32) -> Self {
        Self { score: 0, lives }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn add_score(&mut self, delta: u64) {
        self.score = self.score.saturating_add(delta);
    }

    /// Remove up to `n` lives, never going below zero
    pub fn lose_lives(&mut self, n: u32) {
        self.lives = self.lives.saturating_sub(n);
    }

    pub fn is_out(&self) -> bool {
        self.lives == 0
    }

    pub fn reset(&mut self, lives: u32) {
        self.score = 0;
        self.lives = lives;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lives_clamp_at_zero() {
        let mut board = Scoreboard::new(3);
        board.lose_lives(2);
        assert_eq!(board.lives(), 1);
        board.lose_lives(5);
        assert_eq!(board.lives(), 0);
        assert!(board.is_out());
    }

    #[test]
    fn test_score_accumulates_and_resets() {
        let mut board = Scoreboard::new(3);
        board.add_score(10);
        board.add_score(50);
        assert_eq!(board.score(), 60);

        board.lose_lives(3);
        board.reset(3);
        assert_eq!(board.score(), 0);
        assert_eq!(board.lives(), 3);
    }
}
