//! Score store data models

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

/// Persisted per-player statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub best_score: u32,
    pub games_played: u32,
    /// RFC 3339 timestamp
    pub created_at: String,
}

impl PlayerRecord {
    /// Calendar date the player was registered, if the stored timestamp parses.
    pub fn created_on(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|ts| ts.date_naive())
    }
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    pub best_score: u32,
    pub games_played: u32,
}

impl LeaderboardEntry {
    /// Medal for the podium, plain rank number otherwise.
    pub fn rank_label(&self) -> String {
        match self.rank {
            1 => "🥇".to_string(),
            2 => "🥈".to_string(),
            3 => "🥉".to_string(),
            n => n.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: usize) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            name: "p".to_string(),
            best_score: 0,
            games_played: 0,
        }
    }

    #[test]
    fn test_rank_labels() {
        assert_eq!(entry(1).rank_label(), "🥇");
        assert_eq!(entry(3).rank_label(), "🥉");
        assert_eq!(entry(4).rank_label(), "4");
    }

    #[test]
    fn test_created_on_parses_rfc3339() {
        let record = PlayerRecord {
            name: "ada".to_string(),
            best_score: 0,
            games_played: 0,
            created_at: "2024-03-09T18:22:01.123456+00:00".to_string(),
        };
        assert_eq!(
            record.created_on(),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );

        let broken = PlayerRecord {
            created_at: "yesterday".to_string(),
            ..record
        };
        assert_eq!(broken.created_on(), None);
    }
}
