//! Parallel series of independent matches.
//!
//! Matches share no state, so a series fans them out over rayon's global
//! pool. Reports come back in seed order regardless of scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::duel::{FinishReason, Outcome};
use crate::entity::SideId;
use crate::error::ConfigError;
use crate::game::{Match, MatchConfig, MatchReport};

/// Aggregate results of a series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Matches played
    pub matches: usize,
    /// Wins per side, indexed by [`SideId::index`]
    pub wins: [usize; 2],
    /// Drawn matches
    pub draws: usize,
    /// Duels that ended by knockout
    pub knockouts: usize,
    /// Duels that ended on time
    pub timeouts: usize,
    /// Mean duel length in turns
    pub mean_turns: f64,
}

impl SeriesSummary {
    /// Tallies a set of reports.
    #[must_use]
    pub fn from_reports(reports: &[MatchReport]) -> Self {
        let mut summary = Self {
            matches: reports.len(),
            ..Self::default()
        };
        let mut turns = 0u64;
        for report in reports {
            match report.duel.outcome {
                Outcome::Winner(side) => summary.wins[side.index()] += 1,
                Outcome::Draw => summary.draws += 1,
            }
            match report.duel.reason {
                FinishReason::Knockout => summary.knockouts += 1,
                FinishReason::Timeout => summary.timeouts += 1,
            }
            turns += u64::from(report.duel.turns);
        }
        if !reports.is_empty() {
            #[allow(clippy::cast_precision_loss)]
            let mean = turns as f64 / reports.len() as f64;
            summary.mean_turns = mean;
        }
        summary
    }

    /// Fraction of matches won by `side`.
    #[must_use]
    pub fn win_rate(&self, side: SideId) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.wins[side.index()] as f64 / self.matches as f64;
        rate
    }
}

/// Plays one match per seed in parallel.
///
/// Reports are returned in the order of `seeds`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `config` is invalid; no match is played.
pub fn play_series(config: &MatchConfig, seeds: &[u64]) -> Result<Vec<MatchReport>, ConfigError> {
    config.validate()?;
    seeds
        .par_iter()
        .map(|&seed| Match::new(config.clone(), seed).map(Match::play))
        .collect()
}

/// Plays one match per seed in parallel and tallies the results.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `config` is invalid.
pub fn run_series(config: &MatchConfig, seeds: &[u64]) -> Result<SeriesSummary, ConfigError> {
    let reports = play_series(config, seeds)?;
    let summary = SeriesSummary::from_reports(&reports);
    tracing::info!(
        matches = summary.matches,
        wins_a = summary.wins[0],
        wins_b = summary.wins[1],
        draws = summary.draws,
        "series finished"
    );
    Ok(summary)
}
