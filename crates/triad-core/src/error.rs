//! Error types for configuration and match setup.
//!
//! Runtime battle logic never fails: illegal actions are ignored and an
//! unreachable goal is an empty path. The only fallible surface is building a
//! match from configuration.

use thicket::GridError;
use thiserror::Error;

/// Errors raised while validating configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Grid configuration was rejected.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),

    /// The grid is too small to place trainers and spawn cells.
    #[error("grid must be at least {min}x{min} for a match, got {width}x{height}")]
    GridTooSmall {
        /// Configured width
        width: u32,
        /// Configured height
        height: u32,
        /// Minimum side length
        min: u32,
    },

    /// Search depth must be at least one ply.
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u32),

    /// A damage multiplier was not a finite positive number.
    #[error("{name} must be finite and positive, got {value}")]
    InvalidMultiplier {
        /// Which multiplier
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Variance bounds were not a finite, positive, ordered range.
    #[error("variance range [{low}, {high}] is invalid")]
    InvalidVariance {
        /// Lower bound
        low: f64,
        /// Upper bound
        high: f64,
    },

    /// A potion had a non-positive heal amount or zero price.
    #[error("potion {tier} must heal a positive amount for a non-zero price")]
    InvalidPotion {
        /// Offending tier
        tier: String,
    },

    /// A duration or speed was not finite and positive.
    #[error("{name} must be finite and positive, got {value}")]
    InvalidTiming {
        /// Which setting
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A roster entry was malformed.
    #[error("invalid roster for {side}: {reason}")]
    InvalidRoster {
        /// Side name
        side: String,
        /// What was wrong
        reason: String,
    },
}
