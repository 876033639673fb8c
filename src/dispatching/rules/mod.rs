//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Time-based**: SPT, LPT
//! - **Work-based**: SRT, MWR, MOR
//! - **Queue**: FIFO
//! - **Stochastic**: RANDOM
//!
//! # Score Convention
//! All rules return lower scores for higher priority operations.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{RuleScore, SchedulingContext};
use crate::error::SchedulingError;
use crate::models::ReadyOperation;

/// Spacing between per-rule seeds derived from one top-level seed.
const RULE_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// The closed set of dispatching rules.
///
/// Declaration order is the enumeration order used for tie-breaking
/// between rules with equal makespan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DispatchRule {
    /// Shortest Processing Time.
    #[serde(rename = "SPT")]
    Spt,
    /// Longest Processing Time.
    #[serde(rename = "LPT")]
    Lpt,
    /// Shortest Remaining (work) Time.
    #[serde(rename = "SRT")]
    Srt,
    /// Most Work Remaining.
    #[serde(rename = "MWR")]
    Mwr,
    /// First In First Out (static job order).
    #[serde(rename = "FIFO")]
    Fifo,
    /// Most Operations Remaining.
    #[serde(rename = "MOR")]
    Mor,
    /// Seeded pseudo-random priority.
    #[serde(rename = "RANDOM")]
    Random,
}

impl DispatchRule {
    /// Every rule, in enumeration order.
    pub const ALL: [DispatchRule; 7] = [
        DispatchRule::Spt,
        DispatchRule::Lpt,
        DispatchRule::Srt,
        DispatchRule::Mwr,
        DispatchRule::Fifo,
        DispatchRule::Mor,
        DispatchRule::Random,
    ];

    /// Rule name (e.g., "SPT").
    pub fn name(&self) -> &'static str {
        match self {
            DispatchRule::Spt => "SPT",
            DispatchRule::Lpt => "LPT",
            DispatchRule::Srt => "SRT",
            DispatchRule::Mwr => "MWR",
            DispatchRule::Fifo => "FIFO",
            DispatchRule::Mor => "MOR",
            DispatchRule::Random => "RANDOM",
        }
    }

    /// Rule description.
    pub fn description(&self) -> &'static str {
        match self {
            DispatchRule::Spt => "Shortest Processing Time",
            DispatchRule::Lpt => "Longest Processing Time",
            DispatchRule::Srt => "Shortest Remaining Time",
            DispatchRule::Mwr => "Most Work Remaining",
            DispatchRule::Fifo => "First In First Out",
            DispatchRule::Mor => "Most Operations Remaining",
            DispatchRule::Random => "Random Priority",
        }
    }

    /// Position in [`DispatchRule::ALL`].
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether the rule ignores the random source.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, DispatchRule::Random)
    }

    /// Evaluates the priority of a ready operation.
    ///
    /// Returns a score where lower = higher priority. Only
    /// [`DispatchRule::Random`] draws from the context's random source.
    pub fn evaluate(&self, op: &ReadyOperation, context: &mut SchedulingContext) -> RuleScore {
        match self {
            DispatchRule::Spt => op.duration as f64,
            DispatchRule::Lpt => -(op.duration as f64),
            DispatchRule::Srt => op.remaining_work as f64,
            DispatchRule::Mwr => -(op.remaining_work as f64),
            DispatchRule::Fifo => op.job() as f64,
            DispatchRule::Mor => -(op.operations_remaining as f64),
            DispatchRule::Random => context.random_priority(),
        }
    }
}

/// Derives the seed one rule's run uses from a top-level search seed.
///
/// Depends only on the rule, never on its position in a rule list.
pub fn rule_seed(base_seed: u64, rule: DispatchRule) -> u64 {
    base_seed.wrapping_add(RULE_SEED_STRIDE.wrapping_mul(rule.index() as u64 + 1))
}

impl fmt::Display for DispatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DispatchRule {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DispatchRule::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchedulingError::UnknownRule(s.to_string()))
    }
}
