use serde::{Deserialize, Serialize};

pub const DEFAULT_SUM_TARGET: u32 = 15;
pub const DEFAULT_SEARCH_TRIALS: usize = 100;

/// Knobs for condition evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalRules {
    /// Rank-value total required by `SumEquals`.
    pub sum_target: u32,
    /// When set, `Descending` requires the values to form a contiguous run.
    /// When clear it holds for every line, which is the shipped behavior.
    pub strict_descending: bool,
}

impl Default for EvalRules {
    fn default() -> Self {
        Self {
            sum_target: DEFAULT_SUM_TARGET,
            strict_descending: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub trials: usize,
    /// Stop as soon as a layout satisfies at most this many conditions.
    pub stop_at: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_SEARCH_TRIALS,
            stop_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub seed: Option<u64>,
}
