use serde::{Deserialize, Serialize};

pub use pokergrid_core::{ConditionKind, EngineConfig, EvalRules, SearchConfig};

/// On-disk puzzle description. Cards are short tokens (`As`, `10h`, `Q♦`);
/// `null` marks an empty cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleFile {
    pub name: String,
    pub rows: Vec<ConditionKind>,
    pub columns: Vec<ConditionKind>,
    pub layout: Vec<Vec<Option<String>>>,
    #[serde(default)]
    pub rules: EvalRules,
}
