//! Query intents. Coarse classification of what a query is asking for,
//! used to pick per-engine fusion weights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of query intents. `General` is both a real
/// classification outcome and the fallback when nothing else matches.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Summary,
    Definition,
    Relationship,
    Comparison,
    #[default]
    General,
}

impl Intent {
    pub const COUNT: usize = 5;

    /// All intents, in classifier priority order (`General` last).
    pub const ALL: [Intent; Self::COUNT] = [
        Intent::Summary,
        Intent::Definition,
        Intent::Relationship,
        Intent::Comparison,
        Intent::General,
    ];

    /// Stable lowercase name, as used in config tables and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Summary => "summary",
            Intent::Definition => "definition",
            Intent::Relationship => "relationship",
            Intent::Comparison => "comparison",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
            .ok_or_else(|| format!("unknown intent: {s}"))
    }
}
