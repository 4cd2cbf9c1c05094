use serde::{Deserialize, Serialize};

/// Aggregated stat deltas parsed from one piece of text.
/// All three buckets are always present; a missing tag is simply zero.
/// This is a transient value, consumed once per turn and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBundle {
    pub hp: i32,
    pub gold: i32,
    pub attack: i32,
}

impl EffectBundle {
    pub fn is_empty(&self) -> bool {
        self.hp == 0 && self.gold == 0 && self.attack == 0
    }
}
