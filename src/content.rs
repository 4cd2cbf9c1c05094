//! Static world data the engine is handed at process start: the lore blob,
//! the loot list derived from it, and the fixed location and reward tables.

use rand::seq::SliceRandom;
use rand::Rng;

/// Fallback world description used when no lore file is supplied.
pub const DEFAULT_LORE: &str = "\
The free city of Vallenmoor sits where the old trade road crosses the\n\
Emberwash river. Its upper terraces hold the Guild Quarter and the shuttered\n\
Academy; below the waterline lie flooded vaults nobody sane enters twice.\n\
The city watch is stretched thin and the Thieves' Registry is, officially,\n\
a myth.\n\
\n\
Notable items and loot:\n\
1. Emberwash pearl\n\
2. Guild-stamped shortsword\n\
3. Vial of lamplighter oil\n\
- Academy cipher wheel\n\
- Riverfolk lucky knucklebone\n\
* Cracked warding bell\n\
\n\
Factions:\n\
The Guild Quarter answers to the Provost. The docks answer to nobody.\n";

pub const LOCATIONS: &[&str] = &[
    "the flooded vaults beneath the waterline",
    "the shuttered Academy's reading hall",
    "the Emberwash docks at low tide",
    "the Provost's toll bridge",
    "the lamplit Guild Quarter stairs",
    "the pauper's gate at the old trade road",
];

/// Reward definitions offered on every 10th turn. Each carries its own
/// stat tags, applied the moment the player claims it.
pub const REWARDS: &[&str] = &[
    "Rune of Vigor [+30 HP]",
    "Rune of the Colossus [+60 HP] [-2 ATK]",
    "Rune of Greed [+150 Gold]",
    "Rune of Fury [+5 ATK]",
    "Rune of Midas [+300 Gold] [-15 HP]",
    "Rune of the Berserker [+9 ATK] [-20 HP]",
];

/// How many rewards a single offer presents, drawn without replacement.
pub const REWARD_OFFER_SIZE: usize = 3;

/// Menu shown before the first narrated turn.
pub const OPENING_OPTIONS: &[&str] = &[
    "Walk through the pauper's gate",
    "Ask the gate guard for rumors",
    "Head straight for the docks",
    "Browse the roadside stalls",
];

/// Fixed menu installed right after a rune is claimed.
pub const POST_REWARD_OPTIONS: &[&str] = &[
    "Press on while the rune's warmth lasts",
    "Scout the path ahead",
    "Double back and cover your tracks",
    "Take a moment to get your bearings",
];

/// Chance that a turn context forces the scene to a sampled location.
pub const LOCATION_OVERRIDE_CHANCE: f64 = 0.40;

const LOOT_SUGGESTION_COUNT: usize = 3;

#[derive(Debug, Clone)]
pub struct ContentPack {
    pub lore: String,
    pub loot: Vec<String>,
    pub locations: Vec<String>,
    pub rewards: Vec<String>,
}

impl ContentPack {
    /// Build the pack from a lore blob, deriving the loot list from its
    /// item section and taking the fixed tables as-is.
    pub fn from_lore(lore: impl Into<String>) -> Self {
        let lore = lore.into();
        let loot = extract_loot_list(&lore);
        Self {
            lore,
            loot,
            locations: LOCATIONS.iter().map(|s| s.to_string()).collect(),
            rewards: REWARDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn sample_loot(&self, rng: &mut impl Rng) -> Vec<String> {
        self.loot
            .choose_multiple(rng, LOOT_SUGGESTION_COUNT)
            .cloned()
            .collect()
    }

    pub fn sample_rewards(&self, rng: &mut impl Rng) -> Vec<String> {
        self.rewards
            .choose_multiple(rng, REWARD_OFFER_SIZE)
            .cloned()
            .collect()
    }

    /// With fixed probability, pick a location the narrator must move the
    /// scene to. `None` means the narrator chooses freely.
    pub fn sample_location(&self, rng: &mut impl Rng) -> Option<String> {
        if rng.gen_bool(LOCATION_OVERRIDE_CHANCE) {
            self.locations.choose(rng).cloned()
        } else {
            None
        }
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::from_lore(DEFAULT_LORE)
    }
}

/// Pull the lootable item names out of the lore blob.
///
/// The section starts at a header line ending in ':' that mentions items
/// or loot, and ends at the next header line or at the end of the blob.
/// Within it, numbered ("1." / "1)") and dashed/starred lines count.
pub fn extract_loot_list(lore: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut in_section = false;

    for line in lore.lines() {
        let line = line.trim();

        if is_section_header(line) {
            in_section = is_loot_header(line);
            continue;
        }

        if !in_section || line.is_empty() {
            continue;
        }

        if let Some(item) = strip_list_marker(line) {
            if !item.is_empty() {
                items.push(item.to_string());
            }
        }
    }

    items
}

fn is_section_header(line: &str) -> bool {
    line.ends_with(':') && !line.is_empty()
}

fn is_loot_header(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.contains("item") || lower.contains("loot")
}

fn strip_list_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('*')) {
        return Some(rest.trim());
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return Some(rest.trim());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_lore_yields_the_six_listed_items() {
        let loot = extract_loot_list(DEFAULT_LORE);
        assert_eq!(
            loot,
            vec![
                "Emberwash pearl",
                "Guild-stamped shortsword",
                "Vial of lamplighter oil",
                "Academy cipher wheel",
                "Riverfolk lucky knucklebone",
                "Cracked warding bell",
            ]
        );
    }

    #[test]
    fn lines_outside_the_item_section_are_not_loot() {
        let lore = "Places:\n- The docks\n\nLoot:\n- A coin\nNotes:\n- Not loot\n";
        assert_eq!(extract_loot_list(lore), vec!["A coin"]);
    }

    #[test]
    fn numbered_and_dashed_markers_both_count() {
        let lore = "Items:\n1. First\n2) Second\n- Third\n* Fourth\nplain line\n";
        assert_eq!(extract_loot_list(lore), vec!["First", "Second", "Third", "Fourth"]);
    }

    #[test]
    fn missing_item_section_means_empty_loot() {
        let lore = "A generic campus with nothing listed.";
        assert!(extract_loot_list(lore).is_empty());
    }

    #[test]
    fn reward_sampling_is_without_replacement() {
        let pack = ContentPack::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let offered = pack.sample_rewards(&mut rng);
            assert_eq!(offered.len(), REWARD_OFFER_SIZE);
            let mut unique = offered.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), REWARD_OFFER_SIZE);
            for reward in &offered {
                assert!(pack.rewards.contains(reward));
            }
        }
    }
}
