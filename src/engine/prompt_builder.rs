//! Builds the text sent to the narrator. Intentionally dumb: it only
//! formats strings. No parsing, no networking, no state mutation.

use crate::model::game_state::GameState;

/// The standing instruction that opens every session transcript.
pub fn build_system_prompt(lore: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are the Dungeon Master for a fast-paced turn-based text RPG.\n\n");

    prompt.push_str("WORLD DATA:\n");
    prompt.push_str(lore);
    prompt.push_str("\n\n");

    push_rules(&mut prompt);
    push_output_contract(&mut prompt);

    prompt
}

fn push_rules(prompt: &mut String) {
    prompt.push_str("RULES:\n");
    prompt.push_str("1. The game ends at Turn 50.\n");
    prompt.push_str("2. EVERY 10th turn is a BOSS FIGHT; raise the stakes accordingly.\n");
    prompt.push_str("3. Provide exactly 4 distinct options.\n");
    prompt.push_str(
        "4. Embed stat changes as bracketed tags, e.g. \"[+10 HP]\", \"[-50 Gold]\", \
         \"[+2 ATK]\". Tags in the player's chosen option are already applied; \
         tags in your story text will be applied on top.\n",
    );
    prompt.push_str("5. KEEP IT SHORT. Max 2-3 sentences of story.\n\n");
}

fn push_output_contract(prompt: &mut String) {
    prompt.push_str("OUTPUT FORMAT (JSON ONLY):\n");
    prompt.push_str("{\n");
    prompt.push_str("    \"story\": \"Short description... [-10 HP]\",\n");
    prompt.push_str("    \"options\": [\"Opt 1 [+X HP]\", \"Opt 2\", \"Opt 3\", \"Opt 4\"]\n");
    prompt.push_str("}\n");
}

/// The per-turn user message: a stat summary, the player's raw choice,
/// and this turn's sampled flavor hooks.
pub fn build_turn_context(
    state: &GameState,
    choice: &str,
    loot_suggestions: &[String],
    location_override: Option<&str>,
) -> String {
    let mut context = String::new();

    context.push_str(&format!("Current Turn: {}\n", state.turn));
    context.push_str(&format!("HP: {}/{}\n", state.hp, state.max_hp));
    context.push_str(&format!("Gold: {}\n", state.gold));
    context.push_str(&format!("Attack Power: {}\n", state.attack));
    context.push_str(&format!("Player's Choice: {}\n", choice));

    if !loot_suggestions.is_empty() {
        context.push_str(&format!(
            "Loot you may weave in: {}\n",
            loot_suggestions.join(", ")
        ));
    }

    if let Some(location) = location_override {
        context.push_str(&format!("The next scene MUST take place at {}.\n", location));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_embeds_the_lore_verbatim() {
        let prompt = build_system_prompt("Location: A generic university campus.");
        assert!(prompt.contains("Location: A generic university campus."));
        assert!(prompt.contains("OUTPUT FORMAT (JSON ONLY):"));
        assert!(prompt.contains("exactly 4 distinct options"));
    }

    #[test]
    fn turn_context_reports_the_live_stats() {
        let mut state = GameState::new("sys");
        state.turn = 12;
        state.hp = 80;
        state.gold = 240;

        let context = build_turn_context(&state, "Climb the wall", &[], None);

        assert!(context.contains("Current Turn: 12"));
        assert!(context.contains("HP: 80/100"));
        assert!(context.contains("Gold: 240"));
        assert!(context.contains("Player's Choice: Climb the wall"));
        assert!(!context.contains("MUST take place"));
    }

    #[test]
    fn flavor_hooks_appear_when_sampled() {
        let state = GameState::new("sys");
        let loot = vec!["a pearl".to_string(), "a bell".to_string()];

        let context = build_turn_context(&state, "Go", &loot, Some("the docks"));

        assert!(context.contains("a pearl, a bell"));
        assert!(context.contains("MUST take place at the docks"));
    }
}
