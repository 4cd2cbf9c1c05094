use serde::{Deserialize, Serialize};

use crate::model::effect::EffectBundle;
use crate::model::message::ChatMessage;

pub const MAX_TURN: u32 = 50;
pub const STARTING_HP: i32 = 100;
pub const STARTING_GOLD: i32 = 100;
pub const STARTING_ATTACK: i32 = 10;

/// The canonical record of one player's progress.
///
/// Healing uses the ceiling-raising rule: a positive hp delta grows
/// `max_hp` by the same amount before hp moves, so `max_hp` only ever
/// increases. (The older clamp-only rule is retired; see DESIGN.md.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub turn: u32,
    pub max_turn: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub gold: i32,
    pub attack: i32,
    pub inventory: Vec<String>,
    pub runes: Vec<String>,
    pub history: Vec<ChatMessage>,
    pub is_game_over: bool,
}

impl GameState {
    /// Fresh state for a new game. `system_prompt` becomes `history[0]`.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turn: 1,
            max_turn: MAX_TURN,
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            gold: STARTING_GOLD,
            attack: STARTING_ATTACK,
            inventory: Vec::new(),
            runes: Vec::new(),
            history: vec![ChatMessage::system(system_prompt)],
            is_game_over: false,
        }
    }

    /// Fold stat deltas into the state without touching the turn counter.
    /// Used for a chosen option's own tags, where the clock must not move.
    pub fn apply_effects(&mut self, fx: &EffectBundle) {
        if fx.hp > 0 {
            self.max_hp = self.max_hp.saturating_add(fx.hp);
        }
        self.hp = self.hp.saturating_add(fx.hp).clamp(0, self.max_hp);
        self.gold = self.gold.saturating_add(fx.gold);
        self.attack = self.attack.saturating_add(fx.attack).max(1);
    }

    /// The full end-of-step mutation: fold deltas, then resolve the
    /// terminal conditions and advance the clock.
    ///
    /// Death is checked before the turn counter moves and the turn limit
    /// after, so dying on the final turn reads as a death, not a win.
    pub fn advance(&mut self, fx: &EffectBundle) {
        self.apply_effects(fx);

        if self.hp == 0 {
            self.is_game_over = true;
            return;
        }

        self.turn += 1;
        if self.turn > self.max_turn {
            self.is_game_over = true;
        }
    }

    /// True once the run ended with the hero still standing.
    pub fn survived(&self) -> bool {
        self.is_game_over && self.hp > 0
    }
}
