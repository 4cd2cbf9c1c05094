//! Turn-based text adventure engine where the story comes from an LLM and
//! the numbers do not: health, gold, attack and the turn clock are tracked
//! deterministically here, with stat changes extracted from bracketed tags
//! embedded in the narrative text.

pub mod content;
pub mod engine;
pub mod model;

pub use content::ContentPack;
pub use engine::controller::TurnController;
pub use engine::effect_parser::parse_effects;
pub use engine::llm_client::ChatCompletionNarrator;
pub use engine::narrator::{NarrativeReply, Narrator, NarratorError};
pub use model::effect::EffectBundle;
pub use model::game_state::GameState;
pub use model::outcome::StepOutcome;
pub use model::session::{MemorySessionStore, NoSession, SessionRecord, SessionStore};
