use crate::content::{ContentPack, OPENING_OPTIONS, POST_REWARD_OPTIONS};
use crate::engine::effect_parser::parse_effects;
use crate::engine::narrator::Narrator;
use crate::engine::prompt_builder::{build_system_prompt, build_turn_context};
use crate::model::effect::EffectBundle;
use crate::model::game_state::GameState;
use crate::model::message::ChatMessage;
use crate::model::outcome::StepOutcome;
use crate::model::session::{NoSession, SessionRecord, SessionStore};

const RETRY_MESSAGE: &str = "The threads of fate tangle for a moment. Try that again.";

/// Drives one session, one action at a time.
///
/// Each call is one atomic step: either it commits a full transition or
/// it leaves the record exactly as it found it. The narrator is the only
/// thing that can block, and its failures never leave a half-applied turn
/// behind.
pub struct TurnController<N: Narrator> {
    narrator: N,
    content: ContentPack,
}

impl<N: Narrator> TurnController<N> {
    pub fn new(narrator: N, content: ContentPack) -> Self {
        Self { narrator, content }
    }

    /// Fresh session record: default stats, the system prompt seeded as
    /// `history[0]`, and the fixed opening menu.
    pub fn new_game(&self) -> SessionRecord {
        SessionRecord {
            state: GameState::new(build_system_prompt(&self.content.lore)),
            options: OPENING_OPTIONS.iter().map(|s| s.to_string()).collect(),
            awaiting_reward: false,
        }
    }

    /// Start (or restart) the game stored under `key`.
    pub fn start_session(&self, store: &mut dyn SessionStore, key: &str) -> SessionRecord {
        let record = self.new_game();
        store.save(key, record.clone());
        record
    }

    /// Store-backed variant of [`step`](Self::step). A missing session is
    /// the one hard error in the system; everything else is folded into
    /// the outcome.
    pub fn step_session(
        &self,
        store: &mut dyn SessionStore,
        key: &str,
        choice: &str,
    ) -> Result<StepOutcome, NoSession> {
        let mut record = store.load(key).ok_or_else(|| NoSession(key.to_string()))?;
        let outcome = self.step(&mut record, choice);
        store.save(key, record);
        Ok(outcome)
    }

    /// Process one chosen option against the session record.
    pub fn step(&self, record: &mut SessionRecord, choice: &str) -> StepOutcome {
        if record.state.is_game_over {
            return StepOutcome::GameOver {
                story: "This tale has already ended. Start a new game.".to_string(),
                victory: record.state.survived(),
            };
        }

        let fx = parse_effects(choice);

        // Affordability guard: a purchase the player cannot cover is a
        // no-op. Same state, same turn, same menu.
        let gold_after = record.state.gold.saturating_add(fx.gold);
        if fx.gold < 0 && gold_after < 0 {
            let shortfall = gold_after.saturating_neg();
            log::debug!("rejected '{choice}': {shortfall} gold short");
            return StepOutcome::Rejected {
                message: format!("You can't afford that - you are {shortfall} gold short."),
                options: record.options.clone(),
            };
        }

        if record.awaiting_reward {
            return self.resolve_reward(record, choice, &fx);
        }

        // Everything past this point runs on a working copy; only a
        // completed branch writes back.
        let mut state = record.state.clone();
        state.apply_effects(&fx);

        // The option's own tags can be lethal. Death resolves under the
        // terminal rule right here (no turn advance), never leaving a
        // committed record with hp at 0 but the game still on.
        if state.hp == 0 {
            state.is_game_over = true;
            record.state = state;
            record.awaiting_reward = false;
            return self.finish(&record.state, "Your own choice proves fatal.".to_string());
        }

        // Boss cadence. The turn counter only moves inside `advance`, so
        // the step taken while it reads a multiple of 10 is the reward
        // offer, and the narrator sits this one out.
        if state.turn % 10 == 0 {
            let mut rng = rand::thread_rng();
            let offered = self.content.sample_rewards(&mut rng);
            let announcement = format!(
                "Turn {}: something vast blocks your path - and ancient runes \
                 surface at your feet. Claim one before the fight.",
                state.turn
            );

            record.state = state;
            record.options = offered.clone();
            record.awaiting_reward = true;

            return StepOutcome::RewardOffer {
                announcement,
                options: offered,
            };
        }

        self.narrate_step(record, state, choice)
    }

    /// The offered menu was a rune list; the chosen text is the rune.
    fn resolve_reward(
        &self,
        record: &mut SessionRecord,
        choice: &str,
        fx: &EffectBundle,
    ) -> StepOutcome {
        record.state.runes.push(choice.to_string());
        record.state.advance(fx);
        record.awaiting_reward = false;
        record.options = POST_REWARD_OPTIONS.iter().map(|s| s.to_string()).collect();

        if record.state.is_game_over {
            return self.finish(&record.state, format!("You claim the {choice}."));
        }

        StepOutcome::RewardTaken {
            message: format!("You claim the {choice}. Its power settles into you."),
            options: record.options.clone(),
        }
    }

    /// A normal narrated turn: build the context, call the narrator, fold
    /// the story's tags, commit. On failure nothing is committed and the
    /// previous menu survives untouched.
    fn narrate_step(
        &self,
        record: &mut SessionRecord,
        mut state: GameState,
        choice: &str,
    ) -> StepOutcome {
        let (loot, location) = {
            let mut rng = rand::thread_rng();
            (
                self.content.sample_loot(&mut rng),
                self.content.sample_location(&mut rng),
            )
        };

        let context = build_turn_context(&state, choice, &loot, location.as_deref());
        state.history.push(ChatMessage::user(context));

        match self.narrator.narrate(&state.history) {
            Ok(reply) => {
                let story_fx = parse_effects(&reply.story);
                state.advance(&story_fx);
                state.history.push(ChatMessage::assistant(reply.raw));

                record.state = state;
                record.options = reply.options.clone();

                if record.state.is_game_over {
                    return self.finish(&record.state, reply.story);
                }

                StepOutcome::Story {
                    story: reply.story,
                    options: reply.options,
                }
            }
            Err(err) => {
                log::warn!("narrator call failed, keeping previous menu: {err}");
                StepOutcome::NarratorDown {
                    message: RETRY_MESSAGE.to_string(),
                    options: record.options.clone(),
                }
            }
        }
    }

    fn finish(&self, state: &GameState, story: String) -> StepOutcome {
        let epilogue = if state.survived() {
            format!("You have endured all {} turns. The city will remember you.", state.max_turn)
        } else {
            format!("Your wounds overcome you on turn {}. The tale ends here.", state.turn)
        };

        StepOutcome::GameOver {
            story: format!("{story}\n\n{epilogue}"),
            victory: state.survived(),
        }
    }
}
