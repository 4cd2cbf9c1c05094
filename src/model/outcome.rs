use serde::{Deserialize, Serialize};

/// What one submitted action produced. The caller already holds the
/// session record, so this carries only the text to show and the menu
/// to offer next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepOutcome {
    /// A normal narrated turn.
    Story {
        story: String,
        options: Vec<String>,
    },

    /// Every-10th-turn branch: pick one of the offered runes.
    RewardOffer {
        announcement: String,
        options: Vec<String>,
    },

    /// The rune was claimed and its effects applied.
    RewardTaken {
        message: String,
        options: Vec<String>,
    },

    /// The action could not be afforded; nothing changed.
    Rejected {
        message: String,
        options: Vec<String>,
    },

    /// The narrator call failed; nothing changed, same menu as before.
    NarratorDown {
        message: String,
        options: Vec<String>,
    },

    /// This step ended the game (or it was already over).
    GameOver { story: String, victory: bool },
}

impl StepOutcome {
    /// The menu the caller should present next, if the game goes on.
    pub fn options(&self) -> &[String] {
        match self {
            StepOutcome::Story { options, .. }
            | StepOutcome::RewardOffer { options, .. }
            | StepOutcome::RewardTaken { options, .. }
            | StepOutcome::Rejected { options, .. }
            | StepOutcome::NarratorDown { options, .. } => options,
            StepOutcome::GameOver { .. } => &[],
        }
    }

    pub fn text(&self) -> &str {
        match self {
            StepOutcome::Story { story, .. } | StepOutcome::GameOver { story, .. } => story,
            StepOutcome::RewardOffer { announcement, .. } => announcement,
            StepOutcome::RewardTaken { message, .. }
            | StepOutcome::Rejected { message, .. }
            | StepOutcome::NarratorDown { message, .. } => message,
        }
    }
}
