pub mod effect;
pub mod game_state;
pub mod message;
pub mod outcome;
pub mod session;
