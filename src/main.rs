//! Terminal front-end: the smallest possible caller of the engine. Prints
//! the story and the menu, reads a selection, submits it.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use runeward::model::session::SessionStore;
use runeward::{
    ChatCompletionNarrator, ContentPack, MemorySessionStore, StepOutcome, TurnController,
};

const SESSION_KEY: &str = "local";

fn main() -> Result<()> {
    env_logger::init();

    let api_key = std::env::var("GROQ_API_KEY")
        .context("set GROQ_API_KEY to an API key for the narrator endpoint")?;

    let content = match std::fs::read_to_string("lore.txt") {
        Ok(lore) => ContentPack::from_lore(lore),
        Err(_) => ContentPack::default(),
    };

    let narrator = ChatCompletionNarrator::new(api_key)?;
    let controller = TurnController::new(narrator, content);
    let mut store = MemorySessionStore::new();

    let record = controller.start_session(&mut store, SESSION_KEY);
    println!("A new tale begins. HP {}/{}  Gold {}  ATK {}", record.state.hp, record.state.max_hp, record.state.gold, record.state.attack);
    let mut options = record.options;

    let stdin = io::stdin();
    loop {
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            break;
        }

        // A number picks from the menu; anything else is submitted as-is.
        let choice = match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => options[n - 1].clone(),
            _ => line.to_string(),
        };

        let outcome = controller.step_session(&mut store, SESSION_KEY, &choice)?;

        if let Some(record) = store.load(SESSION_KEY) {
            println!(
                "\n[Turn {}] HP {}/{}  Gold {}  ATK {}",
                record.state.turn,
                record.state.hp,
                record.state.max_hp,
                record.state.gold,
                record.state.attack
            );
        }
        println!("{}\n", outcome.text());

        if let StepOutcome::GameOver { .. } = outcome {
            break;
        }
        options = outcome.options().to_vec();
    }

    Ok(())
}
