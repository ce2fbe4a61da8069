//! Terminal front for a human seat.
//!
//! Reads [`DecisionPrompt`]s off the agent's channel, prints the options and
//! answers with the number typed on stdin.

use doomspire_runtime::DecisionPrompt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub async fn serve(mut prompts: mpsc::Receiver<DecisionPrompt>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(prompt) = prompts.recv().await {
        println!();
        println!("{}", prompt.context.description);
        for (index, option) in prompt.context.options.iter().enumerate() {
            println!("  [{}] {}", index + 1, option.description);
        }

        let picked = loop {
            println!("> ");
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                // stdin closed: dropping the prompt makes the engine pick at random
                _ => return,
            };
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=prompt.context.options.len()).contains(&n) => break n - 1,
                _ => println!("Enter a number between 1 and {}", prompt.context.options.len()),
            }
        };

        let id = prompt.context.options[picked].id.clone();
        if !prompt.answer(id) {
            tracing::warn!("engine stopped waiting for an answer");
        }
    }
}
