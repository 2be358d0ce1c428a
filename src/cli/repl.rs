//! Shared interactive loop

use super::{describe, prompts};
use pitchcraft_core::Workflow;

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Whether the input ends the session
pub fn is_exit(input: &str) -> bool {
    EXIT_WORDS.iter().any(|w| input.trim().eq_ignore_ascii_case(w))
}

/// Prompt, run the workflow, print, repeat until an exit word.
///
/// Failures are printed and the loop continues.
pub async fn run_loop(workflow: &Workflow, title: &str, question: &str) -> anyhow::Result<()> {
    println!("{title}");
    println!("Type 'exit' or 'quit' to end the session.\n");

    loop {
        let Some(input) = prompts::text(question, None)? else {
            break;
        };
        if is_exit(&input) {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match workflow.run(&input).await {
            Ok(answer) => println!("\n{answer}\n"),
            Err(e) => {
                eprintln!("\nError: {}", describe(&e));
                eprintln!("Please try again...\n");
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
