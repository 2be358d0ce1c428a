//! Prompt helpers with inquire → stdin fallback.
//!
//! If `inquire` cannot drive the terminal (piped input, no TTY) the helpers
//! read plain lines from stdin. `None` means the user cancelled or input
//! ended.

use inquire::{InquireError, Select, Text};
use std::io::{self, BufRead, Write};

/// Read a trimmed line from stdin; `None` at end of input.
fn read_line() -> anyhow::Result<Option<String>> {
    let mut input = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Free-text prompt with fallback.
pub fn text(message: &str, help: Option<&str>) -> anyhow::Result<Option<String>> {
    let mut builder = Text::new(message);
    if let Some(h) = help {
        builder = builder.with_help_message(h);
    }
    match builder.prompt() {
        Ok(v) => Ok(Some(v.trim().to_string())),
        Err(e) if cancelled(&e) => Ok(None),
        Err(_) => {
            print!("{} ", message);
            io::stdout().flush()?;
            read_line()
        }
    }
}

/// Selection prompt with fallback to a numbered list.
pub fn select(message: &str, options: &[&str]) -> anyhow::Result<Option<String>> {
    let owned: Vec<String> = options.iter().map(|o| (*o).to_string()).collect();
    match Select::new(message, owned.clone()).prompt() {
        Ok(v) => Ok(Some(v)),
        Err(e) if cancelled(&e) => Ok(None),
        Err(_) => {
            println!();
            for (i, opt) in owned.iter().enumerate() {
                println!("  [{}] {}", i + 1, opt);
            }
            println!();
            loop {
                print!("{} ", message);
                io::stdout().flush()?;
                let Some(input) = read_line()? else {
                    return Ok(None);
                };
                if let Some(opt) = owned.iter().find(|o| o.eq_ignore_ascii_case(&input)) {
                    return Ok(Some(opt.clone()));
                }
                if let Ok(idx) = input.parse::<usize>() {
                    if (1..=owned.len()).contains(&idx) {
                        return Ok(Some(owned[idx - 1].clone()));
                    }
                }
                println!("  (enter a number or an option name)");
            }
        }
    }
}
