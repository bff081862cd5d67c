//! User input utilities for interactive command-line prompts.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Prompts the user for a line of input on the same line as the prompt.
///
/// Returns `None` at end of input (Ctrl-D or a closed pipe), otherwise the
/// trimmed line.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush().context("Failed to flush stdout")?;

    read_trimmed_line(&mut io::stdin().lock())
}

/// Read one line from `reader`, trimmed; `None` at end of input.
pub fn read_trimmed_line(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .context("Failed to read user input")?;

    Ok((read > 0).then(|| input.trim().to_string()))
}

/// Prompts the user for a yes/no confirmation.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive).
/// Empty input and end of input are treated as 'no'.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    loop {
        let Some(input) = prompt_line(&format!("{prompt} (y/N) "))? else {
            return Ok(false);
        };
        match parse_confirmation(&input) {
            Some(answer) => return Ok(answer),
            None => eprintln!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}

fn parse_confirmation(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}
