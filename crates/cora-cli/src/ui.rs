//! UI utilities for the CLI

use std::io::{self, IsTerminal, Write};

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};

use cora_core::Result;

/// Display the startup banner.
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(64, terminal_width.saturating_sub(4));

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.cyan());
    println!("{}", empty_line.cyan());

    let title = "cora — course advisor";
    let title_line = format!(
        "│  {}{}│",
        title.cyan().bold(),
        " ".repeat(banner_width.saturating_sub(title.chars().count() + 4))
    );
    println!("{}", title_line);
    println!("{}", empty_line.cyan());

    let feature_lines = [
        "Ask about the programme catalogue in plain language:",
        "",
        "• which courses fit your background and goals",
        "• fees, intake dates and entry requirements",
        "  (checked live against the programme pages)",
        "",
        "Type 'courses' to list the catalogue, 'help' for commands.",
    ];

    for line in feature_lines {
        if line.is_empty() {
            println!("{}", empty_line.cyan());
        } else {
            let content = format!(
                "│  {}{}│",
                line,
                " ".repeat(banner_width.saturating_sub(line.chars().count() + 4))
            );
            println!("{}", content.cyan());
        }
    }

    println!("{}", empty_line.cyan());
    println!("{}", bottom_border.cyan());
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!(
        "  {} - ask anything about the programmes in plain language",
        "question".green()
    );
    println!("  {} - list every programme in the catalogue", "courses".green());
    println!("  {} - show this help message", "help".green());
    println!("  {} - exit the advisor", "exit/quit".green());
    println!();
    println!("{}", "Examples:".bold());
    println!("  which course suits a project manager moving into BIM?");
    println!("  what are the fees for the data analytics diploma?");
    println!("  when is the next intake for construction management?");
}

/// Read one line of input, with ↑/↓ history navigation when attached to a
/// terminal and a plain read when stdin is piped. Returns `None` once piped
/// input is exhausted.
pub fn handle_input_with_history(history: &mut Vec<String>) -> Result<Option<String>> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(Some(input));
    }

    enable_raw_mode()?;
    let mut input = String::new();
    let mut history_index: Option<usize> = None;

    print!("{} ", "cora>".cyan().bold());
    io::stdout().flush()?;

    loop {
        if let Event::Key(key_event) = event::read()? {
            match key_event.code {
                KeyCode::Enter => {
                    disable_raw_mode()?;
                    println!();
                    if !input.is_empty() {
                        history.push(input.clone());
                    }
                    return Ok(Some(input));
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    redraw(&input)?;
                }
                KeyCode::Backspace => {
                    if input.pop().is_some() {
                        redraw(&input)?;
                    }
                }
                KeyCode::Up => {
                    if !history.is_empty() {
                        let new_index = match history_index {
                            None => history.len() - 1,
                            Some(idx) if idx > 0 => idx - 1,
                            Some(idx) => idx,
                        };
                        history_index = Some(new_index);
                        input = history[new_index].clone();
                        redraw(&input)?;
                    }
                }
                KeyCode::Down => {
                    if let Some(idx) = history_index {
                        if idx + 1 < history.len() {
                            history_index = Some(idx + 1);
                            input = history[idx + 1].clone();
                        } else {
                            history_index = None;
                            input.clear();
                        }
                        redraw(&input)?;
                    }
                }
                KeyCode::Esc => {
                    disable_raw_mode()?;
                    println!();
                    return Ok(Some(String::new()));
                }
                _ => {}
            }
        }
    }
}

fn redraw(input: &str) -> Result<()> {
    // Overwrite the line with padding to clear shorter redraws.
    print!(
        "\r{} {}{}\r{} {}",
        "cora>".cyan().bold(),
        input,
        "  ",
        "cora>".cyan().bold(),
        input
    );
    io::stdout().flush()?;
    Ok(())
}
