//! Terminal collaborators
//!
//! The console implementations of the two engine seams: prompts on stderr
//! with answers read from stdin, and progress lines on stdout with a UTC
//! timestamp prefix. A shared cancellation flag (set by the Ctrl-C handler)
//! is checked before every prompt and turns into a regular cancellation.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use funcsync_reconcile::{
    Choice, DecisionMaker, OutputChannel, PickOption, ReconcileError, ReconcileResult,
};

/// Decision-maker backed by the interactive terminal.
pub struct ConsoleDecisions {
    cancel_flag: Arc<AtomicBool>,
}

impl ConsoleDecisions {
    pub fn new(cancel_flag: Arc<AtomicBool>) -> Self {
        Self { cancel_flag }
    }

    fn read_answer(&self) -> ReconcileResult<String> {
        if self.cancel_flag.load(Ordering::SeqCst) {
            return Err(ReconcileError::Cancelled);
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // EOF dismisses the prompt.
            Ok(0) => Err(ReconcileError::Cancelled),
            Ok(_) => {
                if self.cancel_flag.load(Ordering::SeqCst) {
                    return Err(ReconcileError::Cancelled);
                }
                Ok(line.trim().to_string())
            }
            Err(_) => Err(ReconcileError::Cancelled),
        }
    }
}

impl DecisionMaker for ConsoleDecisions {
    fn confirm(&mut self, message: &str) -> ReconcileResult<Choice> {
        loop {
            eprint!("{message} [y]es / [n]o / yes to [a]ll / n[e]ver / [q]uit: ");
            let _ = io::stderr().flush();
            match self.read_answer()?.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Choice::Yes),
                "n" | "no" => return Ok(Choice::No),
                "a" | "all" => return Ok(Choice::YesToAll),
                "e" | "never" => return Ok(Choice::NoToAll),
                "q" | "quit" => return Err(ReconcileError::Cancelled),
                _ => continue,
            }
        }
    }

    fn acknowledge(&mut self, message: &str) -> ReconcileResult<()> {
        eprint!("{message} [y]es to continue, anything else cancels: ");
        let _ = io::stderr().flush();
        match self.read_answer()?.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(()),
            _ => Err(ReconcileError::Cancelled),
        }
    }

    fn pick_many(&mut self, prompt: &str, options: Vec<PickOption>) -> ReconcileResult<Vec<String>> {
        eprintln!("{prompt}");
        for (index, option) in options.iter().enumerate() {
            let mark = if option.checked { 'x' } else { ' ' };
            eprintln!("  {:>2}. [{mark}] {}", index + 1, option.label);
        }

        loop {
            eprint!(
                "Numbers to select (comma-separated; Enter keeps defaults, \
                 'all', 'none', or [q]uit): "
            );
            let _ = io::stderr().flush();
            let answer = self.read_answer()?.to_ascii_lowercase();

            match answer.as_str() {
                "" => {
                    return Ok(options
                        .iter()
                        .filter(|o| o.checked)
                        .map(|o| o.label.clone())
                        .collect());
                }
                "all" => return Ok(options.iter().map(|o| o.label.clone()).collect()),
                "none" => return Ok(Vec::new()),
                "q" | "quit" => return Err(ReconcileError::Cancelled),
                _ => {}
            }

            let parsed: Option<Vec<usize>> = answer
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<usize>()
                        .ok()
                        .filter(|&n| n >= 1 && n <= options.len())
                })
                .collect();

            match parsed {
                Some(indices) => {
                    return Ok(options
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| indices.contains(&(i + 1)))
                        .map(|(_, o)| o.label.clone())
                        .collect());
                }
                None => {
                    eprintln!("Unrecognized selection.");
                    continue;
                }
            }
        }
    }
}

/// Output channel writing timestamped lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn new() -> Self {
        Self
    }
}

impl OutputChannel for ConsoleOutput {
    fn log_line(&mut self, line: &str) {
        println!("{} {line}", Utc::now().format("[%Y-%m-%d %H:%M:%S]"));
    }
}
