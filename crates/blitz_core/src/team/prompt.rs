//! Interactive decisions the roster needs from its user.
//!
//! The roster never reads stdin itself; it asks a [`ChoiceProvider`]. The
//! console implementation works over any line reader so it can be driven by
//! stdin in the binary and by in-memory buffers in tests.

use std::io::{BufRead, Write};

/// Source of the user's answers during recruit and save flows
pub trait ChoiceProvider {
    /// Pick the roster member to release when the team is full.
    /// Returns a 0-based index into `roster`, or `None` to cancel.
    fn choose_release(&mut self, roster: &[&str]) -> Option<usize>;

    /// Name for a new save file, or `None` to abandon the save.
    fn save_name(&mut self) -> Option<String>;

    /// Whether an existing save called `name` may be overwritten.
    fn confirm_overwrite(&mut self, name: &str) -> bool;
}

/// Line-based console prompts
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` (no newline) and read one trimmed line.
    /// Returns `None` at end of input.
    pub fn ask(&mut self, question: &str) -> Option<String> {
        self.say(question);
        self.read_line()
    }

    /// Read one trimmed line, `None` at end of input
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                log::error!("Failed to read console input: {}", e);
                None
            }
        }
    }

    /// Write text to the console without a trailing newline
    pub fn say(&mut self, text: &str) {
        let result = self.output.write_all(text.as_bytes()).and_then(|_| self.output.flush());
        if let Err(e) = result {
            log::error!("Failed to write console output: {}", e);
        }
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> ChoiceProvider for ConsolePrompt<R, W> {
    fn choose_release(&mut self, roster: &[&str]) -> Option<usize> {
        self.say("Team is full\nPlease select a player to release:\n");
        for (i, name) in roster.iter().enumerate() {
            self.say(&format!("{}. {}\n", i + 1, name));
        }

        loop {
            let answer = self.ask(
                "Input the number of the player you would like to release (0 to cancel): ",
            )?;
            if answer.is_empty() {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(0) => return None,
                Ok(n) if n <= roster.len() => return Some(n - 1),
                _ => self.say("Invalid selection, try again.\n"),
            }
        }
    }

    fn save_name(&mut self) -> Option<String> {
        loop {
            let name = self.ask("Enter a name for this save: ")?;
            if !name.is_empty() {
                return Some(name);
            }
            self.say("A save name is required.\n");
        }
    }

    fn confirm_overwrite(&mut self, name: &str) -> bool {
        let question = format!("A save named '{}' already exists. Overwrite? (y/n): ", name);
        loop {
            match self.ask(&question).as_deref() {
                Some("y") => return true,
                Some("n") | None => return false,
                Some(_) => continue,
            }
        }
    }
}
