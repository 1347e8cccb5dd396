//! Password input strategies
//!
//! Terminals get a masked prompt; redirected input is read line by line so
//! passwords can be piped in.

use std::io::{self, BufRead, Write};

/// Source of interactively entered passwords
pub trait PasswordPrompt {
    /// Show `prompt` and read one password
    ///
    /// Returns `Ok(None)` when the input is exhausted.
    fn read_password(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Masked terminal input
#[derive(Debug, Default)]
pub struct MaskedPrompt;

impl PasswordPrompt for MaskedPrompt {
    fn read_password(&mut self, prompt: &str) -> io::Result<Option<String>> {
        rpassword::prompt_password(prompt).map(Some)
    }
}

/// Plain line input from a buffered reader
#[derive(Debug)]
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> PasswordPrompt for LinePrompt<R> {
    fn read_password(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        println!();

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Pick the input strategy matching stdin
pub fn stdin_prompt() -> Box<dyn PasswordPrompt> {
    if atty::is(atty::Stream::Stdin) {
        Box::new(MaskedPrompt)
    } else {
        Box::new(LinePrompt::new(io::BufReader::new(io::stdin())))
    }
}
