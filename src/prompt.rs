use crate::error::{PlacerError, PlacerResult};
use std::io::{BufRead, Write};

const CANCEL_ANSWERS: [&str; 4] = ["n", "no", "q", "quit"];

/// Line-oriented interactive I/O over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, message: &str) -> PlacerResult<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Print `message` and read one trimmed line; end of input cancels the run
    pub fn ask(&mut self, message: &str) -> PlacerResult<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PlacerError::Cancelled);
        }

        Ok(line.trim().to_string())
    }

    /// Block until the user answers; anything but an explicit no proceeds
    pub fn confirm(&mut self, message: &str) -> PlacerResult<()> {
        let answer = self.ask(message)?.to_ascii_lowercase();

        if CANCEL_ANSWERS.contains(&answer.as_str()) {
            return Err(PlacerError::Cancelled);
        }

        Ok(())
    }

    /// Direct access for rendered output such as previews and progress
    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
