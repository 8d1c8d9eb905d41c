//! Line-based prompt / answer I/O.
//!
//! [`Console`] wraps any `BufRead` + `Write` pair so the interactive flow can
//! run against the terminal in production and against in-memory buffers in
//! tests.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` (no newline), then read one answer line.
    ///
    /// The answer is returned with surrounding whitespace removed. End of
    /// input yields [`BikeshareError::InputClosed`].
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // Leave the terminal on a fresh line.
            writeln!(self.output)?;
            return Err(BikeshareError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask a yes/no question; only `yes` (any case) counts as agreement.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.ask(prompt)?.eq_ignore_ascii_case("yes"))
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Direct access to the output stream for multi-line blocks.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the console and hand back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_writes_prompt_and_trims_answer() {
        let mut c = console("  Chicago \r\n");
        let answer = c.ask("City? ").unwrap();
        assert_eq!(answer, "Chicago");
        assert_eq!(String::from_utf8(c.into_output()).unwrap(), "City? ");
    }

    #[test]
    fn test_ask_reads_one_line_at_a_time() {
        let mut c = console("jan\nmon\n");
        assert_eq!(c.ask("").unwrap(), "jan");
        assert_eq!(c.ask("").unwrap(), "mon");
    }

    #[test]
    fn test_ask_at_end_of_input() {
        let mut c = console("");
        assert!(matches!(c.ask("> "), Err(BikeshareError::InputClosed)));
    }

    #[test]
    fn test_confirm() {
        let mut c = console("yes\nYES\nno\ny\n");
        assert!(c.confirm("").unwrap());
        assert!(c.confirm("").unwrap());
        assert!(!c.confirm("").unwrap());
        assert!(!c.confirm("").unwrap());
    }

    #[test]
    fn test_say_appends_newline() {
        let mut c = console("");
        c.say("Hello").unwrap();
        c.say(42).unwrap();
        assert_eq!(String::from_utf8(c.into_output()).unwrap(), "Hello\n42\n");
    }
}
