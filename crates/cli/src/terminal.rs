//! Text interaction surface
//!
//! Everything the operator sees or types goes through [`Terminal`]. Input
//! is trimmed; end of input is reported as `UnexpectedEof`.

use std::io::{self, BufRead, Write};

pub trait Terminal {
    /// Show `label`, read one line, return it trimmed
    fn prompt(&mut self, label: &str) -> io::Result<String>;

    /// Print one block of text
    fn display(&mut self, text: &str) -> io::Result<()>;

    /// Wait for Enter
    fn pause(&mut self) -> io::Result<()> {
        self.prompt("\nPress Enter to continue...").map(|_| ())
    }
}

/// Line-based terminal over any reader/writer pair
pub struct StdTerminal<R, W> {
    reader: R,
    writer: W,
}

impl StdTerminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdTerminal<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Terminal for StdTerminal<R, W> {
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.writer, "{}", label)?;
        self.writer.flush()?;

        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(input.trim().to_string())
    }

    fn display(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }
}

/// Terminal fed from a fixed list of answers; records everything shown.
#[cfg(test)]
pub struct ScriptedTerminal {
    inputs: std::collections::VecDeque<String>,
    transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedTerminal {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything displayed so far, one entry per line
    pub fn lines(&self) -> &[String] {
        &self.transcript
    }

    pub fn contains(&self, text: &str) -> bool {
        self.transcript.iter().any(|l| l.contains(text))
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
impl Terminal for ScriptedTerminal {
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        self.transcript.push(label.to_string());
        self.inputs
            .pop_front()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn display(&mut self, text: &str) -> io::Result<()> {
        self.transcript.extend(text.lines().map(str::to_string));
        Ok(())
    }

    fn pause(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_terminal_trims_and_echoes_label() {
        let input = io::Cursor::new("  a123  \n");
        let mut output = Vec::new();
        let answer = {
            let mut term = StdTerminal::new(input, &mut output);
            let answer = term.prompt("Enter ID: ").unwrap();
            term.display("done").unwrap();
            answer
        };

        assert_eq!(answer, "a123");
        assert_eq!(String::from_utf8(output).unwrap(), "Enter ID: done\n");
    }

    #[test]
    fn test_std_terminal_eof() {
        let mut output = Vec::new();
        let mut term = StdTerminal::new(io::Cursor::new(""), &mut output);
        let err = term.prompt("Choose an option: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_scripted_terminal_runs_out() {
        let mut term = ScriptedTerminal::new(["1"]);
        assert_eq!(term.prompt("a").unwrap(), "1");
        assert!(term.prompt("b").is_err());
        assert_eq!(term.remaining_inputs(), 0);
    }
}
