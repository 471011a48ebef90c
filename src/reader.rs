use std::io::BufRead;

use anyhow::{Context, Result};
use reedline::{Reedline, Signal};

use crate::prompt::ShellPrompt;

/// Source of raw input lines. `Ok(None)` means end of input.
pub trait LineReader {
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Line editor used when stdin is a terminal.
pub struct InteractiveReader {
    editor: Reedline,
    prompt: ShellPrompt,
}

impl InteractiveReader {
    pub fn new(editor: Reedline, prompt: ShellPrompt) -> Self {
        Self { editor, prompt }
    }
}

impl LineReader for InteractiveReader {
    fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt).context("reading from terminal")? {
            Signal::Success(buf) => Ok(Some(buf)),
            Signal::CtrlD => Ok(None),
            // Ctrl-C abandons the line being edited.
            _ => Ok(Some(String::new())),
        }
    }
}

/// Plain line reader for scripted input. Prints no prompt.
pub struct PipedReader<R> {
    input: R,
}

impl<R: BufRead> PipedReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> LineReader for PipedReader<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.input.read_until(b'\n', &mut buf).context("reading from stdin")?;
        if n == 0 {
            return Ok(None);
        }
        // Bytes that are not UTF-8 become U+FFFD instead of ending the session.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_piped_reader_yields_lines_then_eof() {
        let mut reader = PipedReader::new(Cursor::new("E one\n\nL\n"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("E one\n"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("\n"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("L\n"));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn test_piped_reader_tolerates_invalid_utf8() {
        let mut reader = PipedReader::new(Cursor::new(&b"E caf\xe9\nE after\n"[..]));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("E caf\u{fffd}\n"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("E after\n"));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn test_piped_reader_last_line_without_newline() {
        let mut reader = PipedReader::new(Cursor::new("Q"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("Q"));
        assert_eq!(reader.read_line().unwrap(), None);
    }
}
