//! User interaction used by the orchestrator
//!
//! [`LinePrompter`] reads whole lines from any `BufRead`, which makes it the
//! fallback for piped stdin. The cliclack variant lives in [`crate::tui`].
//!
//! Child processes inherit fd 0, so the stdin prompter must never consume
//! input past the end of the answer it is reading. [`LinePrompter::stdio`]
//! reads through a [`OneByteReader`] for that reason.

use colored::Colorize;
use std::fs::File;
use std::io::{self, BufRead, Read, Write};

/// Questions and progress messages
pub trait Prompter {
    /// Yes/no question; only an explicit yes returns true
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Free-text answer, trimmed. `default` is returned for a blank answer.
    fn input(&mut self, question: &str, default: Option<&str>) -> io::Result<String>;

    fn info(&mut self, message: &str) -> io::Result<()>;

    fn success(&mut self, message: &str) -> io::Result<()>;

    fn warning(&mut self, message: &str) -> io::Result<()>;
}

/// Answers accepted as "yes" by [`Prompter::confirm`]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Line-oriented prompter over arbitrary reader/writer pairs
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

/// `BufRead` adapter with a one-byte buffer
///
/// A line read leaves the underlying reader positioned right after the
/// newline, with nothing buffered ahead.
pub struct OneByteReader<R> {
    inner: R,
    byte: [u8; 1],
    filled: bool,
}

impl<R: Read> OneByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            byte: [0],
            filled: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for OneByteReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.filled {
            buf[0] = self.byte[0];
            self.filled = false;
            return Ok(1);
        }
        self.inner.read(&mut buf[..1])
    }
}

impl<R: Read> BufRead for OneByteReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if !self.filled {
            if self.inner.read(&mut self.byte)? == 0 {
                return Ok(&[]);
            }
            self.filled = true;
        }
        Ok(&self.byte)
    }

    fn consume(&mut self, amt: usize) {
        if amt > 0 {
            self.filled = false;
        }
    }
}

impl LinePrompter<OneByteReader<File>, io::Stdout> {
    /// Prompter over a duplicate of the stdin descriptor, read without look-ahead
    pub fn stdio() -> io::Result<Self> {
        Ok(Self::new(OneByteReader::new(stdin_file()?), io::stdout()))
    }
}

#[cfg(unix)]
fn stdin_file() -> io::Result<File> {
    use std::os::fd::AsFd;
    Ok(File::from(io::stdin().as_fd().try_clone_to_owned()?))
}

#[cfg(windows)]
fn stdin_file() -> io::Result<File> {
    use std::os::windows::io::AsHandle;
    Ok(File::from(io::stdin().as_handle().try_clone_to_owned()?))
}

#[cfg(not(any(unix, windows)))]
fn stdin_file() -> io::Result<File> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "plain prompts need a stdin descriptor",
    ))
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// End of input reads as an empty line
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.writer, "{} {} ", question, "(y/n):".dimmed())?;
        self.writer.flush()?;
        Ok(is_yes(&self.read_line()?))
    }

    fn input(&mut self, question: &str, default: Option<&str>) -> io::Result<String> {
        match default {
            Some(d) => write!(self.writer, "{} {} ", question, format!("[{}]:", d).dimmed())?,
            None => write!(self.writer, "{}: ", question)?,
        }
        self.writer.flush()?;

        let answer = self.read_line()?;
        match default {
            Some(d) if answer.is_empty() => Ok(d.to_string()),
            _ => Ok(answer),
        }
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message.cyan())
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message.green())
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{} {}", "Warning:".yellow(), message)
    }
}
