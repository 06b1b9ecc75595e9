//! Console output for the validation report.
//!
//! Terminal width and the output sink are carried by [`Console`] and passed
//! explicitly to whatever prints, instead of being looked up globally.

mod path;

pub use path::{shorten_path, shorten_path_with, ELLIPSIS};

use std::io::{self, Write};

use tracing::debug;

/// Width used when the terminal size cannot be queried.
pub const FALLBACK_WIDTH: usize = 80;

/// Terminal width plus a write sink.
pub struct Console<W> {
    width: usize,
    out: W,
    write_errors: usize,
}

impl Console<io::Stdout> {
    /// Console on stdout sized to the current terminal.
    pub fn stdout() -> Self {
        Self::new(terminal_width(), io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(width: usize, out: W) -> Self {
        Self {
            width,
            out,
            write_errors: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Failed writes so far. The report keeps going after a failed write.
    pub fn write_errors(&self) -> usize {
        self.write_errors
    }

    /// Write without a line break.
    pub fn print(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush());
        self.record(result);
    }

    pub fn println(&mut self, text: &str) {
        let result = writeln!(self.out, "{}", text);
        self.record(result);
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.write_errors += 1;
            debug!("Console write failed: {}", e);
        }
    }

    /// A line of dashes spanning the terminal.
    pub fn rule(&mut self) {
        let line = "-".repeat(self.width);
        self.println(&line);
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Current terminal width, or [`FALLBACK_WIDTH`] when not attached to one.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols as usize,
        _ => FALLBACK_WIDTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_and_rule() {
        let mut console = Console::new(10, Vec::new());
        console.print(" - Tables: ");
        console.println("Missing!");
        console.rule();

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, " - Tables: Missing!\n----------\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_are_counted() {
        let mut console = Console::new(10, BrokenPipe);
        console.print(" - Database:   ");
        console.println("Failed.");
        console.rule();
        assert_eq!(console.write_errors(), 3);

        let mut console = Console::new(10, Vec::new());
        console.println("ok");
        assert_eq!(console.write_errors(), 0);
    }

    #[test]
    fn test_terminal_width_is_positive() {
        assert!(terminal_width() > 0);
    }
}
