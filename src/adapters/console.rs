use crate::domain::ports::Console;
use std::io::{ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Writes every line straight to stdout. Once the reader goes away
/// (`BrokenPipe`) the remaining lines are dropped silently.
#[derive(Debug, Default)]
pub struct StdoutConsole {
    closed: AtomicBool,
}

impl StdoutConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    fn write_to(&self, writer: &mut impl Write, line: &str) {
        if self.is_closed() {
            return;
        }
        match writeln!(writer, "{}", line) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                self.closed.store(true, Ordering::Relaxed);
                tracing::debug!("stdout closed, dropping further output");
            }
            Err(e) => tracing::warn!("Failed to write to stdout: {}", e),
        }
    }
}

impl Console for StdoutConsole {
    fn write_line(&self, line: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle, line);
    }
}

/// Keeps lines in memory so they can be inspected or serialized later.
#[derive(Debug, Default)]
pub struct BufferConsole {
    lines: Mutex<Vec<String>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drains the buffer.
    pub fn take_lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(mut lines) => std::mem::take(&mut *lines),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl Console for BufferConsole {
    fn write_line(&self, line: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe {
        attempts: usize,
    }

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            self.attempts += 1;
            Err(std::io::Error::new(ErrorKind::BrokenPipe, "reader gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stdout_console_stops_after_broken_pipe() {
        let console = StdoutConsole::new();
        let mut pipe = ClosedPipe { attempts: 0 };

        for line in ["one", "two", "three"] {
            console.write_to(&mut pipe, line);
        }

        assert!(console.is_closed());
        assert_eq!(pipe.attempts, 1);
    }

    #[test]
    fn test_buffer_console_collects_lines_in_order() {
        let console = BufferConsole::new();
        console.write_line("first");
        console.blank_line();
        console.write_line("second");

        assert_eq!(console.lines(), vec!["first", "", "second"]);
        assert!(console.contains("sec"));
    }

    #[test]
    fn test_take_lines_empties_buffer() {
        let console = BufferConsole::new();
        console.write_line("only");
        assert_eq!(console.take_lines(), vec!["only"]);
        assert!(console.lines().is_empty());
    }
}
