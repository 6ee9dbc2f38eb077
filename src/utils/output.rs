//! Best-effort stdout reporting
//!
//! Reporting never takes a run down: a closed pipe (`git-fleet dir | head`)
//! loses the remaining lines but git keeps running in every repository.

use std::io::Write;
use tracing::debug;

/// Returns the cursor to column 0 and erases the rest of the line
pub const CLEAR_LINE: &str = "\r\x1b[K";

/// Writes one line and flushes it, logging instead of failing on write errors
pub fn emit_line<W: Write>(out: &mut W, line: &str) {
    if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        debug!(error = %err, "dropped output line");
    }
}

/// Shows `message` without a newline so it can be erased by [`clear_transient`]
///
/// Only writes when `interactive` is set. Returns whether anything was shown.
pub fn show_transient<W: Write>(out: &mut W, interactive: bool, message: &str) -> bool {
    if !interactive {
        return false;
    }
    // Flush errors are non-critical here
    let _ = write!(out, "{message}").and_then(|()| out.flush());
    true
}

/// Erases a line written by [`show_transient`], if one was shown
pub fn clear_transient<W: Write>(out: &mut W, shown: bool) {
    if shown {
        let _ = write!(out, "{CLEAR_LINE}").and_then(|()| out.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Behaves like stdout after the reader went away
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_emit_line_appends_newline() {
        let mut out = Vec::new();
        emit_line(&mut out, "Repositories: 2");
        assert_eq!(out, b"Repositories: 2\n");
    }

    #[test]
    fn test_emit_line_survives_closed_pipe() {
        emit_line(&mut BrokenPipe, "Repo: /f/a Status: 0");
        show_transient(&mut BrokenPipe, true, "scanning");
        clear_transient(&mut BrokenPipe, true);
    }

    #[test]
    fn test_transient_line_is_skipped_when_not_interactive() {
        let mut out = Vec::new();
        let shown = show_transient(&mut out, false, "scanning");
        clear_transient(&mut out, shown);
        emit_line(&mut out, "Repositories: 1");
        assert_eq!(out, b"Repositories: 1\n");
    }

    #[test]
    fn test_transient_line_is_erased_before_next_line() {
        let mut out = Vec::new();
        let shown = show_transient(&mut out, true, "scanning");
        clear_transient(&mut out, shown);
        emit_line(&mut out, "Repositories: 1");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "scanning\r\x1b[KRepositories: 1\n"
        );
    }
}
