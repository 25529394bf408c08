use std::collections::VecDeque;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::errors::{GenerationError, Result};
use crate::generate::LengthRange;
use crate::pattern::Pattern;

/// Totals for a finished wordlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordlistStats {
    pub lines: u64,
    pub bytes: u64,
}

/// Generate `pattern` into `path`, one candidate per line.
///
/// The parent directory is created when missing and an existing file is
/// truncated. Returns the number of lines written.
///
/// `max_count: None` means no cap. `Some(0)` is a cap of zero: the file is
/// created empty, it does not mean "unlimited".
pub fn save_wordlist(
    pattern: &Pattern,
    path: &Path,
    range: LengthRange,
    max_count: Option<u64>,
) -> Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|source| GenerationError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| GenerationError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let stats = write_wordlist(pattern, file, range, max_count)?;
    info!(
        path = %path.display(),
        lines = stats.lines,
        bytes = stats.bytes,
        "wordlist written"
    );
    Ok(stats.lines)
}

/// Stream filtered candidates into `writer`, stopping after `max_count`.
///
/// On failure the error carries how many complete lines reached `writer`.
pub fn write_wordlist<W: Write>(
    pattern: &Pattern,
    writer: W,
    range: LengthRange,
    max_count: Option<u64>,
) -> Result<WordlistStats> {
    let limit = max_count.map_or(usize::MAX, |count| {
        usize::try_from(count).unwrap_or(usize::MAX)
    });
    let mut writer = BufWriter::new(CountingWriter::new(writer));
    let mut ledger = LineLedger::default();

    for candidate in pattern.generate(range).take(limit) {
        let outcome = writer
            .write_all(candidate.as_bytes())
            .and_then(|()| writer.write_all(b"\n"));
        ledger.queue(candidate.len() as u64 + 1);
        ledger.settle(writer.get_ref().bytes_written());
        if let Err(source) = outcome {
            return Err(abandon(writer, ledger.confirmed, source));
        }
    }

    let flushed = writer.flush();
    let bytes = writer.get_ref().bytes_written();
    ledger.settle(bytes);
    if let Err(source) = flushed {
        return Err(abandon(writer, ledger.confirmed, source));
    }

    Ok(WordlistStats {
        lines: ledger.confirmed,
        bytes,
    })
}

// Unwrapping the BufWriter skips its flush-on-drop: nothing may reach the
// sink after `written` has been counted.
fn abandon<W: Write>(
    writer: BufWriter<CountingWriter<W>>,
    written: u64,
    source: std::io::Error,
) -> GenerationError {
    let _ = writer.into_parts();
    GenerationError::Write { written, source }
}

/// Tracks which queued lines have fully reached the underlying writer.
#[derive(Default)]
struct LineLedger {
    queued_bytes: u64,
    pending_ends: VecDeque<u64>,
    confirmed: u64,
}

impl LineLedger {
    fn queue(&mut self, line_len: u64) {
        self.queued_bytes += line_len;
        self.pending_ends.push_back(self.queued_bytes);
    }

    fn settle(&mut self, bytes_written: u64) {
        while self
            .pending_ends
            .front()
            .is_some_and(|&end| end <= bytes_written)
        {
            self.pending_ends.pop_front();
            self.confirmed += 1;
        }
    }
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `capacity` bytes, then fails every write.
    struct ShortWriter {
        capacity: usize,
        data: Vec<u8>,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let room = self.capacity - self.data.len();
            if room == 0 {
                return Err(std::io::Error::other("disk full"));
            }
            let size = room.min(buf.len());
            self.data.extend_from_slice(&buf[..size]);
            Ok(size)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Accepts `capacity` bytes, fails once, then accepts everything.
    struct FlakyWriter {
        capacity: usize,
        failed: bool,
        data: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let room = self.capacity.saturating_sub(self.data.len());
            if room == 0 && !self.failed {
                self.failed = true;
                return Err(std::io::Error::other("transient failure"));
            }
            let size = if self.failed { buf.len() } else { room.min(buf.len()) };
            self.data.extend_from_slice(&buf[..size]);
            Ok(size)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn buffered_lines_are_dropped_after_failure() {
        let pattern = Pattern::literal(["ab", "cd", "ef"]);
        let mut sink = FlakyWriter {
            capacity: 3,
            failed: false,
            data: Vec::new(),
        };
        let err = write_wordlist(&pattern, &mut sink, LengthRange::default(), None)
            .expect_err("transient failure must surface");
        assert!(matches!(err, GenerationError::Write { written: 1, .. }));
        assert!(sink.failed);
        assert_eq!(sink.data, b"ab\n");
    }

    #[test]
    fn writes_one_candidate_per_line() {
        let pattern = Pattern::literal(["a", "bb", "a"]);
        let mut out = Vec::new();
        let stats = write_wordlist(&pattern, &mut out, LengthRange::default(), None)
            .expect("write wordlist");
        assert_eq!(out, b"a\nbb\na\n");
        assert_eq!(stats, WordlistStats { lines: 3, bytes: 7 });
    }

    #[test]
    fn empty_pattern_writes_nothing() {
        let pattern = Pattern::literal(Vec::<String>::new());
        let mut out = Vec::new();
        let stats = write_wordlist(&pattern, &mut out, LengthRange::default(), None)
            .expect("write wordlist");
        assert!(out.is_empty());
        assert_eq!(stats.lines, 0);
    }

    #[test]
    fn zero_cap_writes_nothing() {
        let pattern = Pattern::literal(["a", "b"]);
        let mut out = Vec::new();
        let stats = write_wordlist(&pattern, &mut out, LengthRange::default(), Some(0))
            .expect("write wordlist");
        assert!(out.is_empty());
        assert_eq!(stats.lines, 0);
    }

    #[test]
    fn write_failure_reports_complete_lines() {
        let pattern = Pattern::literal(["ab", "cd", "ef"]);
        let mut sink = ShortWriter {
            capacity: 5,
            data: Vec::new(),
        };
        let err = write_wordlist(&pattern, &mut sink, LengthRange::default(), None)
            .expect_err("short writer fails");
        match err {
            GenerationError::Write { written, .. } => assert_eq!(written, 1),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sink.data, b"ab\ncd");
    }
}
