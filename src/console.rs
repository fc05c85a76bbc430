//! Human-readable output of the API operations.
//!
//! Summaries go to stdout in the binary. Tests swap in a [`Capture`] buffer
//! to assert on exactly what a person running the tool would read.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Number of characters of each chunk shown in a preview.
pub const CHUNK_PREVIEW_CHARS: usize = 150;

#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

/// Shared in-memory buffer behind a capturing [`Console`].
#[derive(Clone, Default)]
pub struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Console {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// A console whose output can be read back through the returned handle.
    pub fn capture() -> (Self, Capture) {
        let capture = Capture::default();
        let console = Self::from_writer(CaptureWriter(capture.buffer.clone()));
        (console, capture)
    }

    pub fn line(&self, text: impl AsRef<str>) {
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(sink, "{}", text.as_ref()).and_then(|_| sink.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }

    pub fn blank(&self) {
        self.line("");
    }

    /// Writes the numbered chunk previews shown under a chat answer.
    pub fn chunks(&self, chunks: &[String]) {
        self.blank();
        self.line("Source Chunks:");
        for (i, chunk) in chunks.iter().enumerate() {
            self.blank();
            self.line(format!("Chunk {}:", i + 1));
            self.line(format!("{}...", preview(chunk, CHUNK_PREVIEW_CHARS)));
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

impl Capture {
    pub fn contents(&self) -> String {
        let buffer = match self.buffer.lock() {
            Ok(buffer) => buffer,
            Err(poisoned) => poisoned.into_inner(),
        };
        String::from_utf8_lossy(&buffer).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = match self.0.lock() {
            Ok(buffer) => buffer,
            Err(poisoned) => poisoned.into_inner(),
        };
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
