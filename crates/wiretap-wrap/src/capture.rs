//! In-memory log capture for tests.
//!
//! [`CaptureSink`] is a `MakeWriter` over a shared byte buffer, so a
//! test can install a thread-scoped subscriber and assert on the
//! formatted output. It ships in the library proper because downstream
//! crates want the same thing when testing their own wrapped calls.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Cloneable writer that appends formatted events to a shared buffer.
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().expect("capture sink poisoned")).into_owned()
    }

    /// Formatted lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn clear(&self) {
        self.buf.lock().expect("capture sink poisoned").clear();
    }
}

impl io::Write for CaptureSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .expect("capture sink poisoned")
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureSink {
    type Writer = CaptureSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install a plain-text capture subscriber on the current thread.
///
/// Returns the sink and the guard; the subscriber stays installed until
/// the guard drops. ANSI colors are off so substring assertions see the
/// raw message.
pub fn install() -> (CaptureSink, DefaultGuard) {
    let sink = CaptureSink::new();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(sink.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (sink, guard)
}
