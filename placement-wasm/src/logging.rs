//! Routes `tracing` output from the placement core to the browser console.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

use crate::utils::{log, warn};

/// Buffers one formatted event and hands it to the console when dropped.
pub struct ConsoleWriter {
    buf: Vec<u8>,
    level: Level,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        if self.level <= Level::WARN {
            warn(line);
        } else {
            log(line);
        }
    }
}

pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            buf: Vec::new(),
            level: Level::INFO,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            buf: Vec::new(),
            level: *meta.level(),
        }
    }
}

/// Installs the console subscriber. Safe to call more than once.
pub fn init(max_level: Level) {
    // wasm32 has no wall clock for the default timer.
    let res = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        .without_time()
        .with_target(false)
        .try_init();
    if res.is_err() {
        log("tracing subscriber already installed");
    }
}
