//! # Browser Logging
//!
//! `tracing-subscriber` fmt layer writing to the browser console.
//! Each event is buffered and emitted as a single `console.log` line.

use std::io;
use std::sync::Once;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when none (or an invalid one) is supplied
pub const DEFAULT_DIRECTIVE: &str = "info";

fn console_log(line: &str) {
    web_sys::console::log_1(&line.into());
}

/// Buffers one formatted event and hands it to the sink on drop
pub struct ConsoleWriter {
    buffer: Vec<u8>,
    sink: fn(&str),
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buffer);
        (self.sink)(line.trim_end());
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// `MakeWriter` producing one `ConsoleWriter` per event
#[derive(Clone, Copy)]
pub struct MakeConsoleWriter {
    sink: fn(&str),
}

impl MakeConsoleWriter {
    pub fn console() -> Self {
        Self { sink: console_log }
    }
}

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            buffer: Vec::new(),
            sink: self.sink,
        }
    }
}

/// Install the console subscriber. Later calls are no-ops.
pub fn init(directive: Option<&str>) {
    let directive = directive.unwrap_or(DEFAULT_DIRECTIVE).to_string();

    INIT.call_once(|| {
        let filter = EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // No wall clock on wasm32-unknown-unknown
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(MakeConsoleWriter::console())
                    .without_time()
                    .with_target(true),
            )
            .try_init();
    });
}
