use std::io::{self, Write};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Install a `tracing` subscriber that prints to the browser console.
///
/// Events from the shared crate (requests, load start/finish, failures) end
/// up next to the UI's own console output.
pub fn init() {
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let result = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .without_time()
        .with_target(false)
        .with_writer(ConsoleMakeWriter)
        .try_init();

    if let Err(e) = result {
        gloo::console::warn!("Logging was already initialised:", e.to_string());
    }
}

/// Hands out one `ConsoleWriter` per event, tagged with the event's level
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it to the console when dropped
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    fn line(&self) -> String {
        String::from_utf8_lossy(&self.buffer).trim_end().to_string()
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = self.line();
        if line.is_empty() {
            return;
        }
        if self.level == Level::ERROR {
            gloo::console::error!(line);
        } else if self.level == Level::WARN {
            gloo::console::warn!(line);
        } else if self.level == Level::INFO {
            gloo::console::info!(line);
        } else {
            gloo::console::debug!(line);
        }
    }
}

/// Component-tagged logging for UI code
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        tracing::info!(component, "{message}");
    }

    pub fn error_with_component(component: &str, message: &str) {
        tracing::error!(component, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_writer_buffers_until_drop() {
        let mut writer = ConsoleWriter::new(Level::INFO);
        write!(writer, "loaded ").unwrap();
        writeln!(writer, "residents count=1").unwrap();
        assert_eq!(writer.line(), "loaded residents count=1");
        // Dropping with an empty buffer must not touch the console
        writer.buffer.clear();
    }
}
