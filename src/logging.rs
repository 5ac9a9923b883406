//! Logging setup.
//!
//! Natively this is a plain fmt subscriber filtered by `RUST_LOG`. In the
//! browser each formatted line goes to the developer console instead.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `default_filter` applies when `RUST_LOG`
/// is unset, e.g. `"folio=info"`. Later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(default_filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Install the global subscriber, writing to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn init(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(default_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(console::ConsoleWriter),
        )
        .try_init();
}

fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io::{self, Write};

    use tracing_subscriber::fmt::MakeWriter;

    /// Hands out one buffer per log line.
    pub struct ConsoleWriter;

    impl<'a> MakeWriter<'a> for ConsoleWriter {
        type Writer = ConsoleLine;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleLine(Vec::new())
        }
    }

    /// Buffers a formatted line and emits it to the console when dropped.
    pub struct ConsoleLine(Vec<u8>);

    impl Write for ConsoleLine {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleLine {
        fn drop(&mut self) {
            if self.0.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.0);
            emit(line.trim_end());
        }
    }

    #[cfg(feature = "web")]
    fn emit(line: &str) {
        web_sys::console::log_1(&line.into());
    }

    #[cfg(not(feature = "web"))]
    fn emit(_line: &str) {}
}
