//! Subscriber setup for the `tracing` events emitted by every effect.

const DEFAULT_FILTER: &str = "info,vitrine_effects=debug";

/// Install the global subscriber. Calling it twice is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(DEFAULT_FILTER)
        .try_init();
}

/// Install the global subscriber, writing to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(DEFAULT_FILTER)
        .with_ansi(false)
        .without_time()
        .with_writer(console::ConsoleMakeWriter)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;
    use tracing_subscriber::fmt::MakeWriter;

    pub(super) struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter(Vec::with_capacity(128))
        }
    }

    /// Buffers one formatted event and hands it to `console.log` on drop.
    pub(super) struct ConsoleWriter(Vec<u8>);

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.0);
            let line = line.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_twice() {
        super::init();
        super::init();
        tracing::info!("subscriber installed");
    }
}
