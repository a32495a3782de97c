//! Shared test utilities for integration tests

use std::io;
use std::sync::{Arc, Mutex};

use fusion_query::{library, ParamSpec, QueryLibrary, RawQuery};

/// Load a query library fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> QueryLibrary {
    let path = format!("tests/test_data/{}", name);
    library::parse_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Load a parameter spec fixture from the tests/test_data directory
#[allow(dead_code)]
pub fn load_params(name: &str) -> ParamSpec {
    let path = format!("tests/test_data/{}", name);
    ParamSpec::from_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test params {}: {}", name, e))
}

/// Look up a query from the fixture library
#[allow(dead_code)]
pub fn fixture_query(path: &[&str]) -> RawQuery {
    load_fixture("queries.yaml")
        .lookup(path)
        .unwrap_or_else(|e| panic!("Failed to look up {:?}: {}", path, e))
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records every event on this thread
///
/// Returns the result of `f` and the formatted log output.
#[allow(dead_code)]
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
