//! Test doubles and test logging setup.

use std::env;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, Once, PoisonError};

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::{Debugger, OutputTerminal};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["tokio", "runtime"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Terminal capturing everything written to it.
#[derive(Debug, Default)]
pub struct TestTerminal {
    output: Mutex<String>,
    errors: Mutex<String>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regular output so far.
    pub fn output(&self) -> String {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Error output so far.
    pub fn errors(&self) -> String {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn reset(&self) {
        self.output.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl OutputTerminal for TestTerminal {
    fn write_line(&self, line: &str) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        output.push_str(line);
        output.push('\n');
    }

    fn write_error_line(&self, line: &str) {
        let mut errors = self.errors.lock().unwrap_or_else(PoisonError::into_inner);
        errors.push_str(line);
        errors.push('\n');
    }
}

/// Debugger double: reports a fixed attachment state and counts launches.
#[derive(Debug, Default)]
pub struct FakeDebugger {
    attached: AtomicBool,
    launches: AtomicUsize,
    fail_launch: bool,
}

impl FakeDebugger {
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn attached() -> Self {
        Self {
            attached: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Debugger whose launch always fails with `TimedOut`.
    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::default()
        }
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

impl Debugger for FakeDebugger {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn launch(&self, terminal: &dyn OutputTerminal) -> io::Result<()> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        terminal.write_line("Waiting for debugger to attach...");
        if self.fail_launch {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "no debugger attached"));
        }
        self.attached.store(true, Ordering::SeqCst);
        Ok(())
    }
}
