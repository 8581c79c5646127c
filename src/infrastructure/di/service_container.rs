//! Service container for dependency injection
//!
//! Wires the terminal and the debugger handed to every command handler.

use std::sync::Arc;

use crate::config::AppSettings;
use crate::infrastructure::debugger::ProcessDebugger;
use crate::infrastructure::terminal::StdTerminal;
use crate::infrastructure::traits::{Debugger, OutputTerminal};

/// Container holding the settings and I/O services of an application.
#[derive(Clone)]
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<AppSettings>,

    /// Output terminal
    pub terminal: Arc<dyn OutputTerminal>,

    /// Debugger probe and trigger
    pub debugger: Arc<dyn Debugger>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: AppSettings) -> Self {
        let terminal = Arc::new(StdTerminal::new(settings.color));
        let debugger = Arc::new(ProcessDebugger::from_settings(&settings.debugger));
        Self::with_deps(settings, terminal, debugger)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: AppSettings,
        terminal: Arc<dyn OutputTerminal>,
        debugger: Arc<dyn Debugger>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            terminal,
            debugger,
        }
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}
