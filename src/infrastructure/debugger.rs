//! Process-level debugger detection and wait-for-attach.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::DebuggerSettings;
use crate::infrastructure::traits::{Debugger, OutputTerminal};

/// Waits for an external debugger (gdb, lldb, an IDE) to attach to this process.
///
/// Attachment is detected through `TracerPid` in `/proc/self/status`; on other
/// platforms a debugger is never reported as attached.
#[derive(Debug, Clone)]
pub struct ProcessDebugger {
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl ProcessDebugger {
    pub fn new(poll_interval: Duration, timeout: Option<Duration>) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    pub fn from_settings(settings: &DebuggerSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.poll_interval_ms),
            settings.timeout_secs.map(Duration::from_secs),
        )
    }
}

impl Default for ProcessDebugger {
    fn default() -> Self {
        Self::from_settings(&DebuggerSettings::default())
    }
}

impl Debugger for ProcessDebugger {
    fn is_attached(&self) -> bool {
        tracer_pid().is_some_and(|pid| pid != 0)
    }

    fn launch(&self, terminal: &dyn OutputTerminal) -> io::Result<()> {
        let pid = std::process::id();
        terminal.write_line(&format!(
            "Waiting for debugger to attach to process {}...",
            pid
        ));
        info!(pid, "waiting for debugger");

        let started = Instant::now();
        while !self.is_attached() {
            if let Some(timeout) = self.timeout {
                if started.elapsed() >= timeout {
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("no debugger attached within {:?}", timeout),
                    ));
                }
            }
            thread::sleep(self.poll_interval);
        }

        debug!(waited = ?started.elapsed(), "debugger attached");
        terminal.write_line("Debugger attached.");
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn tracer_pid() -> Option<u32> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_tracer_pid(&status)
}

#[cfg(not(target_os = "linux"))]
fn tracer_pid() -> Option<u32> {
    None
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::TestTerminal;

    #[test]
    fn given_status_with_tracer_when_parsing_then_returns_pid() {
        let status = "Name:\tcargo\nState:\tR (running)\nTracerPid:\t4711\nUid:\t1000\n";
        assert_eq!(parse_tracer_pid(status), Some(4711));
    }

    #[test]
    fn given_status_without_tracer_when_parsing_then_zero() {
        assert_eq!(parse_tracer_pid("TracerPid:\t0\n"), Some(0));
        assert_eq!(parse_tracer_pid("Name:\tx\n"), None);
    }

    #[test]
    fn given_settings_when_building_then_durations_converted() {
        let settings = DebuggerSettings {
            poll_interval_ms: 20,
            timeout_secs: Some(3),
        };

        let debugger = ProcessDebugger::from_settings(&settings);

        assert_eq!(debugger.poll_interval, Duration::from_millis(20));
        assert_eq!(debugger.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn given_zero_timeout_when_no_debugger_then_times_out_after_prompt() {
        let debugger = ProcessDebugger::new(Duration::from_millis(1), Some(Duration::ZERO));
        let terminal = TestTerminal::new();
        if debugger.is_attached() {
            // running under a debugger, nothing to wait for
            return;
        }

        let err = debugger.launch(&terminal).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert!(terminal
            .output()
            .contains("Waiting for debugger to attach to process"));
    }
}
