use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use vitals_config::MonitorConfig;
use vitals_core::{MetricSample, Result, Severity, VitalsError};

use crate::Collector;

const CHECKUPDATES_BIN: &str = "checkupdates";
const ICON: &str = "󰏔";
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Pending package count via the `checkupdates` probe (pacman hosts).
///
/// A non-zero exit means "no updates found" rather than failure; the probe
/// binary being absent entirely makes `available()` false so this collector
/// is never activated on other distros.
pub struct UpdatesCollector {
    config: Arc<MonitorConfig>,
    bin: String,
}

impl UpdatesCollector {
    pub fn new(config: Arc<MonitorConfig>) -> Self {
        Self {
            config,
            bin: CHECKUPDATES_BIN.to_string(),
        }
    }

    #[cfg(test)]
    fn with_binary(config: Arc<MonitorConfig>, bin: impl Into<String>) -> Self {
        Self {
            config,
            bin: bin.into(),
        }
    }

    fn try_collect(&self) -> Result<MetricSample> {
        let output = run_with_timeout(Command::new(&self.bin), PROBE_TIMEOUT)?;
        let count = if output.success {
            output.stdout.lines().filter(|l| !l.trim().is_empty()).count()
        } else {
            0
        };

        if count == 0 {
            return Ok(MetricSample::new(
                "Updates",
                "Up to date",
                ICON,
                Severity::Normal,
                None,
                "",
            ));
        }

        let severity = Severity::from_value(count as f64, self.config.update_thresholds);
        Ok(MetricSample::new(
            "Updates",
            format!("{count} pending"),
            ICON,
            severity,
            None,
            "",
        ))
    }
}

impl Collector for UpdatesCollector {
    fn name(&self) -> &'static str {
        "updates"
    }

    fn available(&self) -> bool {
        binary_on_path(&self.bin)
    }

    fn collect(&mut self) -> MetricSample {
        self.try_collect().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "updates collection failed");
            MetricSample::error("Updates", ICON)
        })
    }
}

/// Side-effect-free availability probe: look for the executable on `$PATH`.
fn binary_on_path(bin: &str) -> bool {
    let Some(path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path).any(|dir| dir.join(bin).is_file())
}

struct ProbeOutput {
    success: bool,
    stdout: String,
}

/// Run a command with a kill-on-deadline timeout, capturing stdout.
fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<ProbeOutput> {
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()?;

    // Drain stdout on its own thread while we poll for exit: a probe that
    // writes more than the OS pipe buffer would otherwise block on a full
    // pipe and never exit.
    let mut pipe = child.stdout.take();
    let reader = std::thread::spawn(move || {
        let mut stdout = String::new();
        if let Some(pipe) = pipe.as_mut() {
            let _ = pipe.read_to_string(&mut stdout);
        }
        stdout
    });

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait()? {
            Some(status) => {
                let stdout = reader.join().unwrap_or_default();
                return Ok(ProbeOutput {
                    success: status.success(),
                    stdout,
                });
            }
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                // The kill closed the pipe; the reader finishes on EOF.
                let _ = reader.join();
                return Err(VitalsError::Collector("update probe timed out".into()));
            }
            None => std::thread::sleep(POLL_INTERVAL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector_with(bin: &str) -> UpdatesCollector {
        UpdatesCollector::with_binary(Arc::new(MonitorConfig::default()), bin)
    }

    #[test]
    fn absent_binary_is_unavailable() {
        assert!(!binary_on_path("checkupdates-that-does-not-exist"));
        assert!(!collector_with("checkupdates-that-does-not-exist").available());
    }

    #[test]
    fn common_binary_is_found_on_path() {
        assert!(binary_on_path("sh"));
    }

    #[test]
    fn missing_binary_yields_error_sentinel() {
        let sample = collector_with("checkupdates-that-does-not-exist").collect();
        assert_eq!(sample.value, "Error");
        assert_eq!(sample.severity, Severity::Critical);
    }

    #[test]
    fn nonzero_exit_counts_as_up_to_date() {
        // `false` exits 1 with no output — the "no updates" convention.
        let sample = collector_with("false").collect();
        assert_eq!(sample.value, "Up to date");
        assert_eq!(sample.severity, Severity::Normal);
    }

    #[test]
    fn captures_stdout_lines() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "printf 'pkg-a 1.0 -> 1.1\\npkg-b 2.0 -> 2.1\\n'"]);
        let output = run_with_timeout(cmd, Duration::from_secs(5)).unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.lines().count(), 2);
    }

    #[test]
    fn output_beyond_the_pipe_buffer_does_not_stall() {
        // ~200 KB of pending-update lines, well past the ~64 KB pipe buffer.
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "yes 'extra/pkg 1.0.0-1 -> 1.0.1-1' | head -c 200000"]);
        let output = run_with_timeout(cmd, Duration::from_secs(3)).unwrap();
        assert!(output.success);
        assert!(output.stdout.len() >= 200_000, "got {} bytes", output.stdout.len());
    }

    #[test]
    fn slow_probe_times_out() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");
        let result = run_with_timeout(cmd, Duration::from_millis(100));
        assert!(result.is_err());
    }
}
