use sysinfo::System;

/// Static host facts shown in the dashboard header.
///
/// Captured once per cycle by the sampling loop so that [`crate::build`]
/// stays a pure function. Lookups that fail fall back to `"N/A"`.
#[derive(Debug, Clone, PartialEq)]
pub struct HostInfo {
    pub hostname: String,
    pub kernel: String,
    pub uptime_secs: u64,
}

impl HostInfo {
    pub fn capture() -> Self {
        Self {
            hostname: System::host_name().unwrap_or_else(|| "N/A".to_string()),
            kernel: System::kernel_version().unwrap_or_else(|| "N/A".to_string()),
            uptime_secs: System::uptime(),
        }
    }

    /// Uptime as `"Xh Ym"`, or just `"Ym"` under an hour.
    #[must_use]
    pub fn uptime(&self) -> String {
        let hours = self.uptime_secs / 3600;
        let mins = (self.uptime_secs % 3600) / 60;
        if hours > 0 {
            format!("{hours}h {mins}m")
        } else {
            format!("{mins}m")
        }
    }
}
