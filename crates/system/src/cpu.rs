use socmon_core::{MonitorError, Result};
use sysinfo::System;

/// Global CPU usage (0.0 – 100.0) since the previous `refresh_cpu_usage`.
///
/// The very first refresh has no baseline and reports 0.
pub fn read_cpu(sys: &System) -> Result<f64> {
    if sys.cpus().is_empty() {
        return Err(MonitorError::Acquisition("no CPUs reported".into()));
    }
    Ok(f64::from(sys.global_cpu_usage()))
}
