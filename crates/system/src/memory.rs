use socmon_core::{MonitorError, Result};
use sysinfo::System;

/// RAM usage at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryReading {
    pub used:  u64,
    pub total: u64,
}

impl MemoryReading {
    /// Used RAM as a percentage of total.
    pub fn percent(&self) -> f64 {
        self.used as f64 / self.total as f64 * 100.0
    }
}

/// Read RAM counters from an already refreshed [`System`].
pub fn read_memory(sys: &System) -> Result<MemoryReading> {
    let total = sys.total_memory();
    if total == 0 {
        return Err(MonitorError::Acquisition("total memory reported as 0".into()));
    }
    Ok(MemoryReading {
        used: sys.used_memory(),
        total,
    })
}

/// Format a byte count as a human-readable string (e.g. `"7.3 GiB"`).
pub fn format_bytes(bytes: u64) -> String {
    const GIB: u64 = 1 << 30;
    const MIB: u64 = 1 << 20;
    const KIB: u64 = 1 << 10;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
