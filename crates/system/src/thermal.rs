use socmon_core::{MonitorError, Result};
use std::path::PathBuf;

/// Reads SoC temperatures from the sysfs thermal class.
#[derive(Debug, Clone)]
pub struct ThermalReader {
    root: PathBuf,
}

impl Default for ThermalReader {
    fn default() -> Self {
        Self::new("/sys/class/thermal")
    }
}

impl ThermalReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Temperature of `thermal_zone{index}` in degrees Celsius.
    pub async fn read_zone(&self, index: u32) -> Result<f64> {
        let path = self.root.join(format!("thermal_zone{index}")).join("temp");
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| MonitorError::Acquisition(format!("{}: {e}", path.display())))?;
        parse_millidegrees(&raw)
            .ok_or_else(|| MonitorError::Acquisition(format!("{}: bad value {raw:?}", path.display())))
    }
}

/// The kernel reports millidegrees Celsius as a bare integer.
fn parse_millidegrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<i64>().ok().map(|m| m as f64 / 1000.0)
}
