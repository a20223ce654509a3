use socmon_core::{MonitorError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Reads per-core NPU load from the rknpu debugfs counter.
///
/// Debugfs is root-only, so the file is read through `sudo -n cat`.  `-n`
/// keeps sudo from prompting for a password on the dashboard's terminal; an
/// unconfigured sudoers entry simply fails the read.
#[derive(Debug, Clone)]
pub struct NpuReader {
    program: String,
    args:    Vec<String>,
    timeout: Duration,
}

impl NpuReader {
    pub fn new(load_path: &str, timeout: Duration) -> Self {
        Self {
            program: "sudo".into(),
            args:    vec!["-n".into(), "cat".into(), load_path.into()],
            timeout,
        }
    }

    /// Run an arbitrary command instead of `sudo -n cat <path>`.
    pub fn with_command(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Per-core loads in the order the driver reports them.
    pub async fn read_load(&self) -> Result<Vec<(String, f64)>> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| {
                MonitorError::Acquisition(format!("{} timed out after {:?}", self.program, self.timeout))
            })?
            .map_err(|e| MonitorError::Acquisition(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let err = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(MonitorError::Acquisition(if err.is_empty() {
                format!("{} failed with {}", self.program, output.status)
            } else {
                err
            }));
        }

        parse_load(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `NPU load:  Core0:  12%, Core1:  0%, Core2:  0%,`.
pub fn parse_load(output: &str) -> Result<Vec<(String, f64)>> {
    let malformed = || MonitorError::Acquisition(format!("unexpected NPU output: {:?}", output.trim()));

    let (_, cores) = output.split_once("NPU load:").ok_or_else(malformed)?;

    let mut loads = Vec::new();
    for part in cores.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, load) = part.split_once(':').ok_or_else(malformed)?;
        let load = load
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed())?;
        loads.push((name.trim().to_string(), load));
    }

    if loads.is_empty() {
        return Err(malformed());
    }
    Ok(loads)
}
