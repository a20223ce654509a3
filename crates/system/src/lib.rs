//! Telemetry acquisition: OS counters, sysfs thermal zones and the NPU debug
//! counter.  Every source can fail on its own; a failure only removes that
//! source's metrics from the tick's [`Readings`].

pub mod cpu;
pub mod memory;
pub mod npu;
pub mod thermal;

pub use memory::format_bytes;
pub use npu::NpuReader;
pub use thermal::ThermalReader;
pub use sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;

use socmon_config::SensorConfig;
use socmon_core::{MetricId, Readings};
use std::time::{Duration, Instant};
use sysinfo::System;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// Gathers one [`Readings`] bundle per call.
#[derive(Debug)]
pub struct Sampler {
    sys:     System,
    /// When the CPU counters were last refreshed.
    cpu_baseline: Instant,
    thermal: Option<(ThermalReader, Vec<u32>)>,
    npu:     Option<NpuReader>,
}

impl Sampler {
    pub fn new(sensors: &SensorConfig) -> Self {
        let mut sys = System::new();
        // Seed the CPU baseline so the first real sample has a delta.
        sys.refresh_cpu_usage();

        let mut sampler = Self {
            sys,
            cpu_baseline: Instant::now(),
            thermal: None,
            npu: None,
        };
        sampler.configure(sensors);
        sampler
    }

    /// Swap the sensor setup, e.g. after a config reload.
    pub fn configure(&mut self, sensors: &SensorConfig) {
        self.thermal = sensors.enable_temperature.then(|| {
            let zones = sensors.thermal_zones.iter().map(|z| z.index).collect();
            (ThermalReader::default(), zones)
        });
        self.npu = sensors
            .enable_npu
            .then(|| NpuReader::new(&sensors.npu_load_path, sensors.npu_timeout()));
    }

    /// Replace the thermal reader, keeping the configured zone list.
    pub fn with_thermal_reader(mut self, reader: ThermalReader) -> Self {
        if let Some((current, _)) = self.thermal.as_mut() {
            *current = reader;
        }
        self
    }

    /// Replace the NPU reader, if NPU sampling is enabled.
    pub fn with_npu_reader(mut self, reader: NpuReader) -> Self {
        if self.npu.is_some() {
            self.npu = Some(reader);
        }
        self
    }

    /// Run one acquisition pass.  Never fails: unavailable metrics are simply
    /// absent from the result.
    ///
    /// CPU usage is left out while the baseline is younger than
    /// [`MINIMUM_CPU_UPDATE_INTERVAL`]; a shorter window reads as ~0%.
    pub async fn sample(&mut self) -> Readings {
        let mut readings = Readings::new();

        if self.cpu_baseline.elapsed() >= MINIMUM_CPU_UPDATE_INTERVAL {
            self.sys.refresh_cpu_usage();
            self.cpu_baseline = Instant::now();
            match cpu::read_cpu(&self.sys) {
                Ok(cpu) => readings.insert(MetricId::Cpu, cpu),
                Err(e) => debug!("cpu: {e}"),
            }
        } else {
            debug!("cpu: baseline too recent, skipped");
        }

        self.sys.refresh_memory();
        match memory::read_memory(&self.sys) {
            Ok(mem) => {
                readings.insert(MetricId::Memory, mem.percent());
                readings.memory_bytes = Some((mem.used, mem.total));
            }
            Err(e) => debug!("memory: {e}"),
        }

        let (temps, npu) = tokio::join!(read_thermal(self.thermal.as_ref()), read_npu(self.npu.as_ref()));
        for (index, temp) in temps {
            readings.insert(MetricId::Thermal(index), temp);
        }
        for (core, load) in npu {
            readings.insert(MetricId::Npu(core), load);
        }

        readings
    }
}

async fn read_thermal(thermal: Option<&(ThermalReader, Vec<u32>)>) -> Vec<(u32, f64)> {
    let Some((reader, zones)) = thermal else {
        return Vec::new();
    };
    let results = futures::future::join_all(zones.iter().map(|&z| reader.read_zone(z))).await;

    zones
        .iter()
        .zip(results)
        .filter_map(|(&zone, res)| match res {
            Ok(temp) => Some((zone, temp)),
            Err(e) => {
                debug!("thermal_zone{zone}: {e}");
                None
            }
        })
        .collect()
}

async fn read_npu(npu: Option<&NpuReader>) -> Vec<(String, f64)> {
    let Some(reader) = npu else {
        return Vec::new();
    };
    reader.read_load().await.unwrap_or_else(|e| {
        debug!("npu: {e}");
        Vec::new()
    })
}

/// Control messages for the sampler task.
#[derive(Debug, Clone)]
pub enum SamplerCommand {
    /// Sample immediately; the interval keeps its phase.
    RefreshNow,
    /// Apply new sensor settings and cadence.
    Reconfigure { sensors: SensorConfig, interval: Duration },
}

/// Spawn the background Tokio task that owns the [`Sampler`].
///
/// Periodic ticks and [`SamplerCommand::RefreshNow`] share one loop, so at
/// most one acquisition pass runs at a time.  A pass that overruns the
/// interval delays the next tick instead of queueing a burst.
///
/// The task stops automatically when either channel's other end is dropped.
pub fn spawn_sampler(
    mut sampler: Sampler,
    interval: Duration,
) -> (mpsc::Receiver<Readings>, mpsc::Sender<SamplerCommand>) {
    let (tx, rx) = mpsc::channel(4);
    let (ctrl_tx, mut ctrl_rx) = mpsc::channel(8);

    tokio::spawn(async move {
        let mut ticker = new_ticker(interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                cmd = ctrl_rx.recv() => match cmd {
                    Some(SamplerCommand::RefreshNow) => {}
                    Some(SamplerCommand::Reconfigure { sensors, interval }) => {
                        sampler.configure(&sensors);
                        ticker = new_ticker(interval);
                        continue;
                    }
                    None => break,
                },
            }

            let readings = sampler.sample().await;
            debug!("sampled {} metrics", readings.len());

            if tx.send(readings).await.is_err() {
                break; // all receivers dropped
            }
        }
    });

    (rx, ctrl_tx)
}

fn new_ticker(interval: Duration) -> time::Interval {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
