//! Simulated water-heater temperature readings.
//!
//! Stands in for the building's sensor feed: a 15-minute grid of tank
//! temperatures for a small office, with a slow reheating trend, sensor noise,
//! an overnight idle dip and a few short usage draws.

use chrono::{DateTime, Duration, TimeDelta, TimeZone, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::debug;

use crate::error::{ForecastError, ForecastResult};

/// Minutes between two simulated readings.
pub const SAMPLE_INTERVAL_MINUTES: i64 = 15;

/// One simulated reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
}

/// Shape of the simulated signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorProfile {
    /// Standby setpoint in °C
    pub base_temperature: f64,
    /// Total rise across the window in °C
    pub trend_rise: f64,
    /// Standard deviation of sensor noise in °C
    pub noise_std: f64,
    /// Readings before this local hour are idle
    pub idle_until_hour: u32,
    /// Drop applied to idle readings in °C
    pub idle_drop: f64,
    /// Sample indices where a usage draw starts
    pub draw_starts: Vec<usize>,
    /// Number of samples a draw lasts
    pub draw_length: usize,
    /// Deepest point of a draw in °C
    pub draw_depth: f64,
    /// Safety clamp
    pub min_temperature: f64,
    pub max_temperature: f64,
}

impl Default for SimulatorProfile {
    fn default() -> Self {
        Self {
            base_temperature: 58.0,
            trend_rise: 4.5,
            noise_std: 0.3,
            idle_until_hour: 6,
            idle_drop: 2.0,
            // Roughly 08:00, 12:30 and 15:00 into a day-long window
            draw_starts: vec![32, 50, 60],
            draw_length: 3,
            draw_depth: 5.0,
            min_temperature: 45.0,
            max_temperature: 75.0,
        }
    }
}

pub struct WaterHeaterSimulator {
    profile: SimulatorProfile,
    noise: Normal<f64>,
    rng: StdRng,
}

fn noise_distribution(profile: &SimulatorProfile) -> ForecastResult<Normal<f64>> {
    Normal::new(0.0, profile.noise_std).map_err(|e| ForecastError::InvalidParameter {
        name: "noise_std",
        reason: format!("{} ({})", e, profile.noise_std),
    })
}

impl WaterHeaterSimulator {
    /// Simulator seeded from the OS.
    pub fn new(profile: SimulatorProfile) -> ForecastResult<Self> {
        Ok(Self {
            noise: noise_distribution(&profile)?,
            profile,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Reproducible simulator.
    pub fn with_seed(profile: SimulatorProfile, seed: u64) -> ForecastResult<Self> {
        Ok(Self {
            noise: noise_distribution(&profile)?,
            profile,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn profile(&self) -> &SimulatorProfile {
        &self.profile
    }

    /// Generates `intervals` readings, the last one at `end`. The idle
    /// window is evaluated on wall-clock hours in `tz`.
    ///
    /// Fails when the first reading would fall outside the representable
    /// time range.
    pub fn generate<Tz: TimeZone>(
        &mut self,
        end: DateTime<Utc>,
        intervals: usize,
        tz: &Tz,
    ) -> ForecastResult<Vec<SensorSample>> {
        let profile = &self.profile;
        let step = Duration::minutes(SAMPLE_INTERVAL_MINUTES);
        let first = i64::try_from(intervals.saturating_sub(1))
            .ok()
            .and_then(|back| back.checked_mul(SAMPLE_INTERVAL_MINUTES))
            .and_then(TimeDelta::try_minutes)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| ForecastError::InvalidParameter {
                name: "intervals",
                reason: format!("{} readings before {} are out of range", intervals, end),
            })?;

        let mut samples = Vec::with_capacity(intervals);
        let mut timestamp = first;
        for i in 0..intervals {
            let trend = linspace_at(0.0, profile.trend_rise, intervals, i);
            let noise = self.rng.sample(self.noise);
            let mut temperature = profile.base_temperature + trend + noise;

            if timestamp.with_timezone(tz).hour() < profile.idle_until_hour {
                temperature -= profile.idle_drop;
            }

            samples.push(SensorSample {
                timestamp,
                temperature,
            });
            timestamp += step;
        }

        for &start in profile.draw_starts.iter().filter(|&&start| start < intervals) {
            let stop = (start + profile.draw_length).min(intervals);
            let length = stop - start;
            for (offset, sample) in samples[start..stop].iter_mut().enumerate() {
                sample.temperature -= linspace_at(0.0, profile.draw_depth, length, offset);
            }
        }

        for sample in &mut samples {
            sample.temperature = sample
                .temperature
                .clamp(profile.min_temperature, profile.max_temperature);
        }

        debug!(intervals, %end, "Generated simulated sensor readings");
        Ok(samples)
    }
}

/// Value at `index` of `count` evenly spaced points from `start` to `stop`
/// inclusive.
fn linspace_at(start: f64, stop: f64, count: usize, index: usize) -> f64 {
    if count <= 1 {
        return start;
    }
    start + (stop - start) * index as f64 / (count - 1) as f64
}
