//! Speed potentiometer sampling
//!
//! Two strategies turn raw readings into a spindle speed:
//! - [`RollingAverage`]: mean of the last 10 readings, sampled every call
//! - [`ThrottledReading`]: a fresh reading at most every 150 ms, the
//!   previous value otherwise
//!
//! Both map the reading linearly onto the output range with integer
//! arithmetic that truncates toward zero.

use bobin_hal::{elapsed_ms, AnalogInput};

use crate::config::SpeedConfig;

/// Readings kept by the rolling average
pub const WINDOW: usize = 10;

/// Linear remap with truncating integer division
///
/// Returns `out_min` for a degenerate input range. Intermediates are
/// 64-bit, so full `u16` ranges map exactly; beyond that the result
/// saturates.
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    let offset = i64::from(x) - i64::from(in_min);
    let out_span = i64::from(out_max) - i64::from(out_min);
    let in_span = i64::from(in_max) - i64::from(in_min);
    let mapped = offset.saturating_mul(out_span) / in_span + i64::from(out_min);
    mapped.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Raw reading to speed, clamping the reading into the input range
fn scale(config: &SpeedConfig, raw: u16) -> u16 {
    let raw = raw.max(config.input_min).min(config.input_max);
    let mapped = map_range(
        i32::from(raw),
        i32::from(config.input_min),
        i32::from(config.input_max),
        i32::from(config.output_min),
        i32::from(config.output_max),
    );
    mapped.clamp(0, i32::from(u16::MAX)) as u16
}

/// Common interface of the two strategies
pub trait SpeedSampler {
    /// Current speed, possibly taking a new reading
    fn sample<A: AnalogInput>(&mut self, adc: &mut A, now_ms: u32) -> u16;
}

/// Mean of the last [`WINDOW`] readings
///
/// The window starts out full of zeros, so the first few samples ramp up.
#[derive(Debug, Clone)]
pub struct RollingAverage {
    config: SpeedConfig,
    readings: [u16; WINDOW],
    index: usize,
    total: u32,
}

impl RollingAverage {
    /// Empty window
    pub const fn new(config: SpeedConfig) -> Self {
        Self {
            config,
            readings: [0; WINDOW],
            index: 0,
            total: 0,
        }
    }

    /// Push one raw reading and return the mapped average
    pub fn push(&mut self, raw: u16) -> u16 {
        let raw = raw.max(self.config.input_min).min(self.config.input_max);
        self.total -= u32::from(self.readings[self.index]);
        self.readings[self.index] = raw;
        self.total += u32::from(raw);
        self.index = (self.index + 1) % WINDOW;

        let average = (self.total / WINDOW as u32) as u16;
        scale(&self.config, average)
    }
}

impl SpeedSampler for RollingAverage {
    fn sample<A: AnalogInput>(&mut self, adc: &mut A, _now_ms: u32) -> u16 {
        self.push(adc.read_raw())
    }
}

/// Direct reading, refreshed at most every `throttle_ms`
#[derive(Debug, Clone)]
pub struct ThrottledReading {
    config: SpeedConfig,
    last_at: Option<u32>,
    value: u16,
}

impl ThrottledReading {
    /// No reading taken yet
    pub const fn new(config: SpeedConfig) -> Self {
        Self {
            config,
            last_at: None,
            value: 0,
        }
    }

    /// Last value returned
    pub fn value(&self) -> u16 {
        self.value
    }
}

impl SpeedSampler for ThrottledReading {
    fn sample<A: AnalogInput>(&mut self, adc: &mut A, now_ms: u32) -> u16 {
        let due = match self.last_at {
            Some(at) => elapsed_ms(now_ms, at) >= self.config.throttle_ms,
            None => true,
        };
        if due {
            self.last_at = Some(now_ms);
            self.value = scale(&self.config, adc.read_raw());
        }
        self.value
    }
}

/// Sampler selected by configuration
#[derive(Debug, Clone)]
pub enum Sampler {
    /// See [`RollingAverage`]
    Rolling(RollingAverage),
    /// See [`ThrottledReading`]
    Throttled(ThrottledReading),
}

impl Sampler {
    /// Build the strategy named in `config`
    pub fn from_config(config: SpeedConfig) -> Self {
        if config.throttled {
            Sampler::Throttled(ThrottledReading::new(config))
        } else {
            Sampler::Rolling(RollingAverage::new(config))
        }
    }
}

impl SpeedSampler for Sampler {
    fn sample<A: AnalogInput>(&mut self, adc: &mut A, now_ms: u32) -> u16 {
        match self {
            Sampler::Rolling(s) => s.sample(adc, now_ms),
            Sampler::Throttled(s) => s.sample(adc, now_ms),
        }
    }
}
