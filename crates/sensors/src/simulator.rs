use agro_core::SensorReading;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random-walk generator for the simulated field sensors.
///
/// Every step nudges each walking metric by a uniform amount in
/// `[-step, step)`, rounds it, and clamps it to the metric's valid range.
/// Rainfall and pH stay at their initial values.
#[derive(Debug)]
pub struct Simulator {
    reading: SensorReading,
    rng:     StdRng,
}

/// Walk parameters for one metric.
#[derive(Debug, Clone, Copy)]
struct Walk {
    step:     f64,
    decimals: i32,
    min:      f64,
    max:      f64,
}

const BATTERY:    Walk = Walk { step: 2.0, decimals: 0, min: 0.0,  max: 100.0 };
const WATER_TANK: Walk = Walk { step: 2.0, decimals: 0, min: 0.0,  max: 100.0 };
const HUMIDITY:   Walk = Walk { step: 2.0, decimals: 1, min: 20.0, max: 100.0 };
const SOIL:       Walk = Walk { step: 2.0, decimals: 1, min: 10.0, max: 100.0 };
const WIND:       Walk = Walk { step: 1.0, decimals: 1, min: 0.0,  max: 50.0 };
const TEMP:       Walk = Walk { step: 1.0, decimals: 1, min: 15.0, max: 40.0 };

impl Simulator {
    /// Start from `initial`, seeding the generator from `seed` or from OS
    /// entropy when `None`.
    pub fn new(initial: SensorReading, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        };
        Self { reading: initial, rng }
    }

    /// Latest reading.
    pub fn reading(&self) -> SensorReading {
        self.reading
    }

    /// Advance every walking metric by one step and return the new reading.
    pub fn step(&mut self) -> SensorReading {
        let prev = self.reading;
        self.reading = SensorReading {
            battery:       self.walk(prev.battery, BATTERY),
            water_tank:    self.walk(prev.water_tank, WATER_TANK),
            humidity:      self.walk(prev.humidity, HUMIDITY),
            soil_moisture: self.walk(prev.soil_moisture, SOIL),
            wind_speed:    self.walk(prev.wind_speed, WIND),
            temperature:   self.walk(prev.temperature, TEMP),
            ..prev
        };
        self.reading
    }

    fn walk(&mut self, value: f64, w: Walk) -> f64 {
        let delta = self.rng.gen_range(-w.step..w.step);
        round_to(value + delta, w.decimals).clamp(w.min, w.max)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
