use crate::models::SensorSnapshot;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of points produced by [`SensorSimulator::mock_history`].
pub const MOCK_HISTORY_LEN: usize = 7;

/// Readings kept in a snapshot's history while the simulator runs.
pub const MAX_HISTORY_LEN: usize = 24;

const MOISTURE_STEP: f64 = 1.5;
const TEMPERATURE_STEP: f64 = 1.0;
const HUMIDITY_STEP: f64 = 2.0;

/// Random-walk stand-in for field hardware.
///
/// Each tick nudges the three readings by a bounded amount and clamps them to
/// plausible field ranges. A fixed seed gives a reproducible sequence.
pub struct SensorSimulator {
    rng: StdRng,
}

impl SensorSimulator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Seed history for a fresh session: a noisy upward ramp.
    pub fn mock_history(&mut self) -> Vec<f64> {
        (0..MOCK_HISTORY_LEN)
            .map(|i| {
                let noise = (self.rng.gen::<f64>() - 0.5) * 30.0;
                (45.0 + noise + 2.0 * i as f64).clamp(20.0, 90.0)
            })
            .collect()
    }

    /// Advance the readings by one tick and record the new moisture value.
    pub fn step(&mut self, snapshot: &mut SensorSnapshot) {
        snapshot.soil_moisture_pct =
            self.drift(snapshot.soil_moisture_pct, MOISTURE_STEP, 15.0, 95.0);
        snapshot.temperature_c = self.drift(snapshot.temperature_c, TEMPERATURE_STEP, 10.0, 45.0);
        snapshot.humidity_pct = self.drift(snapshot.humidity_pct, HUMIDITY_STEP, 20.0, 95.0);

        snapshot.moisture_history.push(snapshot.soil_moisture_pct);
        let overflow = snapshot
            .moisture_history
            .len()
            .saturating_sub(MAX_HISTORY_LEN);
        if overflow > 0 {
            snapshot.moisture_history.drain(..overflow);
        }

        tracing::trace!(
            moisture = snapshot.soil_moisture_pct,
            temperature = snapshot.temperature_c,
            humidity = snapshot.humidity_pct,
            "Simulator tick"
        );
    }

    fn drift(&mut self, value: f64, max_step: f64, min: f64, max: f64) -> f64 {
        let delta = self.rng.gen_range(-max_step..=max_step);
        (value + delta).clamp(min, max)
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new(None)
    }
}
