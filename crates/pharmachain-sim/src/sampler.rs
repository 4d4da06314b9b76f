//! Reading sources: where the generator gets its samples.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::config::SamplerConfig;
use crate::error::{Result, SimError};
use crate::reading::Reading;

/// A source of telemetry readings, one call per shipment per tick.
pub trait ReadingSource: Send {
    /// Produce a reading for `shipment_id` stamped with `timestamp`.
    fn sample(&mut self, shipment_id: &str, timestamp: f64) -> Reading;
}

/// Random sensor model driven by a [`SamplerConfig`].
///
/// Temperature, humidity, and pressure are normally distributed and rounded
/// to two decimals. With a small probability the temperature gets a large
/// positive excursion on top, modeling a cold-chain breach.
pub struct RandomSampler<R = StdRng> {
    config: SamplerConfig,
    rng: R,
    temp: Normal<f64>,
    humidity: Normal<f64>,
    pressure: Normal<f64>,
}

impl RandomSampler<StdRng> {
    /// Create a sampler, seeded from `seed` or from OS entropy.
    pub fn new(config: SamplerConfig, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> RandomSampler<R> {
    /// Create a sampler over a caller-supplied RNG.
    pub fn with_rng(config: SamplerConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let normal = |name: &str, mean: f64, std_dev: f64| {
            Normal::new(mean, std_dev)
                .map_err(|e| SimError::InvalidArgument(format!("{name}: {e}")))
        };
        Ok(Self {
            temp: normal("temperature", config.temp_mean, config.temp_std_dev)?,
            humidity: normal("humidity", config.humidity_mean, config.humidity_std_dev)?,
            pressure: normal("pressure", config.pressure_mean, config.pressure_std_dev)?,
            config,
            rng,
        })
    }

    fn jitter(&mut self) -> f64 {
        let j = self.config.position_jitter;
        if j == 0.0 {
            0.0
        } else {
            self.rng.gen_range(-j..=j)
        }
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }
}

impl<R: Rng + Send> ReadingSource for RandomSampler<R> {
    fn sample(&mut self, shipment_id: &str, timestamp: f64) -> Reading {
        let lat = self.config.base_lat + self.jitter();
        let lon = self.config.base_lon + self.jitter();

        let excursion = if self.chance(self.config.excursion_probability) {
            self.rng
                .gen_range(self.config.excursion_min..=self.config.excursion_max)
        } else {
            0.0
        };
        let temp = round2(self.temp.sample(&mut self.rng) + excursion);
        let humidity = round2(self.humidity.sample(&mut self.rng));
        let pressure = round2(self.pressure.sample(&mut self.rng));
        let tamper = self.chance(self.config.tamper_probability);

        Reading {
            shipment_id: shipment_id.to_string(),
            timestamp,
            lat,
            lon,
            temp,
            humidity,
            pressure,
            tamper,
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let mut a = RandomSampler::new(SamplerConfig::default(), Some(7)).unwrap();
        let mut b = RandomSampler::new(SamplerConfig::default(), Some(7)).unwrap();
        for _ in 0..20 {
            assert_eq!(a.sample("S1", 1.0), b.sample("S1", 1.0));
        }
    }

    #[test]
    fn test_position_within_jitter() {
        let config = SamplerConfig::default();
        let mut sampler = RandomSampler::new(config.clone(), Some(1)).unwrap();
        for _ in 0..500 {
            let r = sampler.sample("S1", 1.0);
            assert!((r.lat - config.base_lat).abs() <= config.position_jitter + 1e-12);
            assert!((r.lon - config.base_lon).abs() <= config.position_jitter + 1e-12);
        }
    }

    #[test]
    fn test_values_rounded_to_two_decimals() {
        let mut sampler = RandomSampler::new(SamplerConfig::default(), Some(3)).unwrap();
        let r = sampler.sample("S1", 1.0);
        for v in [r.temp, r.humidity, r.pressure] {
            assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_forced_excursion_breaches_cold_chain() {
        let config = SamplerConfig {
            temp_std_dev: 0.0,
            excursion_probability: 1.0,
            excursion_min: 11.0,
            excursion_max: 12.0,
            tamper_probability: 0.0,
            ..SamplerConfig::default()
        };
        let mut sampler = RandomSampler::new(config, Some(5)).unwrap();
        let r = sampler.sample("S1", 1.0);
        assert!(r.temp >= 31.0 && r.temp <= 32.0);
        assert!(r.is_anomalous());
    }

    #[test]
    fn test_quiet_model_never_alerts() {
        let config = SamplerConfig {
            excursion_probability: 0.0,
            tamper_probability: 0.0,
            ..SamplerConfig::default()
        };
        let mut sampler = RandomSampler::new(config, Some(9)).unwrap();
        // 10 standard deviations from either bound.
        for _ in 0..1000 {
            assert!(!sampler.sample("S1", 1.0).is_anomalous());
        }
    }

    #[test]
    fn test_rejects_negative_std_dev() {
        let config = SamplerConfig {
            humidity_std_dev: -1.0,
            ..SamplerConfig::default()
        };
        assert!(matches!(
            RandomSampler::new(config, None),
            Err(SimError::InvalidArgument(_))
        ));
    }
}
