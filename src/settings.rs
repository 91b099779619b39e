use crate::error::{Error, Result};

/// Periodic velocity rescaling towards a target temperature
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thermostat {
    /// Target temperature (K)
    pub temperature: f64,
    /// Rescale every `interval` steps
    pub interval: usize,
}
impl Thermostat {
    pub fn new(temperature: f64, interval: usize) -> Self {
        Self {
            temperature,
            interval,
        }
    }
    pub fn should_rescale(&self, step: usize) -> bool {
        step % self.interval == 0
    }
}

/// Settings for running a simulation
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Timestep (s)
    pub timestep: f64,
    /// Length of the velocity autocorrelation in snapshots
    pub acf_sample_count: usize,
    /// Number of time origins averaged in the autocorrelation
    pub acf_repeat_count: usize,
    /// Snapshots between two consecutive time origins
    pub acf_stride: usize,
    pub thermostat: Option<Thermostat>,
    /// Steps between two recorded MSD points
    pub msd_interval: usize,
    /// Largest accepted magnitude of the velocity sum after momentum zeroing
    pub momentum_tolerance: f64,
    pub momentum_max_iterations: usize,
    /// Worker threads, rayon's default when `None`
    pub num_threads: Option<usize>,
}
impl Settings {
    pub fn new() -> Self {
        Self {
            timestep: 1e-14,
            acf_sample_count: 151,
            acf_repeat_count: 5,
            acf_stride: 10,
            thermostat: None,
            msd_interval: 10,
            momentum_tolerance: 1e-5,
            momentum_max_iterations: 100,
            num_threads: None,
        }
    }

    /// Number of velocity snapshots the autocorrelation needs
    pub fn acf_history_len(&self) -> usize {
        self.acf_sample_count + self.acf_repeat_count * self.acf_stride
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(name: &'static str, reason: String) -> Result<()> {
            Err(Error::InvalidSetting { name, reason })
        }
        if !(self.timestep > 0.0 && self.timestep.is_finite()) {
            return invalid("timestep", format!("should be positive, found {}", self.timestep));
        }
        for (name, value) in [
            ("acf_sample_count", self.acf_sample_count),
            ("acf_repeat_count", self.acf_repeat_count),
            ("acf_stride", self.acf_stride),
            ("msd_interval", self.msd_interval),
            ("momentum_max_iterations", self.momentum_max_iterations),
        ] {
            if value == 0 {
                return invalid(name, "should be at least 1".to_string());
            }
        }
        if !(self.momentum_tolerance > 0.0) {
            return invalid(
                "momentum_tolerance",
                format!("should be positive, found {}", self.momentum_tolerance),
            );
        }
        if self.num_threads == Some(0) {
            return invalid("num_threads", "should be at least 1".to_string());
        }
        if let Some(thermostat) = &self.thermostat {
            if !(thermostat.temperature >= 0.0 && thermostat.temperature.is_finite()) {
                return invalid(
                    "thermostat.temperature",
                    format!("should be non-negative, found {}", thermostat.temperature),
                );
            }
            if thermostat.interval == 0 {
                return invalid("thermostat.interval", "should be at least 1".to_string());
            }
        }
        Ok(())
    }
}
impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.acf_history_len(), 201);
    }

    #[test]
    fn rejects_bad_values() {
        let mut settings = Settings::new();
        settings.timestep = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { name: "timestep", .. })
        ));

        let mut settings = Settings::new();
        settings.acf_stride = 0;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { name: "acf_stride", .. })
        ));

        let mut settings = Settings::new();
        settings.thermostat = Some(Thermostat::new(300.0, 0));
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { name: "thermostat.interval", .. })
        ));
    }

    #[test]
    fn thermostat_interval() {
        let thermostat = Thermostat::new(300.0, 5);
        assert!(!thermostat.should_rescale(3));
        assert!(thermostat.should_rescale(10));
    }
}
