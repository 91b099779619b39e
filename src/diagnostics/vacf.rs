use crate::{
    error::{Error, Result},
    utils::Vec3,
};

/// Bounded history of velocity snapshots for the autocorrelation
#[derive(Clone, Debug)]
pub struct VelocityHistory {
    snapshots: Vec<Vec<Vec3>>,
    sample_count: usize,
    repeat_count: usize,
    stride: usize,
}
impl VelocityHistory {
    pub fn new(sample_count: usize, repeat_count: usize, stride: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            sample_count,
            repeat_count,
            stride,
        }
    }
    /// Snapshots kept before recording stops
    pub fn capacity(&self) -> usize {
        self.sample_count + self.repeat_count * self.stride
    }
    /// Snapshots the autocorrelation reads
    pub fn required(&self) -> usize {
        self.repeat_count.saturating_sub(1) * self.stride + self.sample_count
    }
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
    /// Append a snapshot unless the history is full
    pub fn record(&mut self, velocities: &[Vec3]) {
        if !self.is_full() {
            self.snapshots.push(velocities.to_vec());
        }
    }

    /// `Z(j) = <v(t0) . v(t0 + j)>` over atoms and time origins, normalised
    /// by its maximum
    pub fn autocorrelation(&self) -> Result<Autocorrelation> {
        let needed = self.required();
        if self.len() < needed {
            return Err(Error::InsufficientSamples {
                needed,
                available: self.len(),
            });
        }
        let num_atoms = self.snapshots.first().map_or(0, Vec::len);
        if num_atoms == 0 {
            return Err(Error::DegenerateState);
        }

        let mut values = vec![0.0; self.sample_count];
        for origin in 0..self.repeat_count {
            let t0 = origin * self.stride;
            let v0 = &self.snapshots[t0];
            for (j, z) in values.iter_mut().enumerate() {
                let vt = &self.snapshots[t0 + j];
                *z += v0.iter().zip(vt).map(|(a, b)| a.dot(b)).sum::<f64>();
            }
        }
        let count = (self.repeat_count * num_atoms) as f64;
        values.iter_mut().for_each(|z| *z /= count);

        let norm = values.iter().copied().fold(f64::MIN, f64::max);
        if !(norm > 0.0) {
            return Err(Error::DegenerateState);
        }
        values.iter_mut().for_each(|z| *z /= norm);
        Ok(Autocorrelation { values, norm })
    }
}

/// Normalised velocity autocorrelation
#[derive(Clone, Debug, PartialEq)]
pub struct Autocorrelation {
    /// `Z(j) / max Z`
    pub values: Vec<f64>,
    /// `max Z` (m²/s²)
    pub norm: f64,
}
impl Autocorrelation {
    /// Self-diffusion coefficient (m²/s) by trapezoidal Green-Kubo integration
    /// with snapshots `timestep` apart
    pub fn diffusion_coefficient(&self, timestep: f64) -> f64 {
        let (first, last) = match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };
        let sum: f64 = self.values.iter().sum();
        (sum - 0.5 * (first + last)) * timestep * self.norm / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stops_recording_at_capacity() {
        let mut history = VelocityHistory::new(3, 2, 2);
        assert_eq!(history.capacity(), 7);
        assert_eq!(history.required(), 5);
        for _ in 0..10 {
            history.record(&[Vec3::splat(1.0)]);
        }
        assert_eq!(history.len(), 7);
    }

    #[test]
    fn too_short_history_is_rejected() {
        let mut history = VelocityHistory::new(3, 2, 2);
        history.record(&[Vec3::splat(1.0)]);
        assert_eq!(
            history.autocorrelation(),
            Err(Error::InsufficientSamples {
                needed: 5,
                available: 1
            })
        );
    }

    #[test]
    fn constant_velocity_is_fully_correlated() {
        let mut history = VelocityHistory::new(4, 3, 2);
        let v = [Vec3::new(1.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 3.0)];
        for _ in 0..history.capacity() {
            history.record(&v);
        }
        let acf = history.autocorrelation().unwrap();
        assert_eq!(acf.values, vec![1.0; 4]);
        // (5 + 9) / 2
        assert_relative_eq!(acf.norm, 7.0);
        // (4 - 1) * dt * 7 / 3
        assert_relative_eq!(acf.diffusion_coefficient(0.5), 3.5);
    }

    #[test]
    fn exponential_decay() {
        // v(t) = v0 exp(-t / 4) along x
        let mut history = VelocityHistory::new(5, 2, 3);
        for t in 0..history.capacity() {
            let v = (-(t as f64) / 4.0).exp();
            history.record(&[Vec3::new(v, 0.0, 0.0)]);
        }
        let acf = history.autocorrelation().unwrap();
        assert_relative_eq!(acf.values[0], 1.0);
        for j in 1..5 {
            assert_relative_eq!(acf.values[j], (-(j as f64) / 4.0).exp(), max_relative = 1e-12);
        }
    }

    #[test]
    fn atoms_at_rest_are_degenerate() {
        let mut history = VelocityHistory::new(2, 1, 1);
        for _ in 0..3 {
            history.record(&[Vec3::default()]);
        }
        assert_eq!(history.autocorrelation(), Err(Error::DegenerateState));
    }
}
