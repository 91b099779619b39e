use crate::{
    error::{Error, Result},
    utils::{linear_fit, Vec3},
};

/// Mean square displacement of the atoms selected by `include`, between their
/// unwrapped positions and the baseline
pub fn mean_square_displacement(
    unwrapped: &[Vec3],
    baseline: &[Vec3],
    include: impl Fn(usize) -> bool,
) -> f64 {
    let (sum, count) = unwrapped
        .iter()
        .zip(baseline)
        .enumerate()
        .filter(|(i, _)| include(*i))
        .fold((0.0, 0usize), |(sum, count), (_, (u, u0))| {
            (sum + (*u - *u0).norm_squared(), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Diffusion coefficient with its 95 % confidence half-width (m²/s)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffusionEstimate {
    pub coefficient: f64,
    pub error: f64,
}

/// Least-squares slope of `(t, MSD)` points over 6
pub fn diffusion_least_squares(points: &[(f64, f64)]) -> Result<DiffusionEstimate> {
    let fit = linear_fit(points).ok_or(Error::InsufficientSamples {
        needed: 3,
        available: points.len(),
    })?;
    Ok(DiffusionEstimate {
        coefficient: fit.slope / 6.0,
        error: 1.96 * fit.slope_std_error / 6.0,
    })
}

/// Slope between the first and last `(t, MSD)` points over 6
pub fn diffusion_two_point(points: &[(f64, f64)]) -> Result<f64> {
    let insufficient = Error::InsufficientSamples {
        needed: 2,
        available: points.len(),
    };
    match (points.first(), points.last()) {
        (Some(&(t0, msd0)), Some(&(t1, msd1))) if points.len() >= 2 && t1 != t0 => {
            Ok((msd1 - msd0) / (t1 - t0) / 6.0)
        }
        _ => Err(insufficient),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn displacement_of_selected_atoms() {
        let baseline = vec![Vec3::default(); 3];
        let unwrapped = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        ];
        assert_relative_eq!(
            mean_square_displacement(&unwrapped, &baseline, |_| true),
            14.0 / 3.0
        );
        assert_relative_eq!(
            mean_square_displacement(&unwrapped, &baseline, |i| i != 1),
            5.0
        );
        assert_eq!(mean_square_displacement(&unwrapped, &baseline, |_| false), 0.0);
    }

    #[test]
    fn linear_growth() {
        let points: Vec<(f64, f64)> = (1..=10).map(|k| (k as f64, 12.0 * k as f64)).collect();
        let estimate = diffusion_least_squares(&points).unwrap();
        assert_relative_eq!(estimate.coefficient, 2.0, max_relative = 1e-12);
        assert!(estimate.error < 1e-9);
        assert_relative_eq!(diffusion_two_point(&points).unwrap(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn too_few_points() {
        let points = [(1.0, 1.0), (2.0, 2.0)];
        assert_eq!(
            diffusion_least_squares(&points),
            Err(Error::InsufficientSamples {
                needed: 3,
                available: 2
            })
        );
        assert!(diffusion_two_point(&points[..1]).is_err());
        assert!(diffusion_two_point(&[(1.0, 1.0), (1.0, 2.0)]).is_err());
    }
}
