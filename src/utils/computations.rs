/// Ordinary least-squares line through a set of points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Standard error of the slope, from the residual variance
    pub slope_std_error: f64,
}

/// Fit `y = slope * x + intercept` by least squares.
///
/// Returns `None` for fewer than three points or when all `x` coincide.
///
/// ```rust
/// use tmd::utils::linear_fit;
///
/// let points = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
/// let fit = linear_fit(&points).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert!(fit.slope_std_error.abs() < 1e-12);
/// ```
pub fn linear_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let sum_x: f64 = points.iter().map(|p| p.0).sum();
    let sum_y: f64 = points.iter().map(|p| p.1).sum();
    let sum_xy: f64 = points.iter().map(|p| p.0 * p.1).sum();
    let sum_xx: f64 = points.iter().map(|p| p.0 * p.0).sum();

    let denominator = nf * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }
    let slope = (nf * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_xx * sum_y - sum_x * sum_xy) / denominator;

    let mean_x = sum_x / nf;
    let residuals: f64 = points
        .iter()
        .map(|p| (slope * p.0 + intercept - p.1).powi(2))
        .sum();
    let spread: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    let slope_std_error = (residuals / ((nf - 2.0) * spread)).sqrt();

    Some(LinearFit {
        slope,
        intercept,
        slope_std_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn too_few_points() {
        assert!(linear_fit(&[(0.0, 0.0), (1.0, 1.0)]).is_none());
        assert!(linear_fit(&[(1.0, 0.0), (1.0, 1.0), (1.0, 2.0)]).is_none());
    }

    #[test]
    fn noisy_line_has_positive_error() {
        let points: Vec<(f64, f64)> = (0..20)
            .map(|i| {
                let x = i as f64;
                let noise = if i % 2 == 0 { 0.1 } else { -0.1 };
                (x, 3.0 * x - 2.0 + noise)
            })
            .collect();
        let fit = linear_fit(&points).unwrap();
        assert_relative_eq!(fit.slope, 3.0, epsilon = 1e-2);
        assert_relative_eq!(fit.intercept, -2.0, epsilon = 1e-1);
        assert!(fit.slope_std_error > 0.0);
    }
}
