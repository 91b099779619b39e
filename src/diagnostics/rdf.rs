use std::f64::consts::PI;

use rayon::prelude::*;

use crate::{
    container::Container,
    region::Region,
    utils::Vec3,
};

/// Radial distribution function `g(r)` as `(bin centre, g)` pairs.
///
/// Distances are measured from the atoms inside the central region of the
/// box to every other atom, in bins of `bin_width` covering `[0, L/2)`.
pub fn radial_distribution(
    positions: &[Vec3],
    container: &Container,
    bin_width: f64,
) -> Vec<(f64, f64)> {
    let num_bins = (0.5 * container.length() / bin_width).floor() as usize;
    let r_max = num_bins as f64 * bin_width;
    let central = container.central_region();
    let core: Vec<usize> = (0..positions.len())
        .filter(|&i| central.contains(&positions[i]))
        .collect();

    let histogram = core
        .par_iter()
        .fold(
            || vec![0usize; num_bins],
            |mut counts, &i| {
                for (j, &pj) in positions.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let r = container.distance(positions[i], pj);
                    if r < r_max {
                        let bin = ((r / bin_width) as usize).min(num_bins - 1);
                        counts[bin] += 1;
                    }
                }
                counts
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                a
            },
        );

    let density = positions.len() as f64 / container.volume();
    let dr3 = bin_width * bin_width * bin_width;
    histogram
        .into_iter()
        .enumerate()
        .map(|(k, count)| {
            let r = (k as f64 + 0.5) * bin_width;
            if core.is_empty() {
                return (r, 0.0);
            }
            let kf = k as f64;
            let shell = 4.0 / 3.0 * PI * ((kf + 1.0).powi(3) - kf.powi(3)) * dr3;
            (r, count as f64 / (core.len() as f64 * density * shell))
        })
        .collect()
}
