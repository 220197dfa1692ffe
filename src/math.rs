use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl RegressionResult {
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares fit of `y = slope·x + intercept`.
///
/// `None` with fewer than two points or when every `x` is the same. A
/// constant `y` series is explained perfectly and gets `r_squared = 1`.
pub fn linear_regression<I: IntoIterator<Item = (f64, f64)>>(
    points: I,
) -> Option<RegressionResult> {
    let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

    if x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let x = na::DVector::from_vec(x);
    let y = na::DVector::from_vec(y);

    let s_x = x.sum();
    let s_y = y.sum();
    let s_x2 = x.dot(&x);
    let s_xy = x.dot(&y);

    let denom = n * s_x2 - s_x * s_x;
    if denom == 0.0 || x.iter().all(|&v| v == x[0]) {
        return None;
    }

    let slope = (n * s_xy - s_x * s_y) / denom;
    let intercept = (s_y - slope * s_x) / n;

    let mean_y = s_y / n;
    let ss_tot = y.map(|y| (y - mean_y) * (y - mean_y)).sum();
    let ss_res = x
        .zip_map(&y, |x, y| {
            let r = y - (slope * x + intercept);
            r * r
        })
        .sum();

    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(RegressionResult {
        slope,
        intercept,
        r_squared,
    })
}
