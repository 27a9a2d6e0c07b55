//! Descriptive statistics and least-squares fits for complexity measurements.

use std::fmt;

/// Basic statistics computed from a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Sample size
    pub n: usize,
    /// Sample mean
    pub mean: f64,
    /// Sample variance (unbiased, using n-1)
    pub variance: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl Statistics {
    /// Compute statistics from a sample, or `None` if it is empty.
    pub fn from_sample(sample: &[f64]) -> Option<Self> {
        if sample.is_empty() {
            return None;
        }

        let n = sample.len();
        let mean = sample.iter().sum::<f64>() / n as f64;

        let variance = if n > 1 {
            sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        Some(Self {
            n,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
            median,
        })
    }

    /// Compute statistics from integer samples.
    pub fn from_usize_sample(sample: &[usize]) -> Option<Self> {
        let floats: Vec<f64> = sample.iter().map(|&x| x as f64).collect();
        Self::from_sample(&floats)
    }
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination (1 for a perfect fit).
    pub r_squared: f64,
}

impl LinearFit {
    /// Fit a line through the points, or `None` with fewer than two distinct `x` values.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
        let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();
        let syy: f64 = points.iter().map(|p| (p.1 - mean_y).powi(2)).sum();
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.4}x + {:.4} (R² = {:.4})", self.slope, self.intercept, self.r_squared)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_statistics() {
        let stats = Statistics::from_sample(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.n, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.median, 2.5);
        assert!((stats.variance - 5.0 / 3.0).abs() < 1e-12);

        let stats = Statistics::from_usize_sample(&[7]).unwrap();
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.median, 7.0);

        assert!(Statistics::from_sample(&[]).is_none());
    }

    #[test]
    fn test_linear_fit() {
        let points = [(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
        let fit = LinearFit::fit(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_fit_degenerate() {
        assert!(LinearFit::fit(&[(1.0, 1.0)]).is_none());
        assert!(LinearFit::fit(&[(1.0, 1.0), (1.0, 2.0)]).is_none());
        let flat = LinearFit::fit(&[(1.0, 2.0), (2.0, 2.0)]).unwrap();
        assert_eq!(flat.slope, 0.0);
        assert_eq!(flat.r_squared, 1.0);
    }
}
