//! Cubic Spline Module
//! Natural-boundary cubic spline interpolation for the smoothed chart.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SplineError {
    #[error("spline interpolation needs at least 2 points, got {0}")]
    TooFewKnots(usize),
    #[error("spline knots must be strictly increasing in x")]
    UnsortedKnots,
}

/// Piecewise cubic interpolant with zero second derivative at both
/// endpoints, matching `make_interp_spline(k=3, bc_type="natural")`.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot; endpoints are zero.
    second_derivs: Vec<f64>,
}

impl CubicSpline {
    /// Build a natural cubic spline through the given knots.
    ///
    /// Knots must be strictly increasing in x; duplicates make the
    /// tridiagonal system singular and are rejected.
    pub fn natural(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        let n = xs.len().min(ys.len());
        if n < 2 {
            return Err(SplineError::TooFewKnots(n));
        }
        if xs[..n].windows(2).any(|w| w[1] <= w[0]) {
            return Err(SplineError::UnsortedKnots);
        }

        let xs = xs[..n].to_vec();
        let ys = ys[..n].to_vec();
        let second_derivs = Self::solve_second_derivatives(&xs, &ys);

        Ok(Self {
            xs,
            ys,
            second_derivs,
        })
    }

    /// Solve the natural-boundary tridiagonal system for the knot
    /// second derivatives (Thomas algorithm, interior knots only).
    fn solve_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
        let n = xs.len();
        let mut m = vec![0.0; n];
        if n < 3 {
            // Two knots: the natural spline is the straight segment.
            return m;
        }

        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        // Interior equations:
        // h[i-1]*m[i-1] + 2(h[i-1]+h[i])*m[i] + h[i]*m[i+1] = rhs[i]
        let interior = n - 2;
        let mut diag = vec![0.0; interior];
        let mut rhs = vec![0.0; interior];
        for i in 1..n - 1 {
            diag[i - 1] = 2.0 * (h[i - 1] + h[i]);
            rhs[i - 1] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
        }

        // Forward elimination.
        for i in 1..interior {
            let w = h[i] / diag[i - 1];
            diag[i] -= w * h[i];
            rhs[i] -= w * rhs[i - 1];
        }

        // Back substitution.
        m[interior] = rhs[interior - 1] / diag[interior - 1];
        for i in (1..interior).rev() {
            m[i] = (rhs[i - 1] - h[i] * m[i + 1]) / diag[i - 1];
        }

        m
    }

    /// Evaluate the spline at x, clamped to the knot domain.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let x = x.clamp(self.xs[0], self.xs[n - 1]);

        // Index of the interval [xs[i], xs[i+1]] containing x.
        let i = match self.xs.partition_point(|&k| k <= x) {
            0 => 0,
            p => (p - 1).min(n - 2),
        };

        let h = self.xs[i + 1] - self.xs[i];
        let (m0, m1) = (self.second_derivs[i], self.second_derivs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let t = x - self.xs[i];
        let b = (y1 - y0) / h - h * (2.0 * m0 + m1) / 6.0;
        let c = m0 / 2.0;
        let d = (m1 - m0) / (6.0 * h);

        y0 + t * (b + t * (c + t * d))
    }

    /// Sample the spline at `n` evenly spaced x positions spanning the
    /// knot domain, inclusive of both endpoints.
    pub fn resample(&self, n: usize) -> Vec<(f64, f64)> {
        let (lo, hi) = (self.xs[0], *self.xs.last().unwrap());
        if n == 1 {
            return vec![(lo, self.evaluate(lo))];
        }

        (0..n)
            .map(|k| {
                let x = if k == n - 1 {
                    hi
                } else {
                    lo + (hi - lo) * k as f64 / (n - 1) as f64
                };
                (x, self.evaluate(x))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_knots_exactly() {
        let xs = [0.0, 1.0, 2.5, 4.0, 5.0];
        let ys = [1.0, 3.0, -2.0, 0.5, 2.0];
        let spline = CubicSpline::natural(&xs, &ys).unwrap();

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            assert!((spline.evaluate(x) - y).abs() < 1e-9, "knot ({x}, {y})");
        }
    }

    #[test]
    fn collinear_knots_stay_on_the_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let spline = CubicSpline::natural(&xs, &ys).unwrap();

        for k in 0..=30 {
            let x = 3.0 * k as f64 / 30.0;
            assert!((spline.evaluate(x) - (1.0 + 2.0 * x)).abs() < 1e-9);
        }
    }

    #[test]
    fn natural_boundary_has_zero_end_curvature() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 0.0, 1.0];
        let spline = CubicSpline::natural(&xs, &ys).unwrap();

        // Second difference quotient near each endpoint.
        let eps = 1e-4;
        for x in [0.0, 3.0 - 2.0 * eps] {
            let dd = (spline.evaluate(x + 2.0 * eps) - 2.0 * spline.evaluate(x + eps)
                + spline.evaluate(x))
                / (eps * eps);
            assert!(dd.abs() < 1e-2, "curvature {dd} at {x}");
        }
    }

    #[test]
    fn resample_spans_domain_inclusive() {
        let xs = [1.0, 2.0, 4.0, 8.0];
        let ys = [0.0, 1.0, -1.0, 2.0];
        let spline = CubicSpline::natural(&xs, &ys).unwrap();

        let samples = spline.resample(100);
        assert_eq!(samples.len(), 100);
        assert_eq!(samples[0].0, 1.0);
        assert_eq!(samples[99].0, 8.0);
        assert!(samples.windows(2).all(|w| w[1].0 > w[0].0));
    }

    #[test]
    fn rejects_bad_knots() {
        assert_eq!(
            CubicSpline::natural(&[1.0], &[1.0]).unwrap_err(),
            SplineError::TooFewKnots(1)
        );
        assert_eq!(
            CubicSpline::natural(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err(),
            SplineError::UnsortedKnots
        );
        assert_eq!(
            CubicSpline::natural(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err(),
            SplineError::UnsortedKnots
        );
    }

    #[test]
    fn evaluate_clamps_outside_domain() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 4.0, 9.0];
        let spline = CubicSpline::natural(&xs, &ys).unwrap();

        assert_eq!(spline.evaluate(-10.0), spline.evaluate(0.0));
        assert_eq!(spline.evaluate(10.0), spline.evaluate(3.0));
    }
}
