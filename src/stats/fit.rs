//! Least Squares Fit Module
//! Closed-form degree-1 regression used by the regression chart.

/// Coefficients of a fitted line y = intercept + slope * x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a straight line through (x, y) samples by least squares.
    ///
    /// Degenerate inputs (no points, or all x equal so the normal
    /// equations are singular) degrade to the horizontal line through
    /// the mean of y.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Self {
        let n = xs.len().min(ys.len());
        if n == 0 {
            return Self {
                slope: 0.0,
                intercept: 0.0,
            };
        }

        let mut sx = 0.0;
        let mut sy = 0.0;
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            sx += x;
            sy += y;
            sxx += x * x;
            sxy += x * y;
        }

        let nf = n as f64;
        let denom = nf * sxx - sx * sx;
        if denom.abs() < 1e-12 {
            return Self {
                slope: 0.0,
                intercept: sy / nf,
            };
        }

        let slope = (nf * sxy - sx * sy) / denom;
        let intercept = (sy - slope * sx) / nf;
        Self { slope, intercept }
    }

    /// Evaluate the fitted line at x.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit_reproduces_inputs() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];
        let fit = LinearFit::fit(&xs, &ys);

        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            assert!((fit.evaluate(x) - y).abs() < 1e-12);
        }
    }

    #[test]
    fn noisy_points_give_least_squares_line() {
        // Alternating +/-0.1 residuals around y = x + 1.
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.1, 1.9, 3.1, 3.9];
        let fit = LinearFit::fit(&xs, &ys);

        assert!((fit.slope - 0.96).abs() < 1e-9);
        assert!((fit.intercept - 1.06).abs() < 1e-9);
    }

    #[test]
    fn vertical_input_degrades_to_mean() {
        let xs = [2.0, 2.0, 2.0];
        let ys = [1.0, 2.0, 3.0];
        let fit = LinearFit::fit(&xs, &ys);

        assert_eq!(fit.slope, 0.0);
        assert!((fit.intercept - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_zero_line() {
        let fit = LinearFit::fit(&[], &[]);
        assert_eq!(fit.evaluate(5.0), 0.0);
    }
}
