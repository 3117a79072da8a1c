//! Regression adapter: Implementation of ScoreModel via least squares.
//!
//! Fits an intercept plus one coefficient per lifestyle feature.
//!
//! # Links
//!
//! - `ScoreLink::Identity`: ordinary least squares on the raw score.
//! - `ScoreLink::Logistic`: binomial GLM (logit link) on `score / 100`, fitted
//!   with iteratively reweighted least squares. Predictions are rescaled by 100.
//!
//! # Rank
//!
//! Each least-squares step returns the minimum-norm solution. With at least as
//! many rows as parameters this is the normal-equation solution; with fewer
//! rows it is `Xᵀ(XXᵀ)⁻¹y`. Both agree with a pseudo-inverse fit on full-rank
//! data. Rank-deficient systems are rejected as `ModelError::Singular`.

use ndarray::{Array1, Array2, Axis};

use crate::domain::{sigmoid, ReferenceDataset, ScoreLink, FEATURE_COUNT};
use crate::ports::{ModelError, ScoreModel};

/// Maximum IRLS iterations for the logistic link.
const MAX_IRLS_ITERATIONS: usize = 100;

/// IRLS stops once no coefficient moves more than this.
const IRLS_TOLERANCE: f64 = 1e-10;

/// Lower bound on IRLS weights, keeps `(y - mu) / w` finite near 0 and 1.
const MIN_IRLS_WEIGHT: f64 = 1e-10;

/// Relative pivot size below which a system is treated as singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// A fitted linear predictor with its score link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    intercept: f64,
    coefficients: Array1<f64>,
    link: ScoreLink,
}

impl LinearModel {
    /// Build a model from known parameters.
    #[must_use]
    pub fn from_parameters(intercept: f64, coefficients: Vec<f64>, link: ScoreLink) -> Self {
        Self {
            intercept,
            coefficients: Array1::from(coefficients),
            link,
        }
    }

    /// Fit a model on the reference dataset.
    ///
    /// # Errors
    /// Returns `ModelError::EmptyDataset` for no rows, `ModelError::Singular`
    /// for a rank-deficient design, and `ModelError::TargetOutOfRange` when the
    /// logistic link sees a score outside [0, 100].
    pub fn fit(dataset: &ReferenceDataset, link: ScoreLink) -> Result<Self, ModelError> {
        if dataset.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        let x = design_matrix(dataset);
        let y = Array1::from(dataset.scores());

        let beta = match link {
            ScoreLink::Identity => solve_least_squares(&x, &y, None)?,
            ScoreLink::Logistic => fit_logistic(&x, &y)?,
        };

        let model = Self {
            intercept: beta[0],
            coefficients: beta.slice(ndarray::s![1..]).to_owned(),
            link,
        };

        tracing::info!(
            "Fitted {} model on {} rows: intercept={:.4}, coefficients={:?}",
            link,
            dataset.len(),
            model.intercept,
            model.coefficients.to_vec()
        );

        Ok(model)
    }

    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        self.coefficients.as_slice().unwrap_or(&[])
    }

    /// Linear predictor for one feature row.
    fn linear_predictor(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(b, x)| b * x)
                .sum::<f64>()
    }
}

impl ScoreModel for LinearModel {
    fn predict_score(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                got: features.len(),
                expected: self.coefficients.len(),
            });
        }

        let score = self.link.apply(self.linear_predictor(features));
        if score.is_finite() {
            Ok(score)
        } else {
            Err(ModelError::NonFinite)
        }
    }

    fn link(&self) -> ScoreLink {
        self.link
    }

    fn feature_count(&self) -> usize {
        self.coefficients.len()
    }
}

/// Intercept column followed by the features in model order.
fn design_matrix(dataset: &ReferenceDataset) -> Array2<f64> {
    let mut x = Array2::<f64>::ones((dataset.len(), FEATURE_COUNT + 1));
    for (mut row, record) in x.axis_iter_mut(Axis(0)).zip(dataset.records()) {
        for (j, value) in record.input.to_vec().into_iter().enumerate() {
            row[j + 1] = value;
        }
    }
    x
}

/// IRLS for a binomial GLM with logit link on `y / 100`.
fn fit_logistic(x: &Array2<f64>, scores: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
    if let Some(&bad) = scores.iter().find(|s| !(0.0..=100.0).contains(*s)) {
        return Err(ModelError::TargetOutOfRange(bad));
    }
    let y = scores.mapv(|s| s / 100.0);

    // Start from the intercept-only fit.
    let mean = y.mean().unwrap_or(0.5).clamp(1e-6, 1.0 - 1e-6);
    let mut beta = Array1::<f64>::zeros(x.ncols());
    beta[0] = (mean / (1.0 - mean)).ln();

    for iteration in 1..=MAX_IRLS_ITERATIONS {
        let eta = x.dot(&beta);
        let mu = eta.mapv(sigmoid);
        let w = mu.mapv(|m| (m * (1.0 - m)).max(MIN_IRLS_WEIGHT));
        let z = &eta + &((&y - &mu) / &w);

        let next = solve_least_squares(x, &z, Some(&w))?;
        let delta = (&next - &beta)
            .iter()
            .fold(0.0_f64, |acc, d| acc.max(d.abs()));
        beta = next;

        if !delta.is_finite() {
            return Err(ModelError::NonFinite);
        }
        if delta < IRLS_TOLERANCE {
            tracing::debug!("IRLS converged after {} iterations", iteration);
            return Ok(beta);
        }
    }

    tracing::warn!(
        "IRLS did not converge within {} iterations; using last estimate",
        MAX_IRLS_ITERATIONS
    );
    Ok(beta)
}

/// Minimum-norm (weighted) least squares.
fn solve_least_squares(
    x: &Array2<f64>,
    y: &Array1<f64>,
    weights: Option<&Array1<f64>>,
) -> Result<Array1<f64>, ModelError> {
    let (xs, ys) = match weights {
        Some(w) => {
            let root = w.mapv(f64::sqrt);
            let xs = x * &root.view().insert_axis(Axis(1));
            (xs, y * &root)
        }
        None => (x.clone(), y.clone()),
    };

    if xs.nrows() >= xs.ncols() {
        let gram = xs.t().dot(&xs);
        let rhs = xs.t().dot(&ys);
        solve_linear_system(gram, rhs)
    } else {
        let gram = xs.dot(&xs.t());
        let alpha = solve_linear_system(gram, ys)?;
        Ok(xs.t().dot(&alpha))
    }
}

/// Gaussian elimination with partial pivoting.
fn solve_linear_system(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, ModelError> {
    let n = a.nrows();
    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return Err(ModelError::Singular);
    }

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot, col]].abs() <= scale * PIVOT_TOLERANCE {
            return Err(ModelError::Singular);
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }

        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut solution = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[[row, k]] * solution[k]).sum();
        solution[row] = (b[row] - tail) / a[[row, row]];
    }
    Ok(solution)
}
