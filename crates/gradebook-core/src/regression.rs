//! Ordinary least squares with an intercept over [`Features`] rows.
//!
//! Features and target are centred, the normal matrix `XcᵀXc` is
//! diagonalised with cyclic Jacobi rotations, and the coefficients are taken
//! from its pseudo-inverse. Directions whose eigenvalue is negligible are
//! dropped, so rank-deficient training sets (a constant column, duplicated
//! features, fewer rows than features) yield the minimum-norm solution
//! instead of an error.

use crate::{
  Error, Result,
  student::{FEATURE_COUNT, Features},
};

const N: usize = FEATURE_COUNT;

type Matrix = [[f64; N]; N];

const MAX_SWEEPS: usize = 64;

/// Eigenvalues below `RANK_TOLERANCE * largest` are treated as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// A fitted linear model `y = intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
  pub intercept:    f64,
  pub coefficients: Features,
}

impl LinearModel {
  pub fn fit(x: &[Features], y: &[f64]) -> Result<Self> {
    if x.len() != y.len() {
      return Err(Error::LengthMismatch { rows: x.len(), targets: y.len() });
    }
    if x.is_empty() {
      return Err(Error::EmptyTrainingSet);
    }

    let n = x.len() as f64;
    // Sum before dividing so a constant column centres to exactly zero.
    let mut x_mean = [0.0; N];
    for row in x {
      for (m, v) in x_mean.iter_mut().zip(row) {
        *m += v;
      }
    }
    for m in &mut x_mean {
      *m /= n;
    }
    let y_mean = y.iter().sum::<f64>() / n;

    // XcᵀXc and Xcᵀyc over the centred data.
    let mut gram: Matrix = [[0.0; N]; N];
    let mut moment = [0.0; N];
    for (row, target) in x.iter().zip(y) {
      let centred: Features = std::array::from_fn(|j| row[j] - x_mean[j]);
      let yc = target - y_mean;
      for i in 0..N {
        moment[i] += centred[i] * yc;
        for j in 0..N {
          gram[i][j] += centred[i] * centred[j];
        }
      }
    }

    let (eigenvalues, eigenvectors) = symmetric_eigen(gram);
    let largest = eigenvalues.iter().cloned().fold(0.0_f64, f64::max);
    let cutoff = largest * RANK_TOLERANCE;

    // β = V · diag(1/λ) · Vᵀ · Xcᵀyc, skipping null directions.
    let mut coefficients = [0.0; N];
    for k in 0..N {
      let lambda = eigenvalues[k];
      if lambda <= cutoff || lambda <= 0.0 {
        continue;
      }
      let projection: f64 =
        (0..N).map(|i| eigenvectors[i][k] * moment[i]).sum::<f64>() / lambda;
      for (i, c) in coefficients.iter_mut().enumerate() {
        *c += eigenvectors[i][k] * projection;
      }
    }

    let intercept = y_mean
      - coefficients
        .iter()
        .zip(&x_mean)
        .map(|(c, m)| c * m)
        .sum::<f64>();

    Ok(Self { intercept, coefficients })
  }

  pub fn predict(&self, features: &Features) -> f64 {
    self.intercept
      + self
        .coefficients
        .iter()
        .zip(features)
        .map(|(c, v)| c * v)
        .sum::<f64>()
  }
}

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns the eigenvalues and a matrix whose columns are the matching
/// eigenvectors.
fn symmetric_eigen(mut a: Matrix) -> ([f64; N], Matrix) {
  let mut v: Matrix = [[0.0; N]; N];
  for (i, row) in v.iter_mut().enumerate() {
    row[i] = 1.0;
  }

  let scale: f64 = a.iter().flatten().map(|x| x * x).sum();

  for _ in 0..MAX_SWEEPS {
    let off: f64 = (0..N)
      .flat_map(|p| ((p + 1)..N).map(move |q| (p, q)))
      .map(|(p, q)| a[p][q] * a[p][q])
      .sum();
    if off <= scale * f64::EPSILON * f64::EPSILON {
      break;
    }

    for p in 0..N {
      for q in (p + 1)..N {
        if a[p][q] == 0.0 {
          continue;
        }
        let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
        let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
        let c = 1.0 / (t * t + 1.0).sqrt();
        let s = t * c;

        for k in 0..N {
          let (akp, akq) = (a[k][p], a[k][q]);
          a[k][p] = c * akp - s * akq;
          a[k][q] = s * akp + c * akq;
        }
        for k in 0..N {
          let (apk, aqk) = (a[p][k], a[q][k]);
          a[p][k] = c * apk - s * aqk;
          a[q][k] = s * apk + c * aqk;
        }
        for row in v.iter_mut() {
          let (vkp, vkq) = (row[p], row[q]);
          row[p] = c * vkp - s * vkq;
          row[q] = s * vkp + c * vkq;
        }
      }
    }
  }

  (std::array::from_fn(|i| a[i][i]), v)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_close(actual: f64, expected: f64) {
    assert!(
      (actual - expected).abs() < 1e-6,
      "expected {expected}, got {actual}"
    );
  }

  /// `g3 = g2 - failures + study`, with every feature varied on its own row.
  fn exact_training_set() -> (Vec<Features>, Vec<f64>) {
    let rows: Vec<Features> = vec![
      [16.0, 2.0, 10.0, 10.0, 0.0, 0.0],
      [18.0, 2.0, 10.0, 10.0, 0.0, 0.0],
      [16.0, 3.0, 10.0, 10.0, 0.0, 0.0],
      [16.0, 2.0, 14.0, 10.0, 0.0, 0.0],
      [16.0, 2.0, 10.0, 15.0, 0.0, 0.0],
      [16.0, 2.0, 10.0, 10.0, 2.0, 0.0],
      [16.0, 2.0, 10.0, 10.0, 0.0, 6.0],
      [17.0, 1.0, 8.0, 12.0, 1.0, 3.0],
      [19.0, 3.0, 15.0, 16.0, 3.0, 10.0],
    ];
    let targets = rows.iter().map(|r| r[3] - r[4] + r[1]).collect();
    (rows, targets)
  }

  #[test]
  fn recovers_exact_linear_relation() {
    let (x, y) = exact_training_set();
    let model = LinearModel::fit(&x, &y).unwrap();

    assert_close(model.intercept, 0.0);
    let expected = [0.0, 1.0, 0.0, 1.0, -1.0, 0.0];
    for (actual, expected) in model.coefficients.iter().zip(expected) {
      assert_close(*actual, expected);
    }
    assert_close(model.predict(&[20.0, 1.0, 5.0, 18.0, 2.0, 30.0]), 17.0);
  }

  #[test]
  fn recovers_intercept_and_weights() {
    let x: Vec<Features> = (0..12)
      .map(|i| {
        let i = f64::from(i);
        [15.0 + i % 4.0, 1.0 + i % 3.0, i, (i * 3.0) % 7.0, (i * 7.0) % 5.0, (i * i) % 11.0]
      })
      .collect();
    let weights = [0.5, -1.0, 0.25, 0.75, -2.0, 0.1];
    let y: Vec<f64> = x
      .iter()
      .map(|r| 3.0 + r.iter().zip(&weights).map(|(a, b)| a * b).sum::<f64>())
      .collect();

    let model = LinearModel::fit(&x, &y).unwrap();
    for (row, target) in x.iter().zip(&y) {
      assert_close(model.predict(row), *target);
    }
  }

  #[test]
  fn constant_columns_do_not_break_the_fit() {
    // Only g1 varies; everything else is constant.
    let x: Vec<Features> = (0..8)
      .map(|i| [16.0, 2.0, f64::from(i), 10.0, 0.0, 0.0])
      .collect();
    let y: Vec<f64> = (0..8).map(|i| 2.0 * f64::from(i) + 1.0).collect();

    let model = LinearModel::fit(&x, &y).unwrap();
    assert_close(model.coefficients[2], 2.0);
    for (j, c) in model.coefficients.iter().enumerate() {
      if j != 2 {
        assert_close(*c, 0.0);
      }
    }
    assert_close(model.predict(&[16.0, 2.0, 12.0, 10.0, 0.0, 0.0]), 25.0);
  }

  #[test]
  fn identical_rows_predict_the_mean() {
    let x = vec![[16.0, 2.0, 10.0, 10.0, 0.0, 0.0]; 6];
    let y = vec![8.0, 10.0, 12.0, 9.0, 11.0, 10.0];
    let model = LinearModel::fit(&x, &y).unwrap();
    assert_close(model.predict(&[30.0, 3.0, 0.0, 0.0, 5.0, 5.0]), 10.0);
  }

  #[test]
  fn empty_training_set_is_rejected() {
    assert!(matches!(
      LinearModel::fit(&[], &[]),
      Err(Error::EmptyTrainingSet)
    ));
  }

  #[test]
  fn mismatched_lengths_are_rejected() {
    let x = vec![[0.0; N]; 3];
    assert!(matches!(
      LinearModel::fit(&x, &[1.0, 2.0]),
      Err(Error::LengthMismatch { rows: 3, targets: 2 })
    ));
  }

  #[test]
  fn jacobi_diagonalises_a_known_matrix() {
    let mut a: Matrix = [[0.0; N]; N];
    a[0][0] = 2.0;
    a[0][1] = 1.0;
    a[1][0] = 1.0;
    a[1][1] = 2.0;
    a[5][5] = 4.0;
    let (values, _) = symmetric_eigen(a);
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let expected = [0.0, 0.0, 0.0, 1.0, 3.0, 4.0];
    for (actual, expected) in sorted.iter().zip(expected) {
      assert_close(*actual, expected);
    }
  }
}
