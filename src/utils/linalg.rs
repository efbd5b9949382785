// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

/// Smallest |det| accepted for a lattice matrix.
pub const EPSILON: f64 = 1e-6;

/// Fractional remainders this close to 0 or 1 fold to 0.
pub const FOLD_TOLERANCE: f64 = 1e-12;

/// Build a matrix whose rows are the lattice vectors
///
/// # Arguments
/// * `lattice` - Lattice vectors as row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]]
pub fn lattice_matrix(lattice: [[f64; 3]; 3]) -> Matrix3<f64> {
  Matrix3::from_row_slice(&[
    lattice[0][0],
    lattice[0][1],
    lattice[0][2],
    lattice[1][0],
    lattice[1][1],
    lattice[1][2],
    lattice[2][0],
    lattice[2][1],
    lattice[2][2],
  ])
}

/// Multiply a row vector from the right with `matrix`
///
/// # Formula
/// ```text
/// result = v · M = M^T × v
/// ```
pub fn row_times(v: &Vector3<f64>, matrix: &Matrix3<f64>) -> Vector3<f64> {
  matrix.tr_mul(v)
}

/// Convert fractional coordinates to Cartesian using lattice matrix
///
/// # Arguments
/// * `frac` - Fractional coordinates [x, y, z]
/// * `lattice` - Lattice vectors as row matrix
///
/// # Returns
/// Cartesian coordinates in Angstroms
pub fn frac_to_cart(frac: [f64; 3], lattice: [[f64; 3]; 3]) -> [f64; 3] {
  let cart = row_times(&Vector3::from(frac), &lattice_matrix(lattice));
  [cart.x, cart.y, cart.z]
}

/// Convert Cartesian coordinates to fractional using lattice matrix
///
/// # Returns
/// Fractional coordinates [x, y, z] or None if lattice is singular
pub fn cart_to_frac(cart: [f64; 3], lattice: [[f64; 3]; 3]) -> Option<[f64; 3]> {
  let inv_lat = lattice_matrix(lattice).try_inverse()?;
  let frac = row_times(&Vector3::from(cart), &inv_lat);
  Some([frac.x, frac.y, frac.z])
}

/// Reduce a fractional coordinate into [0, 1)
///
/// Negative values wrap upwards (-0.25 -> 0.75). Remainders within
/// `FOLD_TOLERANCE` of 0 or 1 are reported as 0.0, so cell-boundary points
/// land on the same face after a Cartesian round trip.
pub fn wrap_unit(x: f64) -> f64 {
  let r = x.rem_euclid(1.0);
  if r < FOLD_TOLERANCE || 1.0 - r < FOLD_TOLERANCE {
    0.0
  } else {
    r
  }
}

/// Sum of the absolute Cartesian components of the lattice vectors, per axis
///
/// Bounds how far any point of a unit cell can lie from the cell origin
/// along each axis.
pub fn abs_sum_per_axis(matrix: &Matrix3<f64>) -> Vector3<f64> {
  Vector3::from_fn(|j, _| (0..3).map(|i| matrix[(i, j)].abs()).sum())
}
