// src/physics/lattice.rs

use crate::error::{Error, Result};
use crate::utils::linalg::{self, EPSILON};
use nalgebra::{Matrix3, Vector3};
use std::fmt;
use std::str::FromStr;

/// Coordinate system a set of input vectors is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CoordSystem {
    /// Fractional coordinates along the lattice vectors
    #[default]
    Lattice,
    Cartesian,
}

impl FromStr for CoordSystem {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.trim() {
            "lattice" => Ok(CoordSystem::Lattice),
            "cartesian" => Ok(CoordSystem::Cartesian),
            other => Err(Error::CoordinateSystem(other.to_string())),
        }
    }
}

impl fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoordSystem::Lattice => write!(f, "lattice"),
            CoordSystem::Cartesian => write!(f, "cartesian"),
        }
    }
}

/// Lattice matrix (rows = lattice vectors) together with its inverse.
///
/// Only non-singular matrices can be constructed, so every conversion
/// below is total.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    matrix: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl Lattice {
    pub fn new(vectors: [[f64; 3]; 3]) -> Result<Self> {
        let matrix = linalg::lattice_matrix(vectors);
        let det = matrix.determinant();
        if !det.is_finite() || det.abs() <= EPSILON {
            return Err(Error::config(format!(
                "linearly dependent lattice vectors (determinant {:.3e})",
                det
            )));
        }
        let inverse = matrix
            .try_inverse()
            .ok_or_else(|| Error::config("lattice matrix is not invertible"))?;

        Ok(Self { matrix, inverse })
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    pub fn rows(&self) -> [[f64; 3]; 3] {
        let m = &self.matrix;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Fractional -> Cartesian (`frac · L`)
    pub fn to_cartesian(&self, frac: &Vector3<f64>) -> Vector3<f64> {
        linalg::row_times(frac, &self.matrix)
    }

    /// Cartesian -> fractional (`cart · L⁻¹`)
    pub fn to_fractional(&self, cart: &Vector3<f64>) -> Vector3<f64> {
        linalg::row_times(cart, &self.inverse)
    }

    /// Cartesian offset of the cell with integer index `n`
    pub fn translation(&self, n: [i64; 3]) -> Vector3<f64> {
        self.to_cartesian(&Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64))
    }

    /// Brings `vectors` given in `system` into Cartesian coordinates.
    pub fn transform(&self, vectors: &[Vector3<f64>], system: CoordSystem) -> Vec<Vector3<f64>> {
        match system {
            CoordSystem::Lattice => vectors.iter().map(|v| self.to_cartesian(v)).collect(),
            CoordSystem::Cartesian => vectors.to_vec(),
        }
    }

    /// Largest extent a unit cell can have along each Cartesian axis
    /// (sum of |component| over the three lattice vectors).
    pub fn cell_buffer(&self) -> Vector3<f64> {
        linalg::abs_sum_per_axis(&self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oblique() -> Lattice {
        Lattice::new([[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.5, -0.7, 5.0]]).unwrap()
    }

    #[test]
    fn test_degenerate_lattice_rejected() {
        let err = Lattice::new([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "unexpected error: {}", err);
    }

    #[test]
    fn test_nearly_flat_lattice_rejected() {
        let result = Lattice::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1e-7]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_coord_system_tags() {
        assert_eq!("lattice".parse::<CoordSystem>().unwrap(), CoordSystem::Lattice);
        assert_eq!(" cartesian ".parse::<CoordSystem>().unwrap(), CoordSystem::Cartesian);

        match "spherical".parse::<CoordSystem>() {
            Err(Error::CoordinateSystem(tag)) => assert_eq!(tag, "spherical"),
            other => panic!("expected coordinate system error, got {:?}", other),
        }
    }

    #[test]
    fn test_transform_lattice_and_cartesian() {
        let lat = oblique();
        let input = vec![Vector3::new(1.0, 1.0, 0.0), Vector3::new(0.0, 0.0, 1.0)];

        let cart = lat.transform(&input, CoordSystem::Lattice);
        assert!((cart[0] - Vector3::new(6.0, 3.46, 0.0)).norm() < 1e-12);
        assert!((cart[1] - Vector3::new(0.5, -0.7, 5.0)).norm() < 1e-12);

        let same = lat.transform(&input, CoordSystem::Cartesian);
        assert_eq!(same, input);
    }

    #[test]
    fn test_fractional_roundtrip() {
        let lat = oblique();
        for v in [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.3, -2.7, 8.1),
            Vector3::new(-11.0, 4.25, -0.5),
        ] {
            let back = lat.to_cartesian(&lat.to_fractional(&v));
            assert!((back - v).norm() < 1e-10, "{:?} -> {:?}", v, back);
        }
    }

    #[test]
    fn test_translation() {
        let lat = oblique();
        let t = lat.translation([1, -1, 2]);
        assert!((t - Vector3::new(3.0, -4.86, 10.0)).norm() < 1e-12);
    }

    #[test]
    fn test_cell_buffer() {
        let buffer = oblique().cell_buffer();
        assert!((buffer - Vector3::new(6.5, 4.16, 5.0)).norm() < 1e-12);
    }

    #[test]
    fn test_cell_buffer_fcc_primitive() {
        // Each axis gets two lattice vectors with component h
        let h = 2.0;
        let lat = Lattice::new([[0.0, h, h], [h, 0.0, h], [h, h, 0.0]]).unwrap();
        assert_eq!(lat.cell_buffer(), Vector3::new(4.0, 4.0, 4.0));
    }
}
