// src/physics/operations/cuboid.rs

//! Lattice translations whose unit cells may overlap an axis-aligned box.
//!
//! The cuboid's corners are taken to fractional coordinates and the integer
//! box enclosing them is scanned densely. For oblique lattices this box is
//! larger than the true (sheared) image of the cuboid, so more cells than
//! necessary are returned; the shape mask applied afterwards drops their
//! atoms.

use crate::error::{Error, Result};
use crate::physics::lattice::Lattice;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Default ceiling on the number of candidate cells scanned per query.
pub const DEFAULT_MAX_CANDIDATES: u64 = 50_000_000;

/// Axis-aligned Cartesian box, `min <= max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    min: Vector3<f64>,
    max: Vector3<f64>,
}

impl Cuboid {
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Result<Self> {
        if min.iter().chain(max.iter()).any(|x| !x.is_finite()) {
            return Err(Error::config("cuboid corners must be finite"));
        }
        if (0..3).any(|i| min[i] > max[i]) {
            return Err(Error::config(format!(
                "cuboid minimum {:?} exceeds maximum {:?}",
                min.as_slice(),
                max.as_slice()
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> &Vector3<f64> {
        &self.min
    }

    pub fn max(&self) -> &Vector3<f64> {
        &self.max
    }

    /// All eight min/max combinations.
    pub fn corners(&self) -> [Vector3<f64>; 8] {
        let pick = |bit: usize, axis: usize| {
            if bit == 0 {
                self.min[axis]
            } else {
                self.max[axis]
            }
        };
        std::array::from_fn(|i| Vector3::new(pick((i >> 2) & 1, 0), pick((i >> 1) & 1, 1), pick(i & 1, 2)))
    }

    pub fn contains(&self, p: &Vector3<f64>) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationLimits {
    /// Maximum number of candidate cells to scan (`None` = unlimited)
    pub max_candidates: Option<u64>,
}

impl Default for EnumerationLimits {
    fn default() -> Self {
        Self {
            max_candidates: Some(DEFAULT_MAX_CANDIDATES),
        }
    }
}

impl EnumerationLimits {
    pub fn unlimited() -> Self {
        Self { max_candidates: None }
    }
}

/// Inclusive integer cell-index range covering the cuboid's corners.
pub fn index_bounds(lattice: &Lattice, cuboid: &Cuboid) -> ([i64; 3], [i64; 3]) {
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for corner in cuboid.corners() {
        let frac = lattice.to_fractional(&corner);
        for i in 0..3 {
            lo[i] = lo[i].min(frac[i]);
            hi[i] = hi[i].max(frac[i]);
        }
    }
    (
        lo.map(|x| x.floor() as i64),
        hi.map(|x| x.floor() as i64),
    )
}

/// Number of cells in an inclusive index range.
pub fn candidate_count(min_idx: [i64; 3], max_idx: [i64; 3]) -> u128 {
    (0..3)
        .map(|i| (max_idx[i] as i128 - min_idx[i] as i128 + 1).max(0) as u128)
        .product()
}

/// True when `t` lies below `min - buffer` on every axis or above
/// `max + buffer` on every axis.
pub fn is_outside(t: &Vector3<f64>, cuboid: &Cuboid, buffer: &Vector3<f64>) -> bool {
    let below = (0..3).all(|i| t[i] < cuboid.min[i] - buffer[i]);
    let above = (0..3).all(|i| t[i] > cuboid.max[i] + buffer[i]);
    below || above
}

/// Cartesian lattice translations whose cells may contribute atoms to
/// `cuboid`, in index order (first axis outermost).
pub fn enumerate_lattice_points(
    lattice: &Lattice,
    cuboid: &Cuboid,
    limits: &EnumerationLimits,
) -> Result<Vec<Vector3<f64>>> {
    let (min_idx, max_idx) = index_bounds(lattice, cuboid);
    let candidates = candidate_count(min_idx, max_idx);
    log::debug!(
        "Number of necessary grid points: {} (indices {:?} to {:?})",
        candidates,
        min_idx,
        max_idx
    );

    if let Some(limit) = limits.max_candidates {
        if candidates > limit as u128 {
            return Err(Error::Resource { candidates, limit });
        }
    }

    let buffer = lattice.cell_buffer();
    let mut points = Vec::new();
    for i in min_idx[0]..=max_idx[0] {
        for j in min_idx[1]..=max_idx[1] {
            for k in min_idx[2]..=max_idx[2] {
                let t = lattice.translation([i, j, k]);
                if !is_outside(&t, cuboid, &buffer) {
                    points.push(t);
                }
            }
        }
    }

    log::debug!("Retained {} of {} lattice points", points.len(), candidates);
    Ok(points)
}
