// src/physics/shapes.rs

use crate::error::{Error, Result};
use crate::physics::operations::Cuboid;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A region that trims a materialized atom set down to a cluster.
pub trait Shape {
    /// Axis-aligned box enclosing the whole shape.
    fn bounding_cuboid(&self) -> Result<Cuboid>;

    fn contains(&self, point: &Vector3<f64>) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Cartesian center in Angstroms
    #[serde(default)]
    pub center: [f64; 3],
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: [f64; 3], radius: f64) -> Result<Self> {
        let sphere = Self { center, radius };
        sphere.validate()?;
        Ok(sphere)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::config(format!(
                "sphere radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

impl Shape for Sphere {
    fn bounding_cuboid(&self) -> Result<Cuboid> {
        self.validate()?;
        let c = Vector3::from(self.center);
        let r = Vector3::repeat(self.radius);
        Cuboid::new(c - r, c + r)
    }

    fn contains(&self, point: &Vector3<f64>) -> bool {
        (point - Vector3::from(self.center)).norm_squared() <= self.radius * self.radius
    }
}
