//! Finite atomic clusters cut from periodic crystals.
//!
//! A [`Geometry`] holds the lattice and the basis folded into the primitive
//! cell. For a Cartesian box it lists the lattice translations whose cells
//! may overlap the box, and it replicates the basis at those translations.
//! A [`Shape`](physics::shapes::Shape) trims the result to a cluster.

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod utils;

pub use config::{ClusterConfig, GeometrySettings};
pub use error::{Error, Result};
pub use model::{Atom, Structure};
pub use physics::geometry::{BasisSite, Geometry, GeometryInput};
pub use physics::lattice::{CoordSystem, Lattice};
pub use physics::operations::{Cuboid, EnumerationLimits};
pub use physics::shapes::{Shape, Sphere};
