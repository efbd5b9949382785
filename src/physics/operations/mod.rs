// src/physics/operations/mod.rs
pub mod conversion;
pub mod cuboid;
pub mod supercell;

pub use conversion::fold_into_cell;
pub use cuboid::{enumerate_lattice_points, Cuboid, EnumerationLimits};
pub use supercell::materialize;
