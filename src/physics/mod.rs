// src/physics/mod.rs
pub mod geometry;
pub mod lattice;
pub mod operations;
pub mod shapes;
