// src/physics/operations/supercell.rs

use nalgebra::Vector3;

/// Replicates the basis at every lattice point.
///
/// Atoms of the same cell get consecutive indices: the output holds one
/// block of `basis.len()` atoms per lattice point, in lattice point order.
/// Returns the Cartesian positions and the basis (type) index of each atom.
pub fn materialize(
    basis: &[Vector3<f64>],
    lattice_points: &[Vector3<f64>],
) -> (Vec<Vector3<f64>>, Vec<usize>) {
    let n_atoms = basis.len() * lattice_points.len();
    let mut positions = Vec::with_capacity(n_atoms);
    let mut type_indices = Vec::with_capacity(n_atoms);

    for translation in lattice_points {
        for (type_idx, site) in basis.iter().enumerate() {
            positions.push(site + translation);
            type_indices.push(type_idx);
        }
    }

    (positions, type_indices)
}
