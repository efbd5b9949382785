// src/physics/geometry.rs

//! Periodic crystal description and the cluster queries built on it.
//!
//! A [`Geometry`] owns the lattice and the basis folded into the primitive
//! cell. Both are fixed at construction; every query computes a fresh result.

use crate::config::GeometrySettings;
use crate::error::{Error, Result};
use crate::model::{Atom, Structure};
use crate::physics::lattice::{CoordSystem, Lattice};
use crate::physics::operations::{self, Cuboid, EnumerationLimits};
use crate::physics::shapes::Shape;
use nalgebra::{Matrix3, Vector3};

/// One atom of the basis as supplied by a parser.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisSite {
    pub label: String,
    pub position: [f64; 3],
}

/// Raw construction data for a [`Geometry`].
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryInput {
    /// Lattice vectors as rows, Cartesian
    pub lattice_vectors: [[f64; 3]; 3],
    pub basis: Vec<BasisSite>,
    pub basis_coordsys: CoordSystem,
    pub shift: Option<[f64; 3]>,
    pub shift_coordsys: CoordSystem,
    /// Superlattice matrix; identity when absent
    pub bravais_cell: Option<[[f64; 3]; 3]>,
}

impl GeometryInput {
    pub fn new(lattice_vectors: [[f64; 3]; 3], basis: Vec<BasisSite>) -> Self {
        Self {
            lattice_vectors,
            basis,
            basis_coordsys: CoordSystem::Lattice,
            shift: None,
            shift_coordsys: CoordSystem::Lattice,
            bravais_cell: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Geometry {
    lattice: Lattice,
    basis: Vec<Vector3<f64>>,
    type_names: Vec<String>,
    bravais_cell: Matrix3<f64>,
    limits: EnumerationLimits,
}

impl Geometry {
    pub fn new(input: GeometryInput) -> Result<Self> {
        let lattice = Lattice::new(input.lattice_vectors)?;

        if input.basis.is_empty() {
            return Err(Error::config("basis contains no atoms"));
        }
        if let Some(site) = input
            .basis
            .iter()
            .find(|s| s.position.iter().any(|x| !x.is_finite()))
        {
            return Err(Error::config(format!(
                "non-finite position for basis atom '{}'",
                site.label
            )));
        }

        let raw: Vec<Vector3<f64>> = input
            .basis
            .iter()
            .map(|s| Vector3::from(s.position))
            .collect();
        let mut basis = lattice.transform(&raw, input.basis_coordsys);

        if let Some(shift) = input.shift {
            if shift.iter().any(|x| !x.is_finite()) {
                return Err(Error::config("non-finite shift vector"));
            }
            let shift = lattice.transform(&[Vector3::from(shift)], input.shift_coordsys)[0];
            for site in basis.iter_mut() {
                *site += shift;
            }
        }

        let basis = operations::fold_into_cell(&lattice, &basis);
        let type_names = input.basis.into_iter().map(|s| s.label).collect();
        let bravais_cell = input
            .bravais_cell
            .map(crate::utils::linalg::lattice_matrix)
            .unwrap_or_else(Matrix3::identity);

        log::debug!("Geometry with {} basis atoms", basis.len());

        Ok(Self {
            lattice,
            basis,
            type_names,
            bravais_cell,
            limits: EnumerationLimits::default(),
        })
    }

    /// Builds a geometry from the textual settings layout.
    pub fn from_settings(settings: &GeometrySettings) -> Result<Self> {
        Self::new(settings.to_input()?)
    }

    /// Uses the structure's lattice and its atoms (Cartesian) as basis.
    pub fn from_structure(structure: &Structure) -> Result<Self> {
        let basis = structure
            .atoms
            .iter()
            .map(|a| BasisSite {
                label: a.element.clone(),
                position: a.position,
            })
            .collect();
        let mut input = GeometryInput::new(structure.lattice, basis);
        input.basis_coordsys = CoordSystem::Cartesian;
        Self::new(input)
    }

    pub fn with_limits(mut self, limits: EnumerationLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Basis positions, Cartesian, folded into the primitive cell.
    pub fn basis(&self) -> &[Vector3<f64>] {
        &self.basis
    }

    /// Stored superlattice matrix. Not used by any query.
    pub fn bravais_cell(&self) -> &Matrix3<f64> {
        &self.bravais_cell
    }

    pub fn limits(&self) -> &EnumerationLimits {
        &self.limits
    }

    pub fn coord_transform(&self, vectors: &[Vector3<f64>], system: CoordSystem) -> Vec<Vector3<f64>> {
        self.lattice.transform(vectors, system)
    }

    /// Like [`coord_transform`](Self::coord_transform) but with a textual
    /// system tag (`"lattice"` or `"cartesian"`).
    pub fn coord_transform_tagged(&self, vectors: &[Vector3<f64>], tag: &str) -> Result<Vec<Vector3<f64>>> {
        let system: CoordSystem = tag.parse()?;
        Ok(self.coord_transform(vectors, system))
    }

    pub fn get_atom_type_names(&self) -> &[String] {
        &self.type_names
    }

    /// Species label of an atom.
    ///
    /// `index` may be a type index or a global index into the output of
    /// [`materialize_atoms`](Self::materialize_atoms); atoms come in blocks
    /// of one basis each, so both reduce to `index % basis.len()`.
    pub fn get_name_of_atom(&self, index: usize) -> &str {
        &self.type_names[index % self.type_names.len()]
    }

    pub fn enumerate_lattice_points(
        &self,
        cuboid_min: Vector3<f64>,
        cuboid_max: Vector3<f64>,
    ) -> Result<Vec<Vector3<f64>>> {
        let cuboid = Cuboid::new(cuboid_min, cuboid_max)?;
        self.enumerate_cuboid(&cuboid)
    }

    pub fn enumerate_cuboid(&self, cuboid: &Cuboid) -> Result<Vec<Vector3<f64>>> {
        operations::enumerate_lattice_points(&self.lattice, cuboid, &self.limits)
    }

    pub fn materialize_atoms(&self, lattice_points: &[Vector3<f64>]) -> (Vec<Vector3<f64>>, Vec<usize>) {
        let (positions, types) = operations::materialize(&self.basis, lattice_points);
        log::debug!(
            "Generated {} atoms in {} cells",
            positions.len(),
            lattice_points.len()
        );
        (positions, types)
    }

    /// Cuts a finite cluster: all atoms of the crystal inside `shape`.
    ///
    /// Atoms keep materialization order; `original_index` holds their
    /// global index in the materialized set.
    pub fn cut(&self, shape: &dyn Shape) -> Result<Structure> {
        let cuboid = shape.bounding_cuboid()?;
        let points = self.enumerate_cuboid(&cuboid)?;
        let (positions, types) = self.materialize_atoms(&points);

        let atoms: Vec<Atom> = positions
            .iter()
            .zip(&types)
            .enumerate()
            .filter(|(_, (p, _))| shape.contains(p))
            .map(|(idx, (p, &t))| Atom {
                element: self.type_names[t].clone(),
                position: [p.x, p.y, p.z],
                original_index: idx,
            })
            .collect();

        log::info!("Cluster contains {} of {} generated atoms", atoms.len(), positions.len());

        Ok(Structure {
            lattice: self.lattice.rows(),
            atoms,
            title: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::shapes::Sphere;

    fn site(label: &str, position: [f64; 3]) -> BasisSite {
        BasisSite {
            label: label.into(),
            position,
        }
    }

    fn rocksalt() -> Geometry {
        // Primitive fcc cell, a = 5.64
        let h = 2.82;
        let input = GeometryInput::new(
            [[0.0, h, h], [h, 0.0, h], [h, h, 0.0]],
            vec![site("Na", [0.0, 0.0, 0.0]), site("Cl", [0.5, 0.5, 0.5])],
        );
        Geometry::new(input).unwrap()
    }

    #[test]
    fn test_degenerate_lattice() {
        let input = GeometryInput::new(
            [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            vec![site("X", [0.0; 3])],
        );
        assert!(matches!(Geometry::new(input), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_basis() {
        let input = GeometryInput::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]], vec![]);
        assert!(matches!(Geometry::new(input), Err(Error::Config(_))));
    }

    #[test]
    fn test_shift_and_fold() {
        let mut input = GeometryInput::new(
            [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]],
            vec![site("A", [0.0, 0.0, 0.0]), site("B", [1.5, 0.5, 1.0])],
        );
        input.basis_coordsys = CoordSystem::Cartesian;
        input.shift = Some([-0.25, 0.0, 0.75]);
        let geo = Geometry::new(input).unwrap();

        // A: (-0.5, 0, 1.5); B: (1.0, 0.5, 2.5) -> folded
        assert!((geo.basis()[0] - Vector3::new(1.5, 0.0, 1.5)).norm() < 1e-12);
        assert!((geo.basis()[1] - Vector3::new(1.0, 0.5, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn test_cartesian_shift() {
        let mut input = GeometryInput::new(
            [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]],
            vec![site("A", [0.0, 0.0, 0.0])],
        );
        input.shift = Some([0.5, 0.5, 0.5]);
        input.shift_coordsys = CoordSystem::Cartesian;
        let geo = Geometry::new(input).unwrap();

        assert!((geo.basis()[0] - Vector3::new(0.5, 0.5, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn test_bravais_cell_defaults_to_identity() {
        let geo = rocksalt();
        assert_eq!(*geo.bravais_cell(), Matrix3::identity());
    }

    #[test]
    fn test_names() {
        let geo = rocksalt();

        assert_eq!(geo.get_atom_type_names(), ["Na".to_string(), "Cl".to_string()]);
        assert_eq!(geo.get_name_of_atom(0), "Na");
        assert_eq!(geo.get_name_of_atom(1), "Cl");
        assert_eq!(geo.get_name_of_atom(6), "Na");
        assert_eq!(geo.get_name_of_atom(7), "Cl");
    }

    #[test]
    fn test_coord_transform_tagged() {
        let geo = rocksalt();
        let v = [Vector3::new(1.0, 0.0, 0.0)];

        let cart = geo.coord_transform_tagged(&v, "lattice").unwrap();
        assert!((cart[0] - Vector3::new(0.0, 2.82, 2.82)).norm() < 1e-12);
        assert_eq!(geo.coord_transform_tagged(&v, "cartesian").unwrap(), v.to_vec());
        assert!(matches!(
            geo.coord_transform_tagged(&v, "polar"),
            Err(Error::CoordinateSystem(_))
        ));
    }

    #[test]
    fn test_materialize_atom_count() {
        let geo = rocksalt();
        let points = geo
            .enumerate_lattice_points(Vector3::new(-3.0, -3.0, -3.0), Vector3::new(3.0, 3.0, 3.0))
            .unwrap();
        let (positions, types) = geo.materialize_atoms(&points);

        assert_eq!(positions.len(), points.len() * 2);
        for (block, point) in points.iter().enumerate() {
            assert_eq!(types[2 * block], 0);
            assert_eq!(types[2 * block + 1], 1);
            assert!((positions[2 * block] - point).norm() < 1e-12);
        }
    }

    #[test]
    fn test_cut_sphere_rocksalt() {
        // Na at the origin with its six Cl neighbours at a/2
        let geo = rocksalt();
        let cluster = geo.cut(&Sphere::new([0.0; 3], 2.9).unwrap()).unwrap();

        let counts = cluster.element_counts();
        assert_eq!(counts["Na"], 1);
        assert_eq!(counts["Cl"], 6);
        for atom in &cluster.atoms {
            let p = Vector3::from(atom.position);
            assert!(p.norm() <= 2.9);
            assert_eq!(geo.get_name_of_atom(atom.original_index), atom.element);
        }
    }

    #[test]
    fn test_resource_limit_propagates() {
        let geo = rocksalt().with_limits(EnumerationLimits {
            max_candidates: Some(10),
        });
        let result = geo.cut(&Sphere::new([0.0; 3], 20.0).unwrap());
        assert!(matches!(result, Err(Error::Resource { .. })));
    }
}
