// src/config.rs

use crate::error::{Error, Result};
use crate::model::Structure;
use crate::physics::geometry::{BasisSite, GeometryInput};
use crate::physics::lattice::CoordSystem;
use crate::physics::operations::EnumerationLimits;
use crate::physics::shapes::Sphere;
use crate::utils::linalg;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

// --- Geometry Block ---

/// Textual description of a crystal, one whitespace-separated string per key.
///
/// ```text
/// lattice_vectors:  "ax ay az  bx by bz  cx cy cz"
/// basis:            "Na 0 0 0  Cl 0.5 0.5 0.5"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeometrySettings {
  #[serde(default)]
  pub lattice_vectors: Option<String>,

  #[serde(default)]
  pub basis: Option<String>,

  #[serde(default = "default_coordsys")]
  pub basis_coordsys: String,

  #[serde(default = "default_shift")]
  pub shift_vector: String,

  #[serde(default = "default_coordsys")]
  pub shift_vector_coordsys: String,

  #[serde(default = "default_bravais_cell")]
  pub bravais_cell: String,
}

fn default_coordsys() -> String {
  "lattice".to_string()
}

fn default_shift() -> String {
  "0.0 0.0 0.0".to_string()
}

fn default_bravais_cell() -> String {
  "1 0 0  0 1 0  0 0 1".to_string()
}

impl Default for GeometrySettings {
  fn default() -> Self {
    Self {
      lattice_vectors: None,
      basis: None,
      basis_coordsys: default_coordsys(),
      shift_vector: default_shift(),
      shift_vector_coordsys: default_coordsys(),
      bravais_cell: default_bravais_cell(),
    }
  }
}

impl GeometrySettings {
  /// Parses every field into typed construction data.
  pub fn to_input(&self) -> Result<GeometryInput> {
    let lattice_str = self
      .lattice_vectors
      .as_deref()
      .ok_or_else(|| Error::config("lattice vectors not defined"))?;
    let lattice_vectors = parse_matrix(lattice_str)
      .ok_or_else(|| Error::config("invalid lattice vector specification"))?;

    let basis_str = self
      .basis
      .as_deref()
      .ok_or_else(|| Error::config("basis not defined"))?;
    let basis = parse_basis(basis_str)?;

    let basis_coordsys: CoordSystem = self.basis_coordsys.parse()?;
    let shift = parse_floats(&self.shift_vector, 3)
      .map(|v| [v[0], v[1], v[2]])
      .ok_or_else(|| Error::config("invalid shift vector for basis"))?;
    let shift_coordsys: CoordSystem = self.shift_vector_coordsys.parse()?;
    let bravais_cell = parse_matrix(&self.bravais_cell)
      .ok_or_else(|| Error::config("invalid Bravais cell definition"))?;

    Ok(GeometryInput {
      lattice_vectors,
      basis,
      basis_coordsys,
      shift: Some(shift),
      shift_coordsys,
      bravais_cell: Some(bravais_cell),
    })
  }

  /// Settings describing `structure`, with the basis written in fractional
  /// coordinates.
  pub fn from_structure(structure: &Structure) -> Result<Self> {
    let lat = structure.lattice;
    let lattice_vectors = lat
      .iter()
      .map(|v| format!("{:.10} {:.10} {:.10}", v[0], v[1], v[2]))
      .collect::<Vec<_>>()
      .join("\n");

    let mut basis_lines = Vec::with_capacity(structure.atoms.len());
    for atom in &structure.atoms {
      let frac = linalg::cart_to_frac(atom.position, lat)
        .ok_or_else(|| Error::config("structure lattice is singular"))?;
      basis_lines.push(format!(
        "{} {:.10} {:.10} {:.10}",
        atom.element, frac[0], frac[1], frac[2]
      ));
    }

    Ok(Self {
      lattice_vectors: Some(lattice_vectors),
      basis: Some(basis_lines.join("\n")),
      ..Self::default()
    })
  }
}

/// Parses exactly `count` floats; `None` on any bad token or count.
pub fn parse_floats(text: &str, count: usize) -> Option<Vec<f64>> {
  let values: Vec<f64> = text
    .split_whitespace()
    .map(|s| s.parse::<f64>().ok())
    .collect::<Option<_>>()?;
  if values.len() == count && values.iter().all(|x| x.is_finite()) {
    Some(values)
  } else {
    None
  }
}

fn parse_matrix(text: &str) -> Option<[[f64; 3]; 3]> {
  let v = parse_floats(text, 9)?;
  Some([[v[0], v[1], v[2]], [v[3], v[4], v[5]], [v[6], v[7], v[8]]])
}

/// `label x y z` groups, any whitespace in between.
fn parse_basis(text: &str) -> Result<Vec<BasisSite>> {
  let tokens: Vec<&str> = text.split_whitespace().collect();
  if tokens.is_empty() || tokens.len() % 4 != 0 {
    return Err(Error::config(
      "invalid basis specification: expected groups of 'label x y z'",
    ));
  }

  tokens
    .chunks(4)
    .map(|chunk| -> Result<BasisSite> {
      let coords = parse_floats(&chunk[1..].join(" "), 3).ok_or_else(|| {
        Error::config(format!("invalid basis specification for atom '{}'", chunk[0]))
      })?;
      Ok(BasisSite {
        label: chunk[0].to_string(),
        position: [coords[0], coords[1], coords[2]],
      })
    })
    .collect()
}

// --- Cluster Job ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClusterConfig {
  pub geometry: GeometrySettings,

  #[serde(default)]
  pub spheres: Vec<Sphere>,

  #[serde(default = "default_max_candidates")]
  pub max_candidates: Option<u64>,
}

fn default_max_candidates() -> Option<u64> {
  EnumerationLimits::default().max_candidates
}

impl ClusterConfig {
  pub fn limits(&self) -> EnumerationLimits {
    EnumerationLimits {
      max_candidates: self.max_candidates,
    }
  }

  pub fn load(path: &Path) -> Result<Self> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let cfg: Self = serde_json::from_reader(reader)?;
    for sphere in &cfg.spheres {
      sphere.validate()?;
    }
    log::info!("Config loaded from {:?}", path);
    Ok(cfg)
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self)?;
    log::info!("Config saved to {:?}", path);
    Ok(())
  }
}
