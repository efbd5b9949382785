// src/model/structure.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    pub position: [f64; 3],
    // Index in the structure this atom was generated from
    // (global materialization index for cut clusters).
    #[serde(skip)]
    pub original_index: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    // Lattice vectors: [a_vec, b_vec, c_vec]
    pub lattice: [[f64; 3]; 3],
    pub atoms: Vec<Atom>,
    #[serde(default)]
    pub title: String,
}

impl Structure {
    /// Element labels with their atom counts, sorted by label.
    pub fn element_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(atom.element.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Compact formula such as `Na4Cl4`.
    pub fn formula(&self) -> String {
        self.element_counts()
            .into_iter()
            .map(|(el, count)| {
                if count > 1 {
                    format!("{}{}", el, count)
                } else {
                    el
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula() {
        let atom = |el: &str| Atom {
            element: el.into(),
            position: [0.0; 3],
            original_index: 0,
        };
        let structure = Structure {
            lattice: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            atoms: vec![atom("O"), atom("Ti"), atom("O")],
            title: String::new(),
        };

        assert_eq!(structure.formula(), "O2Ti");
        assert_eq!(structure.element_counts()["O"], 2);
    }
}
