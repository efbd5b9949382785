// src/utils/report.rs

use crate::model::structure::Structure;
use crate::physics::geometry::Geometry;

/// Short description of the crystal a cluster is cut from
pub fn geometry_summary(geometry: &Geometry) -> String {
    let mut out = String::new();
    out.push_str("Lattice vectors:\n");
    for row in geometry.lattice().rows() {
        out.push_str(&format!("  {:12.6} {:12.6} {:12.6}\n", row[0], row[1], row[2]));
    }
    out.push_str(&format!("Basis ({} atoms):\n", geometry.basis().len()));
    for (i, p) in geometry.basis().iter().enumerate() {
        out.push_str(&format!(
            "  {:<6} {:12.6} {:12.6} {:12.6}\n",
            geometry.get_name_of_atom(i),
            p.x,
            p.y,
            p.z
        ));
    }
    out
}

/// Generates the per-species table printed after a cut
pub fn cluster_summary(structure: &Structure, filename: &str) -> String {
    let counts = structure.element_counts();

    let formula_str: String = counts
        .iter()
        .map(|(el, count)| format!("{}{}", el, count))
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str(&format!("File: {}\n", filename));
    out.push_str(&format!("Formula: {}\n", formula_str));
    out.push_str("------------------------------\n");
    out.push_str(&format!("{:<10} {:>10}\n", "Element", "Count"));
    out.push_str("------------------------------\n");
    for (el, count) in &counts {
        out.push_str(&format!("{:<10} {:>10}\n", el, count));
    }
    out.push_str(&format!("{:<10} {:>10}\n", "Total", structure.atoms.len()));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Atom;

    #[test]
    fn test_cluster_summary() {
        let atom = |el: &str| Atom {
            element: el.into(),
            position: [0.0; 3],
            original_index: 0,
        };
        let structure = Structure {
            lattice: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            atoms: vec![atom("Na"), atom("Cl"), atom("Cl")],
            title: String::new(),
        };

        let text = cluster_summary(&structure, "out.xyz");
        assert!(text.contains("Formula: Cl2 Na1"));
        assert!(text.lines().any(|l| l.split_whitespace().collect::<Vec<_>>() == ["Total", "3"]));
    }
}
