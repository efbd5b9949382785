// src/io/poscar.rs

use crate::model::{Atom, Structure};
use crate::utils::linalg;
use std::fs;
use std::io;

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}

fn parse_triple(line: &str, what: &str) -> io::Result<[f64; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(invalid(what));
    }
    let mut v = [0.0; 3];
    for (slot, part) in v.iter_mut().zip(&parts[..3]) {
        *slot = part.parse::<f64>().map_err(|_| invalid(what))?;
    }
    Ok(v)
}

pub fn parse(path: &str) -> io::Result<Structure> {
    let text = fs::read_to_string(path)?;
    parse_str(&text)
}

/// Reads a VASP POSCAR/CONTCAR. Positions are returned in Cartesian
/// Angstroms whether the file uses Direct or Cartesian mode.
pub fn parse_str(text: &str) -> io::Result<Structure> {
    let mut lines = text.lines();
    let mut next = |what: &str| lines.next().ok_or_else(|| invalid(what));

    let title = next("Unexpected EOF")?.trim().to_string();

    // Scale (negative = target cell volume)
    let scale_line = next("Missing Scale")?;
    let scale: f64 = scale_line
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| invalid("Invalid Scale"))?;

    // Lattice
    let mut lattice = [[0.0; 3]; 3];
    for row in lattice.iter_mut() {
        *row = parse_triple(next("Missing Lattice")?, "Invalid Lattice Line")?;
    }

    let scale = if scale < 0.0 {
        let volume = linalg::lattice_matrix(lattice).determinant().abs();
        if volume == 0.0 {
            return Err(invalid("Singular Lattice"));
        }
        (-scale / volume).cbrt()
    } else {
        scale
    };
    for row in lattice.iter_mut() {
        for x in row.iter_mut() {
            *x *= scale;
        }
    }

    // Elements & Counts (element line is absent in VASP 4 files)
    let line6 = next("Missing Elements")?;
    let starts_alpha = line6
        .trim()
        .chars()
        .next()
        .map(|c| c.is_alphabetic())
        .unwrap_or(false);
    let (element_names, counts_line): (Vec<String>, &str) = if starts_alpha {
        (
            line6.split_whitespace().map(str::to_string).collect(),
            next("Missing Counts")?,
        )
    } else {
        (Vec::new(), line6)
    };

    let counts: Vec<usize> = counts_line
        .split_whitespace()
        .map(|x| x.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid("Invalid Counts"))?;
    if !element_names.is_empty() && element_names.len() != counts.len() {
        return Err(invalid("Element And Count Lines Differ"));
    }

    // Mode (optionally preceded by Selective dynamics)
    let mut mode_line = next("Missing Mode")?.trim().to_lowercase();
    if mode_line.starts_with('s') {
        mode_line = next("Missing Mode")?.trim().to_lowercase();
    }
    let is_direct = if mode_line.starts_with('d') {
        true
    } else if mode_line.starts_with('c') || mode_line.starts_with('k') {
        false
    } else {
        return Err(invalid("Invalid Mode"));
    };

    // Atoms
    let mut atoms = Vec::with_capacity(counts.iter().sum());
    for (elem_idx, &count) in counts.iter().enumerate() {
        let elem_name = element_names
            .get(elem_idx)
            .cloned()
            .unwrap_or_else(|| "X".to_string());
        for _ in 0..count {
            let p = parse_triple(next("Missing Atom Pos")?, "Invalid Atom Pos")?;
            let position = if is_direct {
                linalg::frac_to_cart(p, lattice)
            } else {
                [p[0] * scale, p[1] * scale, p[2] * scale]
            };

            let idx = atoms.len();
            atoms.push(Atom {
                element: elem_name.clone(),
                position,
                original_index: idx,
            });
        }
    }

    Ok(Structure {
        lattice,
        atoms,
        title,
    })
}
