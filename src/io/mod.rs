// src/io/mod.rs
pub mod poscar;
pub mod xyz;

use crate::model::Structure;
use std::io;

pub fn load_structure(path: &str) -> io::Result<Structure> {
    // POSCAR/CONTCAR is the only structure format read
    poscar::parse(path)
}

pub fn save_structure(path: &str, structure: &Structure) -> io::Result<()> {
    let p = path.to_lowercase();

    if p.ends_with(".xyz") {
        xyz::write(path, structure)
    } else {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("unsupported output format: {}", path),
        ))
    }
}
