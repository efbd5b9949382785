use crate::model::Structure;
use std::fmt::Write as _;
use std::fs;
use std::io;

/// Extended XYZ text: atom count, a comment line carrying the source
/// lattice, then one `element x y z` line per atom.
pub fn to_string(structure: &Structure) -> String {
    let mut out = String::new();
    let lat = structure.lattice;

    let _ = writeln!(out, "{}", structure.atoms.len());
    let _ = writeln!(
        out,
        "Lattice=\"{} {} {} {} {} {} {} {} {}\" Properties=species:S:1:pos:R:3 {}",
        lat[0][0], lat[0][1], lat[0][2],
        lat[1][0], lat[1][1], lat[1][2],
        lat[2][0], lat[2][1], lat[2][2],
        structure.title
    );
    for atom in &structure.atoms {
        let p = atom.position;
        let _ = writeln!(out, "{:<4} {:14.8} {:14.8} {:14.8}", atom.element, p[0], p[1], p[2]);
    }

    out
}

pub fn write(path: &str, structure: &Structure) -> io::Result<()> {
    fs::write(path, to_string(structure))
}
