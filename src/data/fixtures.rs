// Test-only helpers for writing small V2000 SDF files.

use std::{fs, path::Path};

/// Water, O first then both hydrogens
pub fn water() -> Vec<(&'static str, [f64; 3])> {
    vec![
        ("O", [0.0, 0.0, 0.1173]),
        ("H", [0.0, 0.7572, -0.4692]),
        ("H", [0.0, -0.7572, -0.4692]),
    ]
}

/// A chain of `n` carbons spaced 1.5 Å apart along x
pub fn carbon_chain(n: usize) -> Vec<(&'static str, [f64; 3])> {
    (0..n).map(|i| ("C", [1.5 * i as f64, 0.25, -0.5])).collect()
}

/// Render one V2000 record, terminated by `$$$$`
pub fn sdf_text(atoms: &[(&str, [f64; 3])]) -> String {
    let mut out = String::from("fixture\n  mol-loader tests\n\n");
    out.push_str(&format!(
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000\n",
        atoms.len(),
        0
    ));
    for (symbol, [x, y, z]) in atoms {
        out.push_str(&format!(
            "{x:>10.4}{y:>10.4}{z:>10.4} {symbol:<3} 0  0  0  0  0  0  0  0  0  0  0  0\n"
        ));
    }
    out.push_str("M  END\n$$$$\n");
    out
}

pub fn write_sdf(dir: &Path, name: &str, atoms: &[(&str, [f64; 3])]) {
    fs::write(dir.join(name), sdf_text(atoms)).unwrap();
}
