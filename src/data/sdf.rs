// ============================================================
// Layer 4 — SDF Structure Parser
// ============================================================
// Adapts bio_files' SDF reader to the StructureParser seam:
//
//   path ──► bio_files::Sdf::load ──► atoms[..]
//                                       │
//                      element ──► atomic number (na_seq)
//                      posit   ──► [x, y, z]
//                                       │
//                                       ▼
//                                ParsedMolecule
//
// Only the first record of the file is used, and only atomic
// numbers and coordinates are kept. Bonds, charges and
// metadata are ignored.
//
// Reference: CTfile Formats (BIOVIA), V2000 connection table

use bio_files::Sdf;
use std::{io, path::Path};

use crate::domain::{error::DatasetError, molecule::ParsedMolecule, traits::StructureParser};

/// File-backed `StructureParser` for `.sdf` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdfParser;

impl StructureParser for SdfParser {
    fn extension(&self) -> &'static str {
        "sdf"
    }

    fn parse(&self, path: &Path) -> Result<ParsedMolecule, DatasetError> {
        let sdf = Sdf::load(path).map_err(|e| load_error(path, e))?;
        if sdf.atoms.is_empty() {
            return Err(DatasetError::parse(path, "first record contains no atoms"));
        }

        let mut atomic_numbers = Vec::with_capacity(sdf.atoms.len());
        let mut positions      = Vec::with_capacity(sdf.atoms.len());

        for atom in &sdf.atoms {
            // `Element::Other` has no atomic number
            let z = atom.element.atomic_number() as u32;
            if z == 0 {
                return Err(DatasetError::parse(
                    path,
                    format!("unknown element '{}'", atom.element.to_letter()),
                ));
            }
            atomic_numbers.push(z);
            positions.push([atom.posit.x, atom.posit.y, atom.posit.z]);
        }

        Ok(ParsedMolecule::new(atomic_numbers, positions))
    }
}

/// bio_files reports both file-system and format problems as
/// `io::Error`. Only the file-system ones stay `Io`.
fn load_error(path: &Path, source: io::Error) -> DatasetError {
    match source.kind() {
        io::ErrorKind::NotFound
        | io::ErrorKind::PermissionDenied
        | io::ErrorKind::Interrupted => DatasetError::io(path, source),
        _ => DatasetError::parse(path, source.to_string()),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{carbon_chain, water, write_sdf};

    #[test]
    fn test_reads_atoms_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        write_sdf(dir.path(), "water.sdf", &water());

        let mol = SdfParser.parse(&dir.path().join("water.sdf")).unwrap();
        assert_eq!(mol.atomic_numbers, vec![8, 1, 1]);
        assert!((mol.positions[0][2] - 0.1173).abs() < 1e-9);
        assert!((mol.positions[1][1] - 0.7572).abs() < 1e-9);
        assert!((mol.positions[2][1] + 0.7572).abs() < 1e-9);
    }

    #[test]
    fn test_carbon_chain_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        write_sdf(dir.path(), "chain.sdf", &carbon_chain(4));

        let mol = SdfParser.parse(&dir.path().join("chain.sdf")).unwrap();
        assert_eq!(mol.atomic_numbers, vec![6; 4]);
        assert!((mol.positions[3][0] - 4.5).abs() < 1e-9);
        assert!((mol.positions[3][2] + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_parser_attaches_path_to_errors() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.sdf");
        std::fs::write(&path, "only one line\n").unwrap();

        let err = SdfParser.parse(&path).unwrap_err();
        match err {
            DatasetError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parser_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SdfParser.parse(&dir.path().join("nope.sdf")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_format_errors_are_parse_errors() {
        let path = Path::new("bad.sdf");
        let err  = load_error(path, io::Error::new(io::ErrorKind::InvalidData, "bad counts line"));
        assert!(matches!(err, DatasetError::Parse { .. }));
        assert!(err.to_string().contains("bad counts line"));

        let err = load_error(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
