use crate::core::error::ValidationError;
use crate::core::models::atom::{Atom, CoordinateUnit};
use crate::core::models::molecule::MoldenData;
use crate::core::models::orbital::{MolecularOrbital, Spin};
use crate::core::models::shell::{
    AngularMomentum, GaussianPrimitive, Shell, atomic_orbital_count, canonical_order,
};
use nalgebra::{DMatrix, Point3};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const ATOMS_MARKER: &str = "[Atoms]";
const GTO_MARKER: &str = "[GTO]";
const MO_MARKER: &str = "[MO]";
const SPHERICAL_MARKERS: [&str; 2] = ["5D", "9G"];
const SYMMETRY_KEY: &str = "Sym=";

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid input source: {0}")]
    InvalidSource(&'static str),
    #[error("The provided Molden input is empty")]
    Empty,
    #[error("No '{marker}' section found in the Molden input")]
    MissingSection { marker: &'static str },
    #[error("Found both '[Atoms] AU' and '[Atoms] Angs' sections; expected exactly one")]
    AmbiguousAtomsSection,
    #[error("Cartesian orbital functions are not supported; expected a '[5D]' or '[9G]' marker")]
    UnsupportedConvention,
    #[error("Shell label '{label}' on line {line} is not supported (expected s, p, d, f or g)")]
    UnsupportedShell { line: usize, label: String },
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    #[error("Unexpected end of the '{section}' section")]
    UnexpectedEnd { section: &'static str },
    #[error("Invalid parse option: {0}")]
    InvalidOption(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("Invalid integer for {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float for {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Required field {field} is missing")]
    MissingField { field: &'static str },
}

/// Where the Molden text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MoldenSource {
    Path(PathBuf),
    Lines(Vec<String>),
}

impl MoldenSource {
    /// Builds a source from two optional inputs of which exactly one must be given.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidSource`] if both or neither are given, or if the
    /// given lines are empty.
    pub fn from_options(
        path: Option<PathBuf>,
        lines: Option<Vec<String>>,
    ) -> Result<Self, FormatError> {
        match (path, lines) {
            (Some(_), Some(_)) => Err(FormatError::InvalidSource(
                "provide either a path or lines, not both",
            )),
            (None, None) => Err(FormatError::InvalidSource(
                "must provide either a path or lines",
            )),
            (Some(path), None) => Ok(Self::Path(path)),
            (None, Some(lines)) if lines.is_empty() => Err(FormatError::InvalidSource(
                "lines were provided but are empty",
            )),
            (None, Some(lines)) => Ok(Self::Lines(lines)),
        }
    }
}

/// Options controlling how much of a Molden file is extracted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOptions {
    /// Only parse the atoms; the basis and orbital sections are neither required nor read.
    pub only_molecule: bool,
    /// Restrict orbital extraction to these file-order indices.
    pub orbital_filter: Option<Vec<usize>>,
    /// Stable-sort the orbital list by energy after parsing.
    pub sort_by_energy: bool,
}

struct Sections {
    unit: CoordinateUnit,
    atoms: Range<usize>,
    basis: Range<usize>,
    orbitals: Range<usize>,
}

/// Reader for the Molden format restricted to spherical (`[5D]`/`[9G]`) basis functions.
pub struct MoldenFile;

impl MoldenFile {
    /// Parses from either source kind.
    pub fn parse(source: MoldenSource, options: &ParseOptions) -> Result<MoldenData, FormatError> {
        match source {
            MoldenSource::Path(path) => Self::read_from_path(&path, options),
            MoldenSource::Lines(lines) => Self::parse_lines(&lines, options),
        }
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
        options: &ParseOptions,
    ) -> Result<MoldenData, FormatError> {
        let path = path.as_ref();
        let io_error = |source| FormatError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_error)?;
        Self::parse_lines(&lines, options)
    }

    pub fn read_from(
        reader: &mut impl BufRead,
        options: &ParseOptions,
    ) -> Result<MoldenData, FormatError> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| FormatError::Io {
                path: "<reader>".to_string(),
                source,
            })?;
        Self::parse_lines(&lines, options)
    }

    /// Parses pre-split lines. Surrounding whitespace is ignored.
    pub fn parse_lines<S: AsRef<str>>(
        raw_lines: &[S],
        options: &ParseOptions,
    ) -> Result<MoldenData, FormatError> {
        let lines: Vec<&str> = raw_lines.iter().map(|l| l.as_ref().trim()).collect();

        check_format(&lines, options.only_molecule)?;
        let sections = divide_sections(&lines, options.only_molecule)?;

        let atoms = parse_atoms(&lines, sections.atoms.clone())?;
        if options.only_molecule {
            info!("Parsed {} atoms (molecule only).", atoms.len());
            return Ok(MoldenData::molecule_only(atoms, sections.unit));
        }

        let shells = parse_shells(&lines, sections.basis.clone(), &atoms)?;
        let (orbitals, coefficients) = parse_orbitals(
            &lines,
            sections.orbitals.clone(),
            &shells,
            options.orbital_filter.as_deref(),
        )?;

        let mut data = MoldenData::new(atoms, shells, orbitals, coefficients, sections.unit)?;
        if options.sort_by_energy {
            data.sort_orbitals_by_energy();
        }
        Ok(data)
    }
}

fn check_format(lines: &[&str], only_molecule: bool) -> Result<(), FormatError> {
    info!("Checking Molden format...");
    if lines.iter().all(|l| l.is_empty()) {
        return Err(FormatError::Empty);
    }

    let contains = |needle: &str| lines.iter().any(|l| l.contains(needle));

    if !contains(ATOMS_MARKER) {
        return Err(FormatError::MissingSection {
            marker: ATOMS_MARKER,
        });
    }
    if only_molecule {
        return Ok(());
    }
    if !contains(GTO_MARKER) {
        return Err(FormatError::MissingSection { marker: GTO_MARKER });
    }
    if !contains(MO_MARKER) {
        return Err(FormatError::MissingSection { marker: MO_MARKER });
    }
    if !SPHERICAL_MARKERS.iter().any(|m| contains(m)) {
        return Err(FormatError::UnsupportedConvention);
    }

    info!("Molden format check passed.");
    Ok(())
}

fn find_marker(lines: &[&str], marker: &str) -> Option<usize> {
    lines.iter().position(|l| l.eq_ignore_ascii_case(marker))
}

fn divide_sections(lines: &[&str], only_molecule: bool) -> Result<Sections, FormatError> {
    let au = find_marker(lines, CoordinateUnit::Bohr.marker());
    let angs = find_marker(lines, CoordinateUnit::Angstrom.marker());
    let (unit, atom_ind) = match (au, angs) {
        (Some(i), None) => (CoordinateUnit::Bohr, i),
        (None, Some(i)) => (CoordinateUnit::Angstrom, i),
        (Some(_), Some(_)) => return Err(FormatError::AmbiguousAtomsSection),
        (None, None) => {
            return Err(FormatError::MissingSection {
                marker: "[Atoms] (AU/Angs)",
            });
        }
    };

    let atoms_end = lines[atom_ind + 1..]
        .iter()
        .position(|l| l.starts_with('['))
        .map_or(lines.len(), |offset| atom_ind + 1 + offset);
    let atoms = atom_ind + 1..atoms_end;

    if only_molecule {
        return Ok(Sections {
            unit,
            atoms,
            basis: 0..0,
            orbitals: 0..0,
        });
    }

    let gto_ind = find_marker(lines, GTO_MARKER).ok_or(FormatError::MissingSection {
        marker: GTO_MARKER,
    })?;
    let mo_ind = find_marker(lines, MO_MARKER).ok_or(FormatError::MissingSection {
        marker: MO_MARKER,
    })?;
    let basis_end = if mo_ind > gto_ind { mo_ind } else { lines.len() };

    debug!(atom_ind, gto_ind, mo_ind, "Divided Molden input into sections.");
    Ok(Sections {
        unit,
        atoms,
        basis: gto_ind + 1..basis_end,
        orbitals: mo_ind + 1..lines.len(),
    })
}

/// Parses a float, accepting Fortran `D` exponents.
fn parse_float(token: &str, line: usize, field: &'static str) -> Result<f64, FormatError> {
    let normalized;
    let text = if token.contains(['D', 'd']) {
        normalized = token.replace(['D', 'd'], "E");
        normalized.as_str()
    } else {
        token
    };
    text.parse().map_err(|_| FormatError::Parse {
        line,
        kind: ParseErrorKind::InvalidFloat {
            field,
            value: token.to_string(),
        },
    })
}

fn parse_int<T: std::str::FromStr>(
    token: &str,
    line: usize,
    field: &'static str,
) -> Result<T, FormatError> {
    token.parse().map_err(|_| FormatError::Parse {
        line,
        kind: ParseErrorKind::InvalidInt {
            field,
            value: token.to_string(),
        },
    })
}

fn token<'a>(
    tokens: &[&'a str],
    i: usize,
    line: usize,
    field: &'static str,
) -> Result<&'a str, FormatError> {
    tokens.get(i).copied().ok_or(FormatError::Parse {
        line,
        kind: ParseErrorKind::MissingField { field },
    })
}

fn parse_atoms(lines: &[&str], range: Range<usize>) -> Result<Vec<Atom>, FormatError> {
    info!("Parsing atoms...");
    let mut atoms = Vec::new();
    for idx in range {
        let line = lines[idx];
        if line.is_empty() {
            continue;
        }
        let line_num = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let label = token(&tokens, 0, line_num, "atom label")?;
        let atomic_number = parse_int(
            token(&tokens, 2, line_num, "atomic number")?,
            line_num,
            "atomic number",
        )?;
        let x = parse_float(token(&tokens, 3, line_num, "x")?, line_num, "x")?;
        let y = parse_float(token(&tokens, 4, line_num, "y")?, line_num, "y")?;
        let z = parse_float(token(&tokens, 5, line_num, "z")?, line_num, "z")?;

        atoms.push(Atom::new(label, atomic_number, Point3::new(x, y, z)));
    }
    info!("Parsed {} atoms.", atoms.len());
    Ok(atoms)
}

/// Walks a section line by line, reporting 1-based line numbers.
struct LineCursor<'l, 'a> {
    lines: &'l [&'a str],
    pos: usize,
    end: usize,
    section: &'static str,
}

impl<'l, 'a> LineCursor<'l, 'a> {
    fn new(lines: &'l [&'a str], range: Range<usize>, section: &'static str) -> Self {
        Self {
            lines,
            pos: range.start,
            end: range.end,
            section,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        (self.pos < self.end).then(|| self.lines[self.pos])
    }

    fn next_line(&mut self) -> Result<(usize, &'a str), FormatError> {
        let line = self.peek().ok_or(FormatError::UnexpectedEnd {
            section: self.section,
        })?;
        self.pos += 1;
        Ok((self.pos, line))
    }

    fn next_non_blank(&mut self) -> Result<(usize, &'a str), FormatError> {
        loop {
            let (num, line) = self.next_line()?;
            if !line.is_empty() {
                return Ok((num, line));
            }
        }
    }
}

fn parse_shells(
    lines: &[&str],
    range: Range<usize>,
    atoms: &[Atom],
) -> Result<Vec<Shell>, FormatError> {
    info!("Parsing GTO shells...");
    let mut cursor = LineCursor::new(lines, range, GTO_MARKER);
    let mut shells = Vec::new();

    for (atom_index, atom) in atoms.iter().enumerate() {
        debug!("Parsing GTOs for atom {} ({}).", atom_index, atom.label);
        cursor.next_non_blank()?;

        while let Some(line) = cursor.peek() {
            if line.starts_with('[') {
                break;
            }
            let (line_num, _) = cursor.next_line()?;
            if line.is_empty() {
                break;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let label = token(&tokens, 0, line_num, "shell label")?;
            let angular_momentum =
                AngularMomentum::from_label(label).ok_or_else(|| FormatError::UnsupportedShell {
                    line: line_num,
                    label: label.to_string(),
                })?;
            let num_primitives: usize = parse_int(
                token(&tokens, 1, line_num, "primitive count")?,
                line_num,
                "primitive count",
            )?;

            let mut primitives = Vec::with_capacity(num_primitives);
            for _ in 0..num_primitives {
                let (prim_num, prim_line) = cursor.next_line()?;
                let prim_tokens: Vec<&str> = prim_line.split_whitespace().collect();
                let exponent = parse_float(
                    token(&prim_tokens, 0, prim_num, "exponent")?,
                    prim_num,
                    "exponent",
                )?;
                let coefficient = parse_float(
                    token(&prim_tokens, 1, prim_num, "contraction coefficient")?,
                    prim_num,
                    "contraction coefficient",
                )?;
                primitives.push(GaussianPrimitive::new(exponent, coefficient));
            }

            shells.push(Shell::new(atom_index, angular_momentum, primitives));
        }
    }

    info!("Parsed {} GTO shells.", shells.len());
    Ok(shells)
}

/// `key= value` records preceding an orbital's coefficients.
struct OrbitalHeader {
    symmetry: String,
    energy: Option<f64>,
    spin: Spin,
    occupation: f64,
}

fn record_value(line: &str) -> &str {
    line.split_once('=').map_or("", |(_, value)| value.trim())
}

fn read_orbital_header(
    cursor: &mut LineCursor<'_, '_>,
) -> Result<(usize, OrbitalHeader), FormatError> {
    let (sym_num, sym_line) = cursor.next_non_blank()?;
    if !sym_line.starts_with(SYMMETRY_KEY) {
        return Err(FormatError::Parse {
            line: sym_num,
            kind: ParseErrorKind::MissingField { field: "Sym=" },
        });
    }
    let mut header = OrbitalHeader {
        symmetry: record_value(sym_line).to_string(),
        energy: None,
        spin: Spin::Unknown,
        occupation: 0.0,
    };

    while let Some(line) = cursor.peek() {
        if !line.contains('=') {
            break;
        }
        let (line_num, _) = cursor.next_line()?;
        let key = line.split('=').next().unwrap_or("").trim().to_ascii_lowercase();
        let value = record_value(line);
        match key.as_str() {
            "ene" => header.energy = Some(parse_float(value, line_num, "Ene=")?),
            "occup" => header.occupation = parse_float(value, line_num, "Occup=")?,
            "spin" => header.spin = value.parse().unwrap_or_default(),
            _ => {}
        }
    }
    Ok((sym_num, header))
}

fn parse_orbitals(
    lines: &[&str],
    range: Range<usize>,
    shells: &[Shell],
    filter: Option<&[usize]>,
) -> Result<(Vec<MolecularOrbital>, DMatrix<f64>), FormatError> {
    info!("Parsing MO coefficients...");
    let num_aos = atomic_orbital_count(shells);
    let order = canonical_order(shells);
    let total_mos = lines[range.clone()]
        .iter()
        .filter(|l| l.contains(SYMMETRY_KEY))
        .count();

    let selected: Option<HashSet<usize>> = match filter {
        Some([]) => {
            return Err(ValidationError::new(
                "orbital_filter",
                "a non-empty list of orbital indices",
                "an empty list",
            )
            .into());
        }
        Some(indices) => {
            if let Some(bad) = indices.iter().find(|&&i| i >= total_mos) {
                return Err(ValidationError::new(
                    "orbital_filter",
                    format!("indices below {}", total_mos),
                    bad,
                )
                .into());
            }
            Some(indices.iter().copied().collect())
        }
        None => None,
    };

    let mut cursor = LineCursor::new(lines, range, MO_MARKER);
    let mut orbitals = Vec::new();
    let mut rows: Vec<f64> = Vec::new();
    let mut file_coeffs = vec![0.0; num_aos];

    for mo_index in 0..total_mos {
        let keep = selected.as_ref().is_none_or(|s| s.contains(&mo_index));
        let (sym_num, header) = read_orbital_header(&mut cursor)?;

        for coeff in file_coeffs.iter_mut() {
            let (line_num, line) = cursor.next_non_blank()?;
            if !keep {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            *coeff = parse_float(
                token(&tokens, 1, line_num, "MO coefficient")?,
                line_num,
                "MO coefficient",
            )?;
        }
        if !keep {
            continue;
        }

        debug!("Parsed MO {} ({}).", mo_index, header.symmetry);
        let energy = header.energy.ok_or(FormatError::Parse {
            line: sym_num,
            kind: ParseErrorKind::MissingField { field: "Ene=" },
        })?;
        rows.extend(order.iter().map(|&file_idx| file_coeffs[file_idx]));
        orbitals.push(MolecularOrbital {
            symmetry: header.symmetry,
            spin: header.spin,
            occupation: header.occupation,
            energy,
            index: orbitals.len(),
        });
    }

    info!("Parsed {} of {} MOs.", orbitals.len(), total_mos);
    let coefficients = DMatrix::from_row_slice(orbitals.len(), num_aos, &rows);
    Ok((orbitals, coefficients))
}

#[cfg(test)]
mod tests {
    use super::*;

    const H2_MOLDEN: &str = "\
[Molden Format]
[Atoms] AU
H 1 1 0.0 0.0 0.0
H 2 1 0.0 0.0 1.4
[GTO]
1 0
s 1 1.00
1.0 1.0
p 1 1.00
0.8D+00 1.0

2 0
s 1 1.00
1.0 1.0

[5D]
[MO]
Sym= 1a
Ene= -0.5
Spin= Alpha
Occup= 2.0
1 0.5
2 0.1
3 0.2
4 0.3
5 0.6
Sym= 2a
Ene= 0.25
Spin= Alpha
Occup= 0.0
1 -0.5
2 0.0
3 0.0
4 0.0
5 0.5
";

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    fn parse(text: &str, options: &ParseOptions) -> Result<MoldenData, FormatError> {
        MoldenFile::parse_lines(&lines(text), options)
    }

    #[test]
    fn parses_atoms_shells_and_orbitals() {
        let data = parse(H2_MOLDEN, &ParseOptions::default()).unwrap();

        assert_eq!(data.atoms().len(), 2);
        assert_eq!(data.atoms()[1].position, Point3::new(0.0, 0.0, 1.4));
        assert_eq!(data.unit(), CoordinateUnit::Bohr);
        assert_eq!(data.shells().len(), 3);
        assert_eq!(data.atom_shells(0).len(), 2);
        assert!((data.shells()[1].primitives[0].exponent - 0.8).abs() < 1e-15);
        assert_eq!(data.num_atomic_orbitals(), 5);
        assert_eq!(data.num_orbitals(), 2);

        let mo = &data.orbitals()[0];
        assert_eq!(mo.symmetry, "1a");
        assert_eq!(mo.spin, Spin::Alpha);
        assert_eq!(mo.occupation, 2.0);
        assert_eq!(mo.energy, -0.5);
    }

    #[test]
    fn p_coefficients_are_stored_in_canonical_order() {
        let data = parse(H2_MOLDEN, &ParseOptions::default()).unwrap();
        let row = data.orbital_coefficients(0).unwrap();
        // file: s=0.5, p(x,y,z)=(0.1,0.2,0.3), s=0.6 -> canonical p(m=-1,0,+1)=(y,z,x)
        assert_eq!(row.as_slice(), &[0.5, 0.2, 0.3, 0.1, 0.6]);
    }

    #[test]
    fn orbital_filter_skips_unselected_coefficients() {
        let options = ParseOptions {
            orbital_filter: Some(vec![1]),
            ..Default::default()
        };
        let data = parse(H2_MOLDEN, &options).unwrap();
        assert_eq!(data.num_orbitals(), 1);
        assert_eq!(data.orbitals()[0].symmetry, "2a");
        assert_eq!(data.orbitals()[0].index, 0);
        assert_eq!(
            data.orbital_coefficients(0).unwrap().as_slice(),
            &[-0.5, 0.0, 0.0, 0.0, 0.5]
        );
    }

    #[test]
    fn empty_or_out_of_range_filter_is_rejected() {
        let options = ParseOptions {
            orbital_filter: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(parse(H2_MOLDEN, &options), Err(FormatError::InvalidOption(_))));

        let options = ParseOptions {
            orbital_filter: Some(vec![2]),
            ..Default::default()
        };
        assert!(matches!(parse(H2_MOLDEN, &options), Err(FormatError::InvalidOption(_))));
    }

    #[test]
    fn sort_by_energy_orders_orbital_list() {
        let text = H2_MOLDEN.replace("Ene= 0.25", "Ene= -2.0");
        let options = ParseOptions {
            sort_by_energy: true,
            ..Default::default()
        };
        let data = parse(&text, &options).unwrap();
        assert_eq!(data.orbitals()[0].symmetry, "2a");
        assert_eq!(data.orbitals()[0].index, 1);
    }

    #[test]
    fn missing_mo_section_is_reported_before_extraction() {
        let text = H2_MOLDEN.replace("[MO]", "");
        let err = parse(&text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::MissingSection { marker: "[MO]" }));
        assert!(err.to_string().contains("[MO]"));
    }

    #[test]
    fn missing_gto_and_atoms_sections_are_reported() {
        let text = H2_MOLDEN.replace("[GTO]", "");
        assert!(matches!(
            parse(&text, &ParseOptions::default()),
            Err(FormatError::MissingSection { marker: "[GTO]" })
        ));

        let text = H2_MOLDEN.replace("[Atoms] AU", "");
        assert!(matches!(
            parse(&text, &ParseOptions::default()),
            Err(FormatError::MissingSection { marker: "[Atoms]" })
        ));
    }

    #[test]
    fn cartesian_basis_is_rejected() {
        let text = H2_MOLDEN.replace("[5D]", "");
        assert!(matches!(
            parse(&text, &ParseOptions::default()),
            Err(FormatError::UnsupportedConvention)
        ));
    }

    #[test]
    fn both_atom_unit_markers_are_ambiguous() {
        let text = H2_MOLDEN.replace("[Molden Format]", "[Atoms] Angs");
        assert!(matches!(
            parse(&text, &ParseOptions::default()),
            Err(FormatError::AmbiguousAtomsSection)
        ));
    }

    #[test]
    fn unsupported_shell_letter_is_rejected() {
        let text = H2_MOLDEN.replace("p 1 1.00", "h 1 1.00");
        let err = parse(&text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedShell { line: 9, ref label } if label == "h"));
    }

    #[test]
    fn malformed_coordinate_reports_line_and_field() {
        let text = H2_MOLDEN.replace("0.0 0.0 1.4", "0.0 0.0 abc");
        let err = parse(&text, &ParseOptions::default()).unwrap_err();
        match err {
            FormatError::Parse {
                line,
                kind: ParseErrorKind::InvalidFloat { field, value },
            } => {
                assert_eq!(line, 4);
                assert_eq!(field, "z");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncated_orbital_block_is_an_unexpected_end() {
        let text: String = H2_MOLDEN.lines().take(33).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            parse(&text, &ParseOptions::default()),
            Err(FormatError::UnexpectedEnd { section: "[MO]" })
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            MoldenFile::parse_lines::<String>(&[], &ParseOptions::default()),
            Err(FormatError::Empty)
        ));
    }

    #[test]
    fn molecule_only_needs_only_atoms() {
        let text = "[Atoms] Angs\nC 1 6 0.0 0.0 0.0\nO 2 8 0.0 0.0 1.2\n";
        let options = ParseOptions {
            only_molecule: true,
            ..Default::default()
        };
        let data = parse(text, &options).unwrap();
        assert!(data.is_molecule_only());
        assert_eq!(data.unit(), CoordinateUnit::Angstrom);
        assert_eq!(data.atoms()[1].atomic_number, 8);
    }

    #[test]
    fn source_requires_exactly_one_input() {
        assert!(matches!(
            MoldenSource::from_options(Some("a.molden".into()), Some(vec!["x".into()])),
            Err(FormatError::InvalidSource(_))
        ));
        assert!(matches!(
            MoldenSource::from_options(None, None),
            Err(FormatError::InvalidSource(_))
        ));
        assert!(matches!(
            MoldenSource::from_options(None, Some(vec![])),
            Err(FormatError::InvalidSource(_))
        ));
        assert_eq!(
            MoldenSource::from_options(None, Some(vec!["[Atoms] AU".into()])).unwrap(),
            MoldenSource::Lines(vec!["[Atoms] AU".into()])
        );
    }

    #[test]
    fn read_from_path_reports_missing_file() {
        let err = MoldenFile::read_from_path("/nonexistent/file.molden", &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, FormatError::Io { .. }));
    }

    #[test]
    fn read_from_reader_matches_line_parsing() {
        let mut reader = io::Cursor::new(H2_MOLDEN.as_bytes());
        let from_reader = MoldenFile::read_from(&mut reader, &ParseOptions::default()).unwrap();
        let from_lines = parse(H2_MOLDEN, &ParseOptions::default()).unwrap();
        assert_eq!(from_reader, from_lines);
    }
}
