use super::read_molden;
use crate::cli::InspectArgs;
use crate::error::Result;
use moldentab::core::io::molden::ParseOptions;
use moldentab::core::models::atom::CoordinateUnit;
use moldentab::core::models::molecule::MoldenData;
use moldentab::workflows::export;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let options = ParseOptions {
        only_molecule: args.only_molecule,
        sort_by_energy: args.sort,
        ..Default::default()
    };
    let data = read_molden(&args.input, &options)?;

    let stdout = io::stdout();
    render(&data, &mut stdout.lock())?;

    if let Some(csv_path) = &args.csv {
        if data.is_molecule_only() {
            info!("No orbitals were read; skipping the CSV summary.");
        } else {
            export::write_summary(&data, csv_path)?;
            println!("Orbital summary written to: {}", csv_path.display());
        }
    }
    Ok(())
}

/// Prints atoms, their shells and the orbital table.
pub fn render(data: &MoldenData, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Atoms ({}, coordinates in {}):",
        data.atoms().len(),
        match data.unit() {
            CoordinateUnit::Bohr => "bohr",
            CoordinateUnit::Angstrom => "angstrom",
        }
    )?;
    for (i, atom) in data.atoms().iter().enumerate() {
        let shells: String = data
            .atom_shells(i)
            .iter()
            .map(|shell| shell.angular_momentum.label())
            .collect();
        writeln!(
            out,
            "{:>5} {:<4} {:>3} {:>12.6} {:>12.6} {:>12.6}  {}",
            i + 1,
            atom.label,
            atom.atomic_number,
            atom.position.x,
            atom.position.y,
            atom.position.z,
            shells
        )?;
    }

    if data.is_molecule_only() {
        return Ok(());
    }

    writeln!(
        out,
        "\nBasis: {} shells, {} atomic orbitals",
        data.shells().len(),
        data.num_atomic_orbitals()
    )?;
    writeln!(out, "\nOrbitals ({}):", data.num_orbitals())?;
    writeln!(
        out,
        "{:>5} {:<10} {:<7} {:>10} {:>14}",
        "index", "symmetry", "spin", "occup", "energy"
    )?;
    for (i, mo) in data.orbitals().iter().enumerate() {
        writeln!(
            out,
            "{:>5} {:<10} {:<7} {:>10.4} {:>14.6}",
            i,
            mo.symmetry,
            mo.spin.to_string(),
            mo.occupation,
            mo.energy
        )?;
    }
    Ok(())
}
