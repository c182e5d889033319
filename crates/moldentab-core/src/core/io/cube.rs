use super::numeric::Scientific;
use super::traits::{FieldFile, ScalarField, WriteError};
use crate::core::error::ValidationError;
use std::io::Write;
use tracing::debug;

const VALUES_PER_LINE: usize = 6;

/// Gaussian cube writer for a single orbital on a Cartesian grid.
pub struct CubeFile;

/// Returns the constant step of an axis, or zero for a single-sample axis.
///
/// # Errors
///
/// Fails when the samples are not strictly increasing or not evenly spaced.
pub fn axis_spacing(axis: &[f64], name: &str) -> Result<f64, ValidationError> {
    if axis.len() <= 1 {
        return Ok(0.0);
    }
    let step = axis[1] - axis[0];
    for pair in axis.windows(2) {
        let diff = pair[1] - pair[0];
        if diff <= 0.0 {
            return Err(ValidationError::new(
                format!("{name}-axis"),
                "strictly increasing values",
                format!("a step of {diff}"),
            ));
        }
        if (diff - step).abs() > 1e-8 + 1e-5 * step.abs() {
            return Err(ValidationError::new(
                format!("{name}-axis"),
                format!("evenly spaced values (step {step})"),
                format!("a step of {diff}"),
            ));
        }
    }
    Ok(step)
}

impl FieldFile for CubeFile {
    type Error = WriteError;

    fn write_to(field: &ScalarField<'_>, writer: &mut impl Write) -> Result<(), Self::Error> {
        field.validate()?;
        let [x, y, z] = field.axes.ok_or_else(|| {
            ValidationError::new("grid", "a Cartesian grid with known axes", "no axes")
        })?;
        if field.values.ncols() != 1 {
            return Err(ValidationError::new(
                "orbital selection",
                "exactly one orbital for cube output",
                field.values.ncols(),
            )
            .into());
        }

        let (dx, dy, dz) = (
            axis_spacing(x, "x")?,
            axis_spacing(y, "y")?,
            axis_spacing(z, "z")?,
        );
        let (nx, ny, nz) = (x.len(), y.len(), z.len());
        if [nx, ny, nz] != field.dimensions || nz == 0 {
            return Err(ValidationError::new(
                "grid axes",
                format!("non-empty axes matching the dimensions {:?}", field.dimensions),
                format!("{:?}", [nx, ny, nz]),
            )
            .into());
        }
        let mo_index = field.labels[0];
        debug!("Writing cube data for MO {} on a {}x{}x{} grid.", mo_index, nx, ny, nz);

        writeln!(writer, "Generated by moldentab")?;
        writeln!(writer, "Molecular orbital {}", mo_index)?;
        writeln!(
            writer,
            "{:5} {:13.6} {:13.6} {:13.6}",
            field.atoms.len(),
            x[0],
            y[0],
            z[0]
        )?;
        writeln!(writer, "{:5} {:13.6} {:13.6} {:13.6}", nx, dx, 0.0, 0.0)?;
        writeln!(writer, "{:5} {:13.6} {:13.6} {:13.6}", ny, 0.0, dy, 0.0)?;
        writeln!(writer, "{:5} {:13.6} {:13.6} {:13.6}", nz, 0.0, 0.0, dz)?;
        for atom in field.atoms {
            let p = atom.position;
            writeln!(
                writer,
                "{:5} {:13.6} {:13.6} {:13.6} {:13.6}",
                atom.atomic_number, 0.0, p.x, p.y, p.z
            )?;
        }

        for run in field.values.as_slice().chunks(nz) {
            for (iz, value) in run.iter().enumerate() {
                write!(writer, " {:>13}", Scientific::new(*value, 5))?;
                if (iz + 1) % VALUES_PER_LINE == 0 || iz + 1 == nz {
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::{DMatrix, Point3};

    fn grid_points(x: &[f64], y: &[f64], z: &[f64]) -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for &xi in x {
            for &yj in y {
                for &zk in z {
                    points.push(Point3::new(xi, yj, zk));
                }
            }
        }
        points
    }

    #[test]
    fn axis_spacing_accepts_uniform_and_single_sample_axes() {
        assert_eq!(axis_spacing(&[0.0, 0.5, 1.0], "x").unwrap(), 0.5);
        assert_eq!(axis_spacing(&[2.0], "y").unwrap(), 0.0);
    }

    #[test]
    fn axis_spacing_rejects_decreasing_or_uneven_axes() {
        let err = axis_spacing(&[1.0, 0.0], "x").unwrap_err();
        assert_eq!(err.field, "x-axis");
        assert!(err.expected.contains("strictly increasing"));

        let err = axis_spacing(&[0.0, 1.0, 3.0], "z").unwrap_err();
        assert!(err.expected.contains("evenly spaced"));
    }

    #[test]
    fn writes_header_atoms_and_one_line_per_short_run() {
        let (x, y, z) = ([-1.0, 1.0], [-1.0, 1.0], [-1.0, 1.0]);
        let points = grid_points(&x, &y, &z);
        let values = DMatrix::from_column_slice(8, 1, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let atoms = vec![Atom::new("H", 1, Point3::new(0.0, 0.0, 0.5))];
        let field = ScalarField {
            points: &points,
            dimensions: [2, 2, 2],
            axes: Some([&x[..], &y[..], &z[..]]),
            values: &values,
            labels: &[4],
            atoms: &atoms,
        };

        let mut buffer = Vec::new();
        CubeFile::write_to(&field, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "Molecular orbital 4");
        assert_eq!(
            lines[2],
            format!("{:5} {:13.6} {:13.6} {:13.6}", 1, -1.0, -1.0, -1.0)
        );
        assert_eq!(
            lines[3],
            format!("{:5} {:13.6} {:13.6} {:13.6}", 2, 2.0, 0.0, 0.0)
        );
        assert!(lines[6].trim_start().starts_with("1 "));
        assert_eq!(lines.len(), 7 + 4);
        assert_eq!(lines[7], "   1.00000e+00   2.00000e+00");
        assert_eq!(lines[10], "   7.00000e+00   8.00000e+00");
    }

    #[test]
    fn long_runs_wrap_after_six_values_without_blank_lines() {
        let x = [0.0];
        let y = [0.0];
        let z: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let points = grid_points(&x, &y, &z);
        let values = DMatrix::from_element(6, 1, 0.5);
        let field = ScalarField {
            points: &points,
            dimensions: [1, 1, 6],
            axes: Some([&x[..], &y[..], &z[..]]),
            values: &values,
            labels: &[0],
            atoms: &[],
        };

        let mut buffer = Vec::new();
        CubeFile::write_to(&field, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let data_lines: Vec<&str> = text.lines().skip(6).collect();
        assert_eq!(data_lines.len(), 1);
        assert_eq!(data_lines[0].split_whitespace().count(), 6);
    }

    #[test]
    fn requires_axes_and_a_single_orbital() {
        let points = vec![Point3::origin()];
        let values = DMatrix::zeros(1, 2);
        let mut field = ScalarField {
            points: &points,
            dimensions: [1, 1, 1],
            axes: None,
            values: &values,
            labels: &[0, 1],
            atoms: &[],
        };
        let mut buffer = Vec::new();
        assert!(matches!(
            CubeFile::write_to(&field, &mut buffer),
            Err(WriteError::Validation(_))
        ));

        let axis = [0.0];
        field.axes = Some([&axis[..], &axis[..], &axis[..]]);
        let err = CubeFile::write_to(&field, &mut buffer).unwrap_err();
        assert!(err.to_string().contains("exactly one orbital"));
    }
}
