use super::numeric::Scientific;
use super::traits::{FieldFile, ScalarField, WriteError};
use std::io::Write;
use tracing::debug;

const PRECISION: usize = 10;

/// Legacy ASCII VTK writer producing a `STRUCTURED_GRID` data set.
///
/// The dimensions are written in reverse (`n3 n2 n1`) because VTK varies its first
/// dimension fastest while grid points vary their last axis fastest. Each field column
/// becomes a `SCALARS mo_<index>` point-data array.
pub struct VtkFile;

impl FieldFile for VtkFile {
    type Error = WriteError;

    fn write_to(field: &ScalarField<'_>, writer: &mut impl Write) -> Result<(), Self::Error> {
        field.validate()?;
        let [n1, n2, n3] = field.dimensions;
        let num_points = field.points.len();
        debug!(
            "Writing VTK structured grid with dimensions {} {} {}.",
            n3, n2, n1
        );

        writeln!(writer, "# vtk DataFile Version 3.0")?;
        writeln!(writer, "Molecular orbitals tabulated by moldentab")?;
        writeln!(writer, "ASCII")?;
        writeln!(writer, "DATASET STRUCTURED_GRID")?;
        writeln!(writer, "DIMENSIONS {} {} {}", n3, n2, n1)?;
        writeln!(writer, "POINTS {} double", num_points)?;
        for p in field.points {
            writeln!(
                writer,
                "{} {} {}",
                Scientific::new(p.x, PRECISION),
                Scientific::new(p.y, PRECISION),
                Scientific::new(p.z, PRECISION)
            )?;
        }

        if field.values.ncols() == 0 {
            return Ok(());
        }
        writeln!(writer, "POINT_DATA {}", num_points)?;
        for (column, label) in field.values.column_iter().zip(field.labels) {
            writeln!(writer, "SCALARS mo_{} double 1", label)?;
            writeln!(writer, "LOOKUP_TABLE default")?;
            for value in column.iter() {
                writeln!(writer, "{}", Scientific::new(*value, PRECISION))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, Point3};

    fn render(field: &ScalarField<'_>) -> String {
        let mut buffer = Vec::new();
        VtkFile::write_to(field, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn writes_reversed_dimensions_and_named_arrays() {
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)];
        let values = DMatrix::from_row_slice(2, 2, &[0.5, 1.0, -0.25, 2.0]);
        let field = ScalarField {
            points: &points,
            dimensions: [1, 1, 2],
            axes: None,
            values: &values,
            labels: &[3, 7],
            atoms: &[],
        };

        let text = render(&field);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[3], "DATASET STRUCTURED_GRID");
        assert_eq!(lines[4], "DIMENSIONS 2 1 1");
        assert_eq!(lines[5], "POINTS 2 double");
        assert_eq!(
            lines[7],
            "0.0000000000e+00 0.0000000000e+00 1.0000000000e+00"
        );
        assert_eq!(lines[8], "POINT_DATA 2");
        assert_eq!(lines[9], "SCALARS mo_3 double 1");
        assert_eq!(&lines[11..13], &["5.0000000000e-01", "-2.5000000000e-01"]);
        assert_eq!(lines[13], "SCALARS mo_7 double 1");
        assert_eq!(&lines[15..17], &["1.0000000000e+00", "2.0000000000e+00"]);
    }

    #[test]
    fn vanishing_tails_stay_short() {
        let points = vec![Point3::new(1e-200, 0.0, -3.5)];
        let values = DMatrix::from_element(1, 1, 5e-300);
        let field = ScalarField {
            points: &points,
            dimensions: [1, 1, 1],
            axes: None,
            values: &values,
            labels: &[0],
            atoms: &[],
        };

        let text = render(&field);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[6],
            "1.0000000000e-200 0.0000000000e+00 -3.5000000000e+00"
        );
        assert_eq!(lines[10], "5.0000000000e-300");
        assert!(lines.iter().all(|l| l.len() < 64));
    }

    #[test]
    fn rejects_mismatched_labels() {
        let points = vec![Point3::origin()];
        let values = DMatrix::zeros(1, 2);
        let field = ScalarField {
            points: &points,
            dimensions: [1, 1, 1],
            axes: None,
            values: &values,
            labels: &[0],
            atoms: &[],
        };
        let mut buffer = Vec::new();
        assert!(matches!(
            VtkFile::write_to(&field, &mut buffer),
            Err(WriteError::Validation(_))
        ));
    }
}
