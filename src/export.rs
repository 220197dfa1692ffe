use crate::coordinate_system::ScaleUnit;
use crate::error::Error;
use crate::table::{Column, DerivedRow};

use std::io;

/// Writes `rows` as CSV with a header line.
///
/// Fields are quoted only when they contain a comma, quote or line break.
/// Missing values are empty fields and numbers are written unrounded.
pub fn write_csv<W: io::Write>(
    writer: W,
    rows: &[DerivedRow],
    unit: ScaleUnit,
) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(Column::ALL.iter().map(|c| c.header(unit)))?;

    for row in rows {
        wtr.write_record(Column::ALL.iter().map(|c| cell(c.value(row))))?;
    }

    wtr.flush()?;

    Ok(())
}

pub fn to_csv_string(rows: &[DerivedRow], unit: ScaleUnit) -> Result<String, Error> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows, unit)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[inline]
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracked_points::PointId;

    fn row(n: usize) -> DerivedRow {
        DerivedRow {
            id: PointId(n as u64),
            row_number: n,
            frame_number: n as u32 * 2,
            time: 0.1 * n as f64,
            pixel_x: 120.5,
            pixel_y: 80.0,
            world_x: Some(1.205),
            world_y: Some(-0.8),
            vx: None,
            vy: None,
            speed: None,
            ax: None,
            ay: None,
        }
    }

    #[test]
    fn header_and_empty_cells() {
        let csv = to_csv_string(&[row(1)], ScaleUnit::M).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "#,Frame,Time (s),Pixel X,Pixel Y,X (m),Y (m),Vx (m/s),Vy (m/s),Speed (m/s),Ax (m/s²),Ay (m/s²)"
        );
        assert_eq!(lines.next().unwrap(), "1,2,0.1,120.5,80,1.205,-0.8,,,,,");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn floats_are_not_rounded() {
        let mut r = row(3);
        r.vx = Some(1.0 / 3.0);

        let csv = to_csv_string(&[r], ScaleUnit::Cm).unwrap();
        let record = csv.lines().nth(1).unwrap();

        assert!(record.contains("0.3333333333333333"));
        assert!(record.starts_with("3,6,0.30000000000000004,"));
    }

    #[test]
    fn empty_table_is_just_a_header() {
        let csv = to_csv_string(&[], ScaleUnit::In).unwrap();

        assert_eq!(csv.lines().count(), 1);
        assert!(csv.contains("X (in)"));
    }

    #[test]
    fn cells() {
        assert_eq!(cell(None), "");
        assert_eq!(cell(Some(2.0)), "2");
        assert_eq!(cell(Some(-0.25)), "-0.25");
    }
}
