//! Plain CSV export, one line per grid cell.

use std::io::{self, Write};

use crate::fields::FieldMap;

/// Writes `x,z,bx,bz,v` for every cell, `z` varying fastest.
///
/// Singular cells are written as `NaN`.
pub fn write_field_csv<W: Write>(mut w: W, map: &FieldMap) -> io::Result<()> {
    writeln!(w, "x,z,bx,bz,v")?;
    for (_, point, sample) in map.cells() {
        writeln!(
            w,
            "{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
            point.x, point.y, sample.bx, sample.bz, sample.v
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Charge, ChargeSet, FieldEvaluator, FieldSource};
    use crate::grid::Grid;

    #[test]
    fn writes_header_and_one_line_per_cell() {
        let set = ChargeSet::from_charges(vec![Charge::new(0.0, 1.0, 1.0), Charge::new(0.0, -1.0, -1.0)]).unwrap();
        let grid = Grid::from_axes(vec![-1.0, 1.0], vec![0.0, 1.0]).unwrap();
        let map = FieldEvaluator::new(FieldSource::from(set)).evaluate(&grid);

        let mut out = Vec::new();
        write_field_csv(&mut out, &map).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "x,z,bx,bz,v");
        assert!(lines[1].starts_with("-1.0000000000000000e0,0.0000000000000000e0,"));
        assert_eq!(lines[1].split(',').count(), 5);
    }
}
