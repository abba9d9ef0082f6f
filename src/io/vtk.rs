//! Legacy ASCII VTK export for ParaView and other VTK-based viewers.
//!
//! The `(x, z)` plane is written as a `RECTILINEAR_GRID` of dimensions
//! `nx x 1 x nz`, with `V` as point scalars and `(Bx, 0, Bz)` as point vectors.

use std::io::{self, Write};

use crate::fields::FieldMap;
use crate::math::Scalar;

/// Writes the VTK ASCII file header.
pub fn write_vtk_header<W: Write>(mut writer: W, title: &str) -> io::Result<()> {
    writeln!(writer, "# vtk DataFile Version 3.0")?;
    writeln!(writer, "{}", title.lines().next().unwrap_or_default())?;
    writeln!(writer, "ASCII")?;
    Ok(())
}

fn write_axis<W: Write>(writer: &mut W, name: &str, values: &[Scalar]) -> io::Result<()> {
    writeln!(writer, "{name}_COORDINATES {} double", values.len())?;
    let line: Vec<String> = values.iter().map(|v| format!("{v:e}")).collect();
    writeln!(writer, "{}", line.join(" "))
}

/// Writes a complete legacy VTK file for `map`.
///
/// Points are ordered with `x` varying fastest, as VTK expects.
pub fn write_vtk_rectilinear<W: Write>(mut writer: W, title: &str, map: &FieldMap) -> io::Result<()> {
    let (nx, nz) = map.shape();
    write_vtk_header(&mut writer, title)?;
    writeln!(writer, "DATASET RECTILINEAR_GRID")?;
    writeln!(writer, "DIMENSIONS {nx} 1 {nz}")?;
    write_axis(&mut writer, "X", map.grid.xs())?;
    write_axis(&mut writer, "Y", &[0.0])?;
    write_axis(&mut writer, "Z", map.grid.zs())?;

    writeln!(writer, "POINT_DATA {}", nx * nz)?;
    writeln!(writer, "SCALARS V double 1")?;
    writeln!(writer, "LOOKUP_TABLE default")?;
    for j in 0..nz {
        for i in 0..nx {
            writeln!(writer, "{:e}", map.v[(i, j)])?;
        }
    }
    writeln!(writer, "VECTORS B double")?;
    for j in 0..nz {
        for i in 0..nx {
            writeln!(writer, "{:e} 0 {:e}", map.bx[(i, j)], map.bz[(i, j)])?;
        }
    }
    Ok(())
}
