//! Writers that hand field maps to external plotting and visualization tools.

pub mod csv;
pub mod vtk;

pub use csv::write_field_csv;
pub use vtk::write_vtk_rectilinear;
