pub mod netcdf_writer;

pub use netcdf_writer::NetcdfWriter;
