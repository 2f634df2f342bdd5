//! Shared constants and helpers for the EXOR mesh exporter.

pub mod fs;
pub mod mesh_format;

pub use mesh_format::{MeshFormat, EXOR_MESH_FORMAT};
