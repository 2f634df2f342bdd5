//! Axis identifiers and orientation conversion.
//!
//! The host works in a right-handed, Y-forward/Z-up space. A target space is
//! described by its forward and up axes; the right axis is implied by
//! `forward x up`.

use std::fmt;
use std::str::FromStr;

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Signed coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "X")]
    X,
    #[serde(rename = "Y")]
    Y,
    #[serde(rename = "Z")]
    Z,
    #[serde(rename = "-X")]
    NegX,
    #[serde(rename = "-Y")]
    NegY,
    #[serde(rename = "-Z")]
    NegZ,
}

impl Axis {
    pub const ALL: [Axis; 6] = [Axis::X, Axis::Y, Axis::Z, Axis::NegX, Axis::NegY, Axis::NegZ];

    /// Host identifier ("X", "-Z", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::NegX => "-X",
            Axis::NegY => "-Y",
            Axis::NegZ => "-Z",
        }
    }

    /// Unsigned axis index (0 = X, 1 = Y, 2 = Z)
    pub fn index(self) -> usize {
        match self {
            Axis::X | Axis::NegX => 0,
            Axis::Y | Axis::NegY => 1,
            Axis::Z | Axis::NegZ => 2,
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
            Axis::NegX => Vec3::NEG_X,
            Axis::NegY => Vec3::NEG_Y,
            Axis::NegZ => Vec3::NEG_Z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "X" | "+X" => Ok(Axis::X),
            "Y" | "+Y" => Ok(Axis::Y),
            "Z" | "+Z" => Ok(Axis::Z),
            "-X" | "NEG-X" | "NEG_X" => Ok(Axis::NegX),
            "-Y" | "NEG-Y" | "NEG_Y" => Ok(Axis::NegY),
            "-Z" | "NEG-Z" | "NEG_Z" => Ok(Axis::NegZ),
            _ => Err(format!("Unknown axis: {} (expected X, Y, Z, -X, -Y or -Z)", s)),
        }
    }
}

/// Orthonormal frame whose columns are (right, forward, up).
fn frame(forward: Axis, up: Axis) -> Result<Mat3> {
    if forward.index() == up.index() {
        return Err(ExportError::configuration(format!(
            "forward axis {} and up axis {} must be different",
            forward, up
        )));
    }
    let f = forward.to_vec3();
    let u = up.to_vec3();
    Ok(Mat3::from_cols(f.cross(u), f, u))
}

/// Rotation taking vectors from one (forward, up) space to another.
pub fn axis_conversion(
    from_forward: Axis,
    from_up: Axis,
    to_forward: Axis,
    to_up: Axis,
) -> Result<Mat3> {
    let from = frame(from_forward, from_up)?;
    let to = frame(to_forward, to_up)?;
    if from_forward == to_forward && from_up == to_up {
        return Ok(Mat3::IDENTITY);
    }
    // Frames are orthonormal, so the transpose is the inverse.
    Ok(to * from.transpose())
}

/// Global export matrix from the host's Y-forward/Z-up space.
pub fn global_matrix(to_forward: Axis, to_up: Axis) -> Result<Mat4> {
    axis_conversion(Axis::Y, Axis::Z, to_forward, to_up).map(Mat4::from_mat3)
}
