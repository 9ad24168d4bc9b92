//! Construction of the view, projection and viewport matrices.
//!
//! Matrices are composed with [`Mat4::multiply`], which applies its left operand first. The model-to-screen
//! transform of a draw call is therefore `multiply(multiply(view, projection), viewport)`.

use crate::math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Build the world-to-camera matrix of a camera at `eye` looking at `target`.
///
/// The camera looks down its own -z axis with `up` giving the rough direction of its +y axis. `up` need not be
/// orthogonal to the view direction, but must not be parallel to it.
pub fn lookat(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let camera_z = (eye - target).normalize();
    let camera_x = up.cross(camera_z).normalize();
    let camera_y = camera_z.cross(camera_x).normalize();

    // The rotation taking world axes onto the camera basis is orthonormal, so its inverse is its transpose
    let mut rotation = Mat4::from_columns_3d(camera_x, camera_y, camera_z);
    rotation.transpose();

    let translation = Mat4::translation_3d(-eye);

    Mat4::multiply(&translation, &rotation)
}

/// A pinhole perspective projection for an eye `distance` units from its target.
///
/// After the perspective divide a point at camera-space depth `z` is scaled by `1 / (1 - z / distance)`. No near or
/// far planes exist and nothing is clipped.
pub fn projection(distance: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.set(3, 2, -1.0 / distance);
    m
}

/// Map the `[-1, 1]` cube onto the pixel rectangle `[x, x + width] x [y, y + height]`, with depth in `[0, 1]`.
pub fn viewport(x: f32, y: f32, width: f32, height: f32) -> Mat4 {
    let to_unit = Mat4::translation_3d(Vec3::broadcast(1.0));
    let halve = Mat4::scaling_3d(Vec3::broadcast(0.5));
    let to_pixels = Mat4::scaling_3d(Vec3::new(width, height, 1.0));
    let offset = Mat4::translation_3d(Vec3::new(x, y, 0.0));

    Mat4::multiply(
        &Mat4::multiply(&Mat4::multiply(&to_unit, &halve), &to_pixels),
        &offset,
    )
}

/// A camera described by its position, the point it looks at and its approximate up direction.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self { eye, target, up }
    }

    pub fn view(&self) -> Mat4 {
        lookat(self.eye, self.target, self.up)
    }

    /// The eye-to-target distance used for the projection.
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    pub fn projection(&self) -> Mat4 {
        projection(self.distance())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::FRONT, Vec3::ZERO, Vec3::UP)
    }
}
