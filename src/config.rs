//! Scene configuration, stored as RON.
//!
//! ```ron
//! (
//!     width: 800,
//!     height: 800,
//!     camera: (
//!         eye: (x: 0.0, y: 0.0, z: 1.0),
//!         target: (x: 0.0, y: 0.0, z: 0.0),
//!         up: (x: 0.0, y: 1.0, z: 0.0),
//!     ),
//!     light_dir: (x: 1.0, y: 0.0, z: 1.0),
//!     shading: Phong,
//!     assets: (
//!         model: "african_head.obj",
//!         diffuse: "african_head_diffuse.tga",
//!         normal: "african_head_nm_tangent.tga",
//!         specular: "african_head_spec.tga",
//!     ),
//! )
//! ```
//!
//! Every field is optional and falls back to the value shown.

use crate::{
    buffer::DepthBuffer,
    camera::{viewport, Camera},
    math::{Mat4, Vec3},
    shader::Uniforms,
    Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The shading model used to draw the scene's model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadingMode {
    /// One light level per face, see [`crate::shader::FlatShader`].
    Flat,
    /// Per-vertex diffuse lighting, see [`crate::shader::GouraudShader`].
    Gouraud,
    /// Per-pixel normal-mapped lighting, see [`crate::shader::PhongShader`].
    Phong,
}

impl Default for ShadingMode {
    fn default() -> Self {
        ShadingMode::Phong
    }
}

/// Where the scene's model and textures are read from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub model: PathBuf,
    pub diffuse: PathBuf,
    pub normal: PathBuf,
    pub specular: PathBuf,
}

impl AssetPaths {
    /// Resolve relative paths against `dir`. Absolute paths are kept.
    pub fn relative_to(&self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(&self.model),
            diffuse: dir.join(&self.diffuse),
            normal: dir.join(&self.normal),
            specular: dir.join(&self.specular),
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            model: "african_head.obj".into(),
            diffuse: "african_head_diffuse.tga".into(),
            normal: "african_head_nm_tangent.tga".into(),
            specular: "african_head_spec.tga".into(),
        }
    }
}

/// A description of one rendered frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub camera: Camera,
    /// Direction towards the light. Normalised before use.
    pub light_dir: Vec3,
    pub shading: ShadingMode,
    /// The depth every pixel starts at. Fragments must be nearer (larger) than this to be drawn.
    pub depth_clear: f32,
    pub assets: AssetPaths,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            camera: Camera::default(),
            light_dir: Vec3::new(1.0, 0.0, 1.0),
            shading: ShadingMode::default(),
            depth_clear: DepthBuffer::DEFAULT_CLEAR,
            assets: AssetPaths::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, Default::default())?)
    }

    /// Read a configuration file. Relative asset paths are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_ron_str(&std::fs::read_to_string(path)?)?;
        if let Some(dir) = path.parent() {
            config.assets = config.assets.relative_to(dir);
        }
        log::debug!("Loaded render config from {}", path.display());
        Ok(config)
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// The normalised light direction.
    pub fn light(&self) -> Vec3 {
        self.light_dir.normalize()
    }

    /// The viewport covering the whole framebuffer.
    pub fn viewport(&self) -> Mat4 {
        viewport(0.0, 0.0, self.width as f32, self.height as f32)
    }

    pub fn uniforms(&self) -> Uniforms {
        Uniforms::new(self.camera.view(), self.camera.projection(), self.viewport())
    }

    pub fn depth_buffer(&self) -> DepthBuffer {
        DepthBuffer::new(self.size(), self.depth_clear)
    }
}
