//! A software implementation of a fixed-function rendering pipeline, with shading stages written in Rust.
//!
//! Triangles streamed from a [`Geometry`] are carried through a [`Shader`]'s vertex stage to screen space by the
//! camera, projection and viewport matrices, rasterized against a persistent [`DepthBuffer`], and shaded one pixel
//! at a time by the shader's fragment stage into a [`PixelSink`].
//!
//! ```no_run
//! use pinhole::{assets::PhongAssets, RenderConfig, RenderContext, Framebuffer};
//!
//! # fn main() -> pinhole::Result<()> {
//! let config = RenderConfig::default();
//! let assets = PhongAssets::load_blocking(&config.assets)?;
//! let mut shader = assets.phong_shader(config.light(), config.camera.eye);
//!
//! let mut ctx = RenderContext::from_config(&config);
//! let mut frame = Framebuffer::new(config.size(), [0; 3]);
//! ctx.draw_model(&assets.model, &mut shader, &mut frame)?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod buffer;
pub mod camera;
pub mod config;
pub mod context;
pub mod error;
pub mod interpolate;
pub mod math;
pub mod model;
pub mod rasterizer;
pub mod sampler;
pub mod shader;
pub mod target;
pub mod texture;

// Reexports
pub use self::{
    buffer::{Buffer2d, DepthBuffer},
    camera::Camera,
    config::{RenderConfig, ShadingMode},
    context::RenderContext,
    error::{Error, Result},
    interpolate::Interpolate,
    math::{Mat4, Vec3},
    model::{Geometry, Model},
    rasterizer::DrawStats,
    sampler::{Nearest, Sampler},
    shader::{FlatShader, Fragment, GouraudShader, PhongShader, Shader, Uniforms},
    target::{Framebuffer, PixelSink},
    texture::{decode_tga, Texture, TextureBuffer},
};
