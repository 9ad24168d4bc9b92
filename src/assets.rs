//! Reading models and textures from disk.
//!
//! Asset data problems are logged and worked around: OBJ statements as described in [`crate::model`], and textures
//! that cannot be decoded are replaced by a single black texel. Only failing to read a file at all is an error.

use crate::{
    config::AssetPaths,
    math::Vec3,
    model::Model,
    sampler::Nearest,
    shader::{FlatShader, GouraudShader, PhongShader},
    texture::{decode_tga, TextureBuffer},
    Result,
};
use std::path::Path;

fn parse_model(text: &str, path: &Path) -> Model {
    let parsed = Model::parse(text);
    if !parsed.issues.is_empty() {
        log::warn!("{}: skipped {} malformed statements", path.display(), parsed.issues.len());
    }
    parsed.model
}

fn decode_texture(data: &[u8], path: &Path) -> TextureBuffer {
    let blank = || TextureBuffer::fill([1, 1], [0, 0, 0, 255]);
    match decode_tga(data) {
        Ok(texture) if texture.width() > 0 && texture.height() > 0 => texture,
        Ok(_) => {
            log::warn!("{}: texture is empty, using a blank texel", path.display());
            blank()
        }
        Err(err) => {
            log::warn!("{}: {}, using a blank texel", path.display(), err);
            blank()
        }
    }
}

/// Read an OBJ model.
pub fn load_model(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    Ok(parse_model(&text, path))
}

/// Read a TGA texture.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureBuffer> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    Ok(decode_texture(&data, path))
}

/// Read an OBJ model without blocking the calling task.
#[cfg(feature = "async")]
pub async fn load_model_async(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    Ok(parse_model(&text, path))
}

/// Read a TGA texture without blocking the calling task.
#[cfg(feature = "async")]
pub async fn load_texture_async(path: impl AsRef<Path>) -> Result<TextureBuffer> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    Ok(decode_texture(&data, path))
}

/// A model and the textures a normal-mapped scene samples.
#[derive(Clone, Debug)]
pub struct PhongAssets {
    pub model: Model,
    pub diffuse: TextureBuffer,
    pub normal: TextureBuffer,
    pub specular: TextureBuffer,
}

impl PhongAssets {
    /// Read every asset, one after the other: the model, then the diffuse, normal and specular maps.
    ///
    /// The first file that cannot be read stops the chain; nothing after it is attempted.
    #[cfg(feature = "async")]
    pub async fn load(paths: &AssetPaths) -> Result<Self> {
        let model = load_model_async(&paths.model).await?;
        let diffuse = load_texture_async(&paths.diffuse).await?;
        let normal = load_texture_async(&paths.normal).await?;
        let specular = load_texture_async(&paths.specular).await?;
        log::info!("Loaded {} faces and 3 textures", model.faces().len());
        Ok(Self {
            model,
            diffuse,
            normal,
            specular,
        })
    }

    /// Read every asset on the calling thread, in the same order as [`PhongAssets::load`].
    pub fn load_blocking(paths: &AssetPaths) -> Result<Self> {
        Ok(Self {
            model: load_model(&paths.model)?,
            diffuse: load_texture(&paths.diffuse)?,
            normal: load_texture(&paths.normal)?,
            specular: load_texture(&paths.specular)?,
        })
    }

    pub fn flat_shader(&self, light_dir: Vec3) -> FlatShader<Nearest<&TextureBuffer>> {
        FlatShader::with_diffuse(Some(Nearest::new(&self.diffuse))).with_light(light_dir)
    }

    pub fn gouraud_shader(&self, light_dir: Vec3) -> GouraudShader<Nearest<&TextureBuffer>> {
        GouraudShader::new(Nearest::new(&self.diffuse), light_dir)
    }

    pub fn phong_shader(&self, light_dir: Vec3, camera_pos: Vec3) -> PhongShader<Nearest<&TextureBuffer>> {
        PhongShader::new(
            Nearest::new(&self.diffuse),
            Nearest::new(&self.normal),
            light_dir,
            camera_pos,
        )
        .with_specular(Nearest::new(&self.specular))
    }
}
