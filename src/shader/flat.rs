use super::*;
use crate::{
    interpolate::Interpolate,
    sampler::{Nearest, Sampler},
    texture::TextureBuffer,
};

/// One light level per face, from the face's geometric normal.
///
/// The face normal is `normalize((p2 - p0) x (p1 - p0))` over the model-space positions, so a counter-clockwise face
/// turned towards a viewer on the +z axis is fully lit by the default light `(0, 0, -1)`. Faces whose intensity is not
/// positive are culled, leaving both colour and depth untouched. Lit faces are a flat grey of `intensity * 255`, or, when a diffuse texture is set, that
/// texture's texel at the interpolated UV.
#[derive(Clone, Debug)]
pub struct FlatShader<S = Nearest<TextureBuffer>> {
    pub diffuse: Option<S>,
    pub light_dir: Vec3,
    positions: [Vec3; 3],
    varying_uv: [Vec3; 3],
    intensity: f32,
}

impl FlatShader {
    /// An untextured flat shader lit from `(0, 0, -1)`.
    pub fn new() -> Self {
        Self::with_diffuse(None)
    }
}

impl Default for FlatShader {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sampler> FlatShader<S> {
    pub const DEFAULT_LIGHT: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    pub fn with_diffuse(diffuse: Option<S>) -> Self {
        Self {
            diffuse,
            light_dir: Self::DEFAULT_LIGHT,
            positions: [Vec3::ZERO; 3],
            varying_uv: [Vec3::ZERO; 3],
            intensity: 0.0,
        }
    }

    pub fn with_light(mut self, light_dir: Vec3) -> Self {
        self.light_dir = light_dir.normalize();
        self
    }

    /// The light level of the current face.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl<S: Sampler> Shader for FlatShader<S> {
    fn vertex(&mut self, uniforms: &Uniforms, position: Vec3, uv: Vec3, _normal: Vec3, slot: usize) -> Vec3 {
        self.positions[slot] = position;
        self.varying_uv[slot] = uv;

        if slot == 2 {
            let [p0, p1, p2] = self.positions;
            let normal = (p2 - p0).cross(p1 - p0).normalize();
            self.intensity = normal.dot(self.light_dir);
        }

        uniforms.to_screen(position)
    }

    fn cull(&self) -> bool {
        !(self.intensity > 0.0)
    }

    fn fragment(&self, weights: Vec3) -> Fragment {
        if self.intensity > 0.0 {
            match &self.diffuse {
                Some(diffuse) => {
                    let uv = Vec3::interpolate(&self.varying_uv, weights);
                    Fragment::color(diffuse.color(uv.x, uv.y))
                }
                None => Fragment::color(Vec3::broadcast((self.intensity * 255.0).floor())),
            }
        } else {
            Fragment::DISCARD
        }
    }
}
