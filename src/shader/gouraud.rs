use super::*;
use crate::{interpolate::Interpolate, sampler::Sampler};

/// Diffuse lighting evaluated per vertex and interpolated across each triangle.
///
/// Each vertex's intensity is `max(dot(normal, light_dir), 0)`. A fragment's colour is the diffuse texel at the
/// interpolated UV scaled by the interpolated intensity.
#[derive(Clone, Debug)]
pub struct GouraudShader<S> {
    pub diffuse: S,
    pub light_dir: Vec3,
    varying_uv: [Vec3; 3],
    varying_intensity: [f32; 3],
}

impl<S: Sampler> GouraudShader<S> {
    /// Create a shader sampling `diffuse` and lit along `light_dir`, which is normalised.
    pub fn new(diffuse: S, light_dir: Vec3) -> Self {
        Self {
            diffuse,
            light_dir: light_dir.normalize(),
            varying_uv: [Vec3::ZERO; 3],
            varying_intensity: [0.0; 3],
        }
    }
}

impl<S: Sampler> Shader for GouraudShader<S> {
    fn vertex(&mut self, uniforms: &Uniforms, position: Vec3, uv: Vec3, normal: Vec3, slot: usize) -> Vec3 {
        self.varying_uv[slot] = Vec3::new(uv.x, uv.y, 0.0);
        self.varying_intensity[slot] = normal.dot(self.light_dir).max(0.0);
        uniforms.to_screen(position)
    }

    fn fragment(&self, weights: Vec3) -> Fragment {
        let uv = Vec3::interpolate(&self.varying_uv, weights);
        let intensity = f32::interpolate(&self.varying_intensity, weights);
        Fragment::color(self.diffuse.color(uv.x, uv.y) * intensity)
    }
}
