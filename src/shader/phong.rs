use super::*;
use crate::{interpolate::Interpolate, sampler::Sampler};

/// Specular exponent of the Blinn-Phong highlight.
pub const SHININESS: i32 = 200;

/// Constant light added to every channel before clamping.
pub const AMBIENT: f32 = 5.0;

/// Per-pixel Blinn-Phong lighting with a tangent-space normal map.
///
/// For every fragment:
///
/// 1. a tangent and bitangent are reconstructed from the position and UV deltas of the triangle's vertices;
/// 2. the interpolated vertex normal completes a TBN basis, which carries the decoded normal-map sample into model
///    space;
/// 3. diffuse intensity is `max(dot(n, light), 0) * 2`, and specular is `max(dot(n, h), 0) ^ 200` where `h` is the
///    half vector between the light and the direction towards `camera_pos` from the interpolated position;
/// 4. each channel is `min(5 + texel * (diffuse + specular), 255)`.
///
/// # Specular maps
///
/// The `specular` sampler is carried along with the other maps so a scene's assets stay together, but the highlight
/// strength is the same everywhere and the map is never sampled.
#[derive(Clone, Debug)]
pub struct PhongShader<D, N = D, S = D> {
    pub diffuse: D,
    pub normal_map: N,
    pub specular: Option<S>,
    pub light_dir: Vec3,
    pub camera_pos: Vec3,
    varying_uv: [Vec3; 3],
    varying_pos: [Vec3; 3],
    varying_normal: [Vec3; 3],
}

impl<D: Sampler, N: Sampler, S: Sampler> PhongShader<D, N, S> {
    /// Create a shader lit along `light_dir` (normalised here) and viewed from `camera_pos`.
    pub fn new(diffuse: D, normal_map: N, light_dir: Vec3, camera_pos: Vec3) -> Self {
        Self {
            diffuse,
            normal_map,
            specular: None,
            light_dir: light_dir.normalize(),
            camera_pos,
            varying_uv: [Vec3::ZERO; 3],
            varying_pos: [Vec3::ZERO; 3],
            varying_normal: [Vec3::ZERO; 3],
        }
    }

    pub fn with_specular(mut self, specular: S) -> Self {
        self.specular = Some(specular);
        self
    }

    /// The tangent and bitangent of the current triangle, in model space.
    ///
    /// Triangles whose UVs are degenerate produce non-finite vectors, as the UV determinant is not guarded.
    pub fn tangent_basis(&self) -> (Vec3, Vec3) {
        let [p0, p1, p2] = self.varying_pos;
        let [uv0, uv1, uv2] = self.varying_uv;

        let edge1 = p1 - p0;
        let edge2 = p2 - p1;
        let delta_uv1 = uv1 - uv0;
        let delta_uv2 = uv2 - uv1;

        let f = 1.0 / (delta_uv1.x * delta_uv2.y - delta_uv2.x * delta_uv1.y);
        let tangent = ((edge1 * delta_uv2.y - edge2 * delta_uv1.y) * f).normalize();
        let bitangent = ((edge2 * delta_uv1.x - edge1 * delta_uv2.x) * f).normalize();
        (tangent, bitangent)
    }

    /// The normal at `weights`, perturbed by the normal map.
    pub fn mapped_normal(&self, weights: Vec3) -> Vec3 {
        let uv = Vec3::interpolate(&self.varying_uv, weights);
        let (tangent, bitangent) = self.tangent_basis();
        let normal = Vec3::interpolate(&self.varying_normal, weights).normalize();
        let tbn = Mat4::from_columns_3d(tangent, bitangent, normal);

        let sample = self.normal_map.color(uv.x, uv.y).map(|e| e / 255.0 * 2.0 - 1.0);
        sample.transformed(&tbn).normalize()
    }
}

impl<D: Sampler, N: Sampler, S: Sampler> Shader for PhongShader<D, N, S> {
    fn vertex(&mut self, uniforms: &Uniforms, position: Vec3, uv: Vec3, normal: Vec3, slot: usize) -> Vec3 {
        self.varying_uv[slot] = Vec3::new(uv.x, uv.y, 0.0);
        self.varying_pos[slot] = position;
        self.varying_normal[slot] = normal;
        uniforms.to_screen(position)
    }

    fn fragment(&self, weights: Vec3) -> Fragment {
        let uv = Vec3::interpolate(&self.varying_uv, weights);
        let texel = self.diffuse.color(uv.x, uv.y);
        let normal = self.mapped_normal(weights);

        let diffuse = normal.dot(self.light_dir).max(0.0) * 2.0;

        let pos = Vec3::interpolate(&self.varying_pos, weights);
        let to_camera = (self.camera_pos - pos).normalize();
        let half = (to_camera + self.light_dir).normalize();
        let specular = normal.dot(half).max(0.0).powi(SHININESS);

        Fragment::color(texel.map(|e| (AMBIENT + e * (diffuse + specular)).min(255.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        sampler::Nearest,
        texture::{Texture, TextureBuffer},
    };
    use approx::assert_abs_diff_eq;

    type Map = Nearest<TextureBuffer>;

    fn solid(rgb: [u8; 3]) -> Map {
        TextureBuffer::fill([2, 2], [rgb[0], rgb[1], rgb[2], 255]).nearest()
    }

    /// A triangle in the z = 0 plane whose UVs match its positions, so tangent = +x and bitangent = +y.
    fn submit(shader: &mut PhongShader<Map>, normal: Vec3) {
        let uniforms = Uniforms::default();
        let corners = [Vec3::ZERO, Vec3::RIGHT, Vec3::UP];
        for (slot, p) in corners.into_iter().enumerate() {
            shader.vertex(&uniforms, p, p, normal, slot);
        }
    }

    #[test]
    fn tangent_basis_follows_uvs() {
        let mut shader = PhongShader::new(solid([0; 3]), solid([128, 128, 255]), Vec3::FRONT, Vec3::FRONT);
        submit(&mut shader, Vec3::FRONT);
        let (t, b) = shader.tangent_basis();
        assert_abs_diff_eq!(t, Vec3::RIGHT, epsilon = 1e-6);
        assert_abs_diff_eq!(b, Vec3::UP, epsilon = 1e-6);
    }

    #[test]
    fn flat_normal_map_keeps_the_vertex_normal() {
        let mut shader = PhongShader::new(solid([0; 3]), solid([128, 128, 255]), Vec3::FRONT, Vec3::FRONT);
        submit(&mut shader, Vec3::FRONT);
        let n = shader.mapped_normal(Vec3::broadcast(1.0 / 3.0));
        assert_abs_diff_eq!(n, Vec3::FRONT, epsilon = 1e-2);
    }

    #[test]
    fn normal_map_tilts_the_normal() {
        // Decodes to roughly (1, 0, 0) in tangent space
        let mut shader = PhongShader::new(solid([0; 3]), solid([255, 128, 128]), Vec3::FRONT, Vec3::FRONT);
        submit(&mut shader, Vec3::FRONT);
        let n = shader.mapped_normal(Vec3::broadcast(1.0 / 3.0));
        assert_abs_diff_eq!(n, Vec3::RIGHT, epsilon = 1e-2);
    }

    #[test]
    fn unlit_fragments_keep_the_ambient_term() {
        // Light from behind the surface, camera far off to the side
        let mut shader = PhongShader::new(
            solid([200, 100, 50]),
            solid([128, 128, 255]),
            -Vec3::FRONT,
            Vec3::new(-100.0, 0.0, 0.0),
        );
        submit(&mut shader, Vec3::FRONT);
        let color = shader.fragment(Vec3::broadcast(1.0 / 3.0)).color;
        assert_abs_diff_eq!(color, Vec3::broadcast(AMBIENT), epsilon = 1e-3);
    }

    #[test]
    fn head_on_light_saturates() {
        let mut shader = PhongShader::new(
            solid([200, 100, 50]),
            solid([128, 128, 255]),
            Vec3::FRONT,
            Vec3::new(0.0, 0.0, 10.0),
        );
        submit(&mut shader, Vec3::FRONT);
        let color = shader.fragment(Vec3::broadcast(1.0 / 3.0)).color;
        assert!(!shader.fragment(Vec3::broadcast(1.0 / 3.0)).discard);
        // 200 and 100 saturate under a doubled diffuse plus a strong highlight
        assert_eq!(color.x, 255.0);
        assert_eq!(color.y, 255.0);
        assert!(color.z > 5.0 + 50.0 * 2.0 * 0.99, "blue = {}", color.z);
        assert!(color.z < 255.0);
    }
}
