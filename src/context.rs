use crate::{
    buffer::DepthBuffer,
    camera::{viewport, Camera},
    config::RenderConfig,
    math::Vec3,
    model::Geometry,
    rasterizer::{draw_triangle, DrawStats},
    shader::{Shader, Uniforms},
    target::PixelSink,
    Error, Result,
};

/// Everything one sequence of draw calls shares: the camera and viewport transforms and the depth buffer.
///
/// A context is owned by whoever is drawing and is passed explicitly to each draw. Depths persist across draws made
/// through the same context, so geometry drawn later is resolved against everything drawn before it until
/// [`RenderContext::clear_depth`] is called. Draws through one context are sequential; there is no locking.
#[derive(Clone, Debug)]
pub struct RenderContext {
    uniforms: Uniforms,
    depth: DepthBuffer,
    stats: DrawStats,
}

impl RenderContext {
    /// Create a context with the given transforms, its depth buffer initialised for a `width` x `height` target.
    pub fn new(uniforms: Uniforms, [width, height]: [usize; 2]) -> Self {
        let mut this = Self {
            uniforms,
            depth: DepthBuffer::new([0, 0], DepthBuffer::DEFAULT_CLEAR),
            stats: DrawStats::default(),
        };
        this.initialize(width, height);
        this
    }

    /// Create a context viewing through `camera` onto the whole of a `width` x `height` target.
    pub fn with_camera(camera: &Camera, [width, height]: [usize; 2]) -> Self {
        let uniforms = Uniforms::new(
            camera.view(),
            camera.projection(),
            viewport(0.0, 0.0, width as f32, height as f32),
        );
        Self::new(uniforms, [width, height])
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            uniforms: config.uniforms(),
            depth: config.depth_buffer(),
            stats: DrawStats::default(),
        }
    }

    /// Size the depth buffer for a `width` x `height` target and reset it.
    pub fn initialize(&mut self, width: usize, height: usize) {
        self.depth.initialize(width, height);
    }

    pub fn clear_depth(&mut self) {
        self.depth.clear();
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn set_uniforms(&mut self, uniforms: Uniforms) {
        self.uniforms = uniforms;
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Totals over every draw made through this context.
    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    fn check_target<P: PixelSink + ?Sized>(&self, pixels: &P) -> Result<()> {
        let (target, depth) = (pixels.size(), self.depth.size());
        if target == depth {
            Ok(())
        } else {
            Err(Error::SizeMismatch { target, depth })
        }
    }

    /// Run the vertex stage for the three vertices of one triangle, then rasterize it.
    ///
    /// Fails without running any shader stage if `pixels` is not the size the context was initialised for.
    pub fn draw_triangle<S, P>(
        &mut self,
        positions: [Vec3; 3],
        uvs: [Vec3; 3],
        normals: [Vec3; 3],
        shader: &mut S,
        pixels: &mut P,
    ) -> Result<DrawStats>
    where
        S: Shader + ?Sized,
        P: PixelSink + ?Sized,
    {
        self.check_target(&*pixels)?;
        let mut screen = [Vec3::ZERO; 3];
        for slot in 0..3 {
            screen[slot] = shader.vertex(&self.uniforms, positions[slot], uvs[slot], normals[slot], slot);
        }
        let stats = draw_triangle(screen, &*shader, &mut self.depth, pixels);
        self.stats += stats;
        Ok(stats)
    }

    /// Draw face `face` of `geometry`. See [`RenderContext::draw_triangle`].
    pub fn draw_face<G, S, P>(&mut self, geometry: &G, face: usize, shader: &mut S, pixels: &mut P) -> Result<DrawStats>
    where
        G: Geometry + ?Sized,
        S: Shader + ?Sized,
        P: PixelSink + ?Sized,
    {
        let slots = [0, 1, 2];
        self.draw_triangle(
            slots.map(|slot| geometry.position(face, slot)),
            slots.map(|slot| geometry.uv(face, slot)),
            slots.map(|slot| geometry.normal(face, slot)),
            shader,
            pixels,
        )
    }

    /// Draw every face of `geometry` in order.
    pub fn draw_model<G, S, P>(&mut self, geometry: &G, shader: &mut S, pixels: &mut P) -> Result<DrawStats>
    where
        G: Geometry + ?Sized,
        S: Shader + ?Sized,
        P: PixelSink + ?Sized,
    {
        self.check_target(&*pixels)?;
        let mut stats = DrawStats::default();
        for face in 0..geometry.face_count() {
            stats += self.draw_face(geometry, face, shader, pixels)?;
        }
        log::debug!(
            "Drew {} triangles ({} degenerate, {} culled): {} fragments shaded, {} written",
            stats.triangles,
            stats.degenerate,
            stats.culled,
            stats.fragments,
            stats.written(),
        );
        Ok(stats)
    }
}
