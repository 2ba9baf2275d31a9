//! Lyon-based vector renderer.
//!
//! Tessellates world-space draw calls into a flat screen-space triangle list
//! (window pixels, origin top-left) that a host can upload as-is. Text is not
//! rasterized here; it is collected as `TextCommand`s for the host's font layer.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

use super::camera::Camera2D;
use super::traits::{Color, DrawShape, Renderer, TextAnchor, TrailStyle};

/// Per-vertex data for vector/polygon rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// A queued piece of screen text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    pub anchor: TextAnchor,
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Holds lyon tessellators and the output buffers.
/// Cleared each frame and populated by drawing commands.
pub struct VectorRenderer {
    camera: Camera2D,
    fill_tess: FillTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
    text: Vec<TextCommand>,
    clear_color: Color,
}

impl VectorRenderer {
    pub fn new(camera: Camera2D) -> Self {
        Self {
            camera,
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(4096),
            text: Vec::new(),
            clear_color: Color::BLACK,
        }
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Triangle-list vertices for this frame.
    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    /// Vertex buffer as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn text_commands(&self) -> &[TextCommand] {
        &self.text
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            self.vertices.push(self.geometry.vertices[*idx as usize]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Fill a polygon given in window pixels.
    pub fn fill_polygon_px(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Fill a circle given in window pixels.
    pub fn fill_circle_px(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();

        self.fill_path(&path, color);
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        match result {
            Ok(_) => self.flush_geometry(),
            Err(e) => {
                log::trace!("tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Renderer for VectorRenderer {
    fn set_camera(&mut self, camera: &Camera2D) {
        self.camera = *camera;
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.text.clear();
    }

    fn draw_shape(&mut self, shape: &DrawShape, color: Color) {
        match shape {
            DrawShape::Circle { center, radius } => {
                let c = self.camera.world_to_screen(*center);
                let r = self.camera.length_to_screen(*radius);
                self.fill_circle_px(c, r, color);
            }
            DrawShape::Polygon { points } => {
                let px: Vec<Vec2> = points
                    .iter()
                    .map(|p| self.camera.world_to_screen(*p))
                    .collect();
                self.fill_polygon_px(&px, color);
            }
        }
    }

    fn draw_trail(&mut self, points: &[Vec2], style: &TrailStyle) {
        let n = points.len();
        if n == 0 {
            return;
        }
        for (i, p) in points.iter().enumerate() {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 1.0 };
            let (radius, alpha) = style.at(t);
            let c = self.camera.world_to_screen(*p);
            let r = self.camera.length_to_screen(radius);
            self.fill_circle_px(c, r, style.color.with_alpha(alpha));
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, anchor: TextAnchor) {
        self.text.push(TextCommand {
            text: text.to_string(),
            pos,
            size,
            color,
            anchor,
        });
    }
}
