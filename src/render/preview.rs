//! CPU preview renderer.
//!
//! Evaluates every mesh's modifier stack, projects the resulting quads through the active
//! camera and paints them back to front with `vello_cpu`. Textured faces receive diffuse light
//! from the scene's lights plus a flat ambient term; emissive faces are painted unlit.

use std::f32::consts::PI;

use glam::{Affine3A, Vec3};

use crate::{
    foundation::{
        core::{FrameIndex, LinearRgb, srgb_to_linear},
        error::{DepthwireError, DepthwireResult},
    },
    render::backend::{FrameRGBA, RenderBackend},
    scene::{
        asset::{ObjectData, ObjectId, SceneAsset},
        material::{ColorSource, MaterialSpec},
        modifiers::EvalMode,
        rig::CameraData,
    },
};

/// Flat light added to every textured face.
const AMBIENT: f32 = 0.2;
/// Scales light power (W) into display-referred irradiance.
const EXPOSURE: f32 = 0.1;
/// Pulls emissive faces toward the camera so coplanar ribbons sort above the surface.
const EMISSIVE_DEPTH_BIAS: f32 = 1e-3;

pub struct PreviewBackend {
    ambient: f32,
    exposure: f32,
}

impl Default for PreviewBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewBackend {
    pub fn new() -> Self {
        Self {
            ambient: AMBIENT,
            exposure: EXPOSURE,
        }
    }
}

struct Projection {
    view: Affine3A,
    tan_x: f32,
    tan_y: f32,
    clip_start: f32,
    clip_end: f32,
    width: f32,
    height: f32,
}

impl Projection {
    fn new(camera: &CameraData, camera_to_world: Affine3A, width: u32, height: u32) -> Self {
        // sensor fit auto: the sensor width spans the larger image dimension
        let t = camera.half_fov_tan();
        let (w, h) = (width as f32, height as f32);
        let (tan_x, tan_y) = if w >= h { (t, t * h / w) } else { (t * w / h, t) };
        Self {
            view: camera_to_world.inverse(),
            tan_x,
            tan_y,
            clip_start: camera.clip_start,
            clip_end: camera.clip_end,
            width: w,
            height: h,
        }
    }

    /// Pixel position and view depth of a world-space point, or `None` outside the clip range.
    fn project(&self, world: Vec3) -> Option<(f64, f64, f32)> {
        let p = self.view.transform_point3(world);
        let depth = -p.z;
        if depth < self.clip_start || depth > self.clip_end {
            return None;
        }
        let x_ndc = p.x / depth / self.tan_x;
        let y_ndc = p.y / depth / self.tan_y;
        let px = (x_ndc * 0.5 + 0.5) * self.width;
        let py = (0.5 - y_ndc * 0.5) * self.height;
        Some((f64::from(px), f64::from(py), depth))
    }
}

struct PointLight {
    position: Vec3,
    power: f32,
}

struct DrawQuad {
    depth: f32,
    points: [(f64, f64); 4],
    rgba: [u8; 4],
}

impl RenderBackend for PreviewBackend {
    #[tracing::instrument(skip(self, scene))]
    fn render_frame(&mut self, scene: &SceneAsset, frame: FrameIndex) -> DepthwireResult<FrameRGBA> {
        let canvas = scene.render.effective_resolution();
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| DepthwireError::validation("render width exceeds 65535"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| DepthwireError::validation("render height exceeds 65535"))?;
        if width == 0 || height == 0 {
            return Err(DepthwireError::validation(format!(
                "cannot render a {width}x{height} image"
            )));
        }

        let camera_obj = scene
            .active_camera()
            .ok_or_else(|| DepthwireError::precursor_missing("scene has no active camera"))?;
        let ObjectData::Camera(camera_id) = scene.object(camera_obj)?.data else {
            return Err(DepthwireError::render("active camera object holds no camera"));
        };
        let camera_to_world = scene.world_transform_at(camera_obj, frame)?;
        let eye = Vec3::from(camera_to_world.translation);
        let projection = Projection::new(
            scene.camera(camera_id)?,
            camera_to_world,
            canvas.width,
            canvas.height,
        );

        let lights = scene
            .lights()
            .map(|(id, _, data)| {
                Ok(PointLight {
                    position: scene.world_transform_at(id, frame)?.translation.into(),
                    power: data.energy,
                })
            })
            .collect::<DepthwireResult<Vec<_>>>()?;

        let mut quads = Vec::new();
        for (id, object) in scene.objects() {
            if let ObjectData::Mesh(_) = object.data {
                self.collect_mesh(scene, id, frame, &projection, eye, &lights, &mut quads)?;
            }
        }
        quads.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let background = scene.world.color.to_srgb8();
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            background[0],
            background[1],
            background[2],
            255,
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        for quad in &quads {
            let [r, g, b, a] = quad.rgba;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(quad.points[0]);
            for &p in &quad.points[1..] {
                path.line_to(p);
            }
            path.close_path();
            ctx.fill_path(&path);
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&background);
        }
        ctx.render_to_pixmap(&mut pixmap);

        tracing::debug!(quads = quads.len(), "frame rasterized");
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl PreviewBackend {
    #[allow(clippy::too_many_arguments)]
    fn collect_mesh(
        &self,
        scene: &SceneAsset,
        object: ObjectId,
        frame: FrameIndex,
        projection: &Projection,
        eye: Vec3,
        lights: &[PointLight],
        out: &mut Vec<DrawQuad>,
    ) -> DepthwireResult<()> {
        let ObjectData::Mesh(mesh_id) = scene.object(object)?.data else {
            return Ok(());
        };
        let mesh = scene.mesh(mesh_id)?;
        let model = scene.world_transform_at(object, frame)?;
        let evaluated =
            mesh.modifiers
                .evaluate(&mesh.base, mesh.material_slots.len(), scene, EvalMode::Render)?;

        let world: Vec<Vec3> = evaluated
            .positions
            .iter()
            .map(|&p| model.transform_point3(p))
            .collect();

        for face in &evaluated.faces {
            let Some(material_id) = mesh.material_for_slot(face.material_slot) else {
                continue;
            };
            let corners = face.verts.map(|v| world[v as usize]);

            let mut points = [(0.0, 0.0); 4];
            let mut depth = 0.0;
            let mut visible = true;
            for (slot, &corner) in points.iter_mut().zip(&corners) {
                match projection.project(corner) {
                    Some((x, y, d)) => {
                        *slot = (x, y);
                        depth += d * 0.25;
                    }
                    None => visible = false,
                }
            }
            if !visible {
                continue;
            }

            let center = corners.iter().copied().sum::<Vec3>() * 0.25;
            let rgba = match scene.material(material_id)?.spec {
                MaterialSpec::WireEmissive { color, strength } => {
                    depth -= EMISSIVE_DEPTH_BIAS;
                    let mut rgba =
                        LinearRgb::new(color[0], color[1], color[2]).scale(strength).to_srgb8();
                    rgba[3] = (color[3].clamp(0.0, 1.0) * 255.0).round() as u8;
                    rgba
                }
                MaterialSpec::Textured(surface) => {
                    let ColorSource::Image(image_id) = surface.base_color;
                    let uv = face
                        .verts
                        .iter()
                        .map(|&v| evaluated.uvs[v as usize])
                        .sum::<glam::Vec2>()
                        * 0.25;
                    let [r, g, b, _] = scene.image(image_id)?.sample_rgba(uv.x, uv.y);
                    let base =
                        LinearRgb::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));

                    let [a, b, c, d] = corners;
                    let mut normal = (c - a).cross(d - b).normalize_or_zero();
                    if normal.dot(eye - center) < 0.0 {
                        normal = -normal;
                    }
                    base.scale(self.irradiance(center, normal, lights))
                        .to_srgb8()
                }
            };

            out.push(DrawQuad {
                depth,
                points,
                rgba,
            });
        }
        Ok(())
    }

    fn irradiance(&self, point: Vec3, normal: Vec3, lights: &[PointLight]) -> f32 {
        let direct: f32 = lights
            .iter()
            .map(|light| {
                let to_light = light.position - point;
                let d2 = to_light.length_squared().max(1e-6);
                let cos = normal.dot(to_light / d2.sqrt()).max(0.0);
                light.power * self.exposure * cos / (4.0 * PI * d2)
            })
            .sum();
        self.ambient + direct
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
