//! Overlay Renderer
//!
//! Draws the gizmo overlay scene on top of an already rendered frame. The
//! colour target is loaded, never cleared, while the pass owns a private
//! depth buffer cleared every frame so handles are sorted among themselves
//! but always sit in front of the main scene.

use cgmath::Vector3;
use log::debug;
use wgpu::*;

use crate::{
    error::{GizmoError, Result},
    gfx::{
        camera::camera_utils::{CameraUniform, ViewCamera},
        scene::{overlay::OverlayScene, vertex::GizmoVertex},
    },
};

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;
const INITIAL_VERTEX_CAPACITY: u64 = 4096;

/// Flattens every effectively enabled overlay mesh into world-space triangles
///
/// Each vertex takes the current emissive colour of its mesh material, so a
/// highlight shows up on the next upload without any extra state.
pub fn build_overlay_vertices(
    scene: &OverlayScene,
    shared_scale: Vector3<f32>,
) -> Vec<GizmoVertex> {
    let mut vertices = Vec::new();

    for (id, mesh) in scene.meshes() {
        if !scene.is_effectively_enabled(id) {
            continue;
        }
        let world = scene.world_matrix(id, shared_scale);
        let color = scene.materials().emissive_of(mesh.material);

        for triangle in mesh.geometry.triangles() {
            vertices.extend(triangle.iter().map(|v| {
                let p = (world * v.extend(1.0)).truncate();
                GizmoVertex {
                    position: [p.x, p.y, p.z],
                    color,
                }
            }));
        }
    }

    vertices
}

pub struct OverlayRenderer {
    pipeline: RenderPipeline,
    camera_buffer: Buffer,
    camera_bind_group: BindGroup,
    vertex_buffer: Buffer,
    vertex_capacity: u64,
    vertex_count: u32,
    depth_view: TextureView,
}

impl OverlayRenderer {
    pub fn new(
        device: &Device,
        surface_format: TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let depth_view = Self::create_depth_view(device, width, height)?;

        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Gizmo Overlay Shader"),
            source: ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&BufferDescriptor {
            label: Some("Gizmo Overlay Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as BufferAddress,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Gizmo Overlay Camera Layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Gizmo Overlay Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Gizmo Overlay Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Gizmo Overlay Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[GizmoVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: Some(BlendState::REPLACE),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                // Handles are viewed from every side, including the inside of the torus
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            vertex_count: 0,
            depth_view,
        })
    }

    /// Recreates the private depth buffer for a new surface size
    pub fn resize(&mut self, device: &Device, width: u32, height: u32) -> Result<()> {
        self.depth_view = Self::create_depth_view(device, width, height)?;
        Ok(())
    }

    /// Uploads the camera and the current handle geometry
    ///
    /// Call after the gizmo tick so placement and highlight colours are
    /// those of this frame.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        scene: &OverlayScene,
        shared_scale: Vector3<f32>,
        camera: &dyn ViewCamera,
    ) {
        let uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let vertices = build_overlay_vertices(scene, shared_scale);
        let needed = vertices.len() as u64;
        if needed > self.vertex_capacity {
            let capacity = needed.next_power_of_two();
            debug!(
                "Growing overlay vertex buffer from {} to {} vertices",
                self.vertex_capacity, capacity
            );
            self.vertex_buffer = Self::create_vertex_buffer(device, capacity);
            self.vertex_capacity = capacity;
        }

        if !vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
        self.vertex_count = vertices.len() as u32;
    }

    /// Records the overlay pass into `encoder`
    pub fn render(&self, encoder: &mut CommandEncoder, color_view: &TextureView) {
        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Gizmo Overlay Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if self.vertex_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    fn create_vertex_buffer(device: &Device, capacity: u64) -> Buffer {
        device.create_buffer(&BufferDescriptor {
            label: Some("Gizmo Overlay Vertex Buffer"),
            size: capacity * std::mem::size_of::<GizmoVertex>() as BufferAddress,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_view(device: &Device, width: u32, height: u32) -> Result<TextureView> {
        if width == 0 || height == 0 {
            return Err(GizmoError::Render(format!(
                "overlay depth buffer needs a non-zero size, got {width}x{height}"
            )));
        }

        let texture = device.create_texture(&TextureDescriptor {
            label: Some("Gizmo Overlay Depth"),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[DEPTH_FORMAT],
        });
        Ok(texture.create_view(&TextureViewDescriptor::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::generate_cube,
        resources::material::EmissiveMaterial,
        scene::overlay::{OverlayMesh, ScaleSource},
    };

    fn cube_scene() -> (OverlayScene, crate::gfx::scene::overlay::MeshId) {
        let mut scene = OverlayScene::new();
        let green = scene
            .materials_mut()
            .add_material(EmissiveMaterial::new("green", [0.0, 1.0, 0.0]));
        let cube = scene.add_mesh(
            OverlayMesh::new("cube", generate_cube(2.0), green)
                .with_position(Vector3::new(10.0, 0.0, 0.0))
                .with_scale(ScaleSource::Shared),
        );
        (scene, cube)
    }

    #[test]
    fn test_vertices_are_world_space_with_material_colour() {
        let (scene, _) = cube_scene();
        let vertices = build_overlay_vertices(&scene, Vector3::new(3.0, 3.0, 3.0));

        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            assert_eq!(v.color, [0.0, 1.0, 0.0]);
            // Unit half-extent scaled by 3 around x = 10
            assert!((v.position[0] - 10.0).abs() <= 3.0 + 1e-4);
            assert!(v.position[1].abs() <= 3.0 + 1e-4);
        }
        assert!(vertices.iter().any(|v| (v.position[0] - 13.0).abs() < 1e-4));
    }

    #[test]
    fn test_disabled_meshes_are_not_drawn() {
        let (mut scene, cube) = cube_scene();
        scene.set_enabled(cube, false);
        assert!(build_overlay_vertices(&scene, Vector3::new(1.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_dimmed_material_reaches_vertices() {
        let (mut scene, cube) = cube_scene();
        let material = scene.mesh(cube).map(|m| m.material).unwrap();
        scene.materials_mut().get_material_mut(material).unwrap().dim();

        let vertices = build_overlay_vertices(&scene, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(vertices[0].color, [0.0, 0.5, 0.0]);
    }
}
