//! Rendering system for the atom view
//!
//! Nucleus and electrons draw as camera-facing billboard quads shaded into
//! spheres in the fragment shader; shell rings draw as line strips, one
//! range per shell. Geometry is rebuilt on the CPU each frame from the
//! scene's elapsed time, so every draw observes the same clock value.

use common::{create_vertex_buffer, CameraUniform, GraphicsContext, OrbitCamera, Vertex};
use glam::{Mat3, Vec3};
use std::f32::consts::TAU;
use wgpu::util::DeviceExt;

use crate::scene::AtomScene;

/// Line segments per shell ring
const RING_SEGMENTS: usize = 64;
/// Billboard radius of one electron marker
const ELECTRON_RADIUS: f32 = 0.06;

/// Enough for the nucleus plus every electron of the heaviest element
const MAX_SPHERES: usize = 64;
/// Enough for eight closed rings
const MAX_RING_VERTICES: usize = 8 * (RING_SEGMENTS + 1);

/// Instance data for one billboard sphere
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
    pub emissive: f32,
    pub spin: f32,
}

impl SphereInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x3,
        3 => Float32,
        4 => Float32x4,
        5 => Float32,
        6 => Float32,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SphereInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Quad vertex for billboards
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

pub struct Renderer {
    sphere_pipeline: wgpu::RenderPipeline,
    ring_pipeline: wgpu::RenderPipeline,
    background_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    sphere_buffer: wgpu::Buffer,
    ring_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
}

impl Renderer {
    pub fn new(ctx: &GraphicsContext) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Atom Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/atom.wgsl").into()),
        });

        // Camera uniform buffer
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let depth_texture = Self::create_depth_texture(device, ctx.size.width, ctx.size.height);

        let depth_stencil_state = Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        // Billboard sphere pipeline
        let sphere_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sphere Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_sphere",
                buffers: &[QuadVertex::layout(), SphereInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_sphere",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: depth_stencil_state.clone(),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Shell ring pipeline
        let ring_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ring Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_ring",
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_ring",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: depth_stencil_state.clone(),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Background gradient pipeline
        let background_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Background Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_background",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_background",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let sphere_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sphere Instance Buffer"),
            size: (std::mem::size_of::<SphereInstance>() * MAX_SPHERES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let ring_buffer = create_vertex_buffer(
            device,
            &vec![Vertex::new([0.0; 3], [0.0; 4]); MAX_RING_VERTICES],
        );

        Self {
            sphere_pipeline,
            ring_pipeline,
            background_pipeline,
            quad_buffer,
            sphere_buffer,
            ring_buffer,
            camera_buffer,
            camera_bind_group,
            depth_texture,
        }
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &OrbitCamera) {
        let uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload sphere instances and ring vertices for the current frame.
    ///
    /// Returns the sphere count and one `(start, count)` vertex range per
    /// shell ring for the line-strip draws.
    pub fn update_scene(&self, queue: &wgpu::Queue, scene: &AtomScene) -> (u32, Vec<(u32, u32)>) {
        let t = scene.elapsed();

        let mut spheres = Vec::with_capacity(MAX_SPHERES);
        spheres.push(SphereInstance {
            position: [0.0, 0.0, 0.0],
            radius: scene.nucleus.size() * scene.nucleus.scale(t),
            color: scene.nucleus.color,
            emissive: scene.nucleus.emissive(),
            spin: scene.nucleus.rotation(t),
        });

        let mut ring_vertices = Vec::with_capacity(MAX_RING_VERTICES);
        let mut ring_ranges = Vec::with_capacity(scene.shells.len());

        for shell in &scene.shells {
            // The whole shell group rotates about the vertical axis, with the
            // hover wobble as an additional tilt on top.
            let transform = Mat3::from_rotation_x(shell.tilt(t))
                * Mat3::from_rotation_y(shell.rotation(t));

            let emissive = shell.emissive();
            for pos in shell.geometry().positions() {
                if spheres.len() >= MAX_SPHERES {
                    break;
                }
                let world = transform * Vec3::new(pos.x, pos.y, pos.z);
                spheres.push(SphereInstance {
                    position: world.to_array(),
                    radius: ELECTRON_RADIUS,
                    color: scene.electron_color,
                    emissive,
                    spin: 0.0,
                });
            }

            if ring_vertices.len() + RING_SEGMENTS + 1 > MAX_RING_VERTICES {
                break;
            }
            let start = ring_vertices.len() as u32;
            let color = [
                shell.ring_color[0],
                shell.ring_color[1],
                shell.ring_color[2],
                shell.ring_alpha(),
            ];
            for i in 0..=RING_SEGMENTS {
                let angle = (i % RING_SEGMENTS) as f32 / RING_SEGMENTS as f32 * TAU;
                let point =
                    transform * Vec3::new(angle.cos() * shell.radius(), 0.0, angle.sin() * shell.radius());
                ring_vertices.push(Vertex::new(point.to_array(), color));
            }
            ring_ranges.push((start, (RING_SEGMENTS + 1) as u32));
        }

        queue.write_buffer(&self.sphere_buffer, 0, bytemuck::cast_slice(&spheres));
        if !ring_vertices.is_empty() {
            queue.write_buffer(&self.ring_buffer, 0, bytemuck::cast_slice(&ring_vertices));
        }

        (spheres.len() as u32, ring_ranges)
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        num_spheres: u32,
        ring_ranges: &[(u32, u32)],
    ) {
        // First pass: background gradient, no depth
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Background Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.background_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        // Second pass: 3D scene with depth
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Atom Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !ring_ranges.is_empty() {
                render_pass.set_pipeline(&self.ring_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.ring_buffer.slice(..));

                for (start, count) in ring_ranges {
                    render_pass.draw(*start..(*start + *count), 0..1);
                }
            }

            if num_spheres > 0 {
                render_pass.set_pipeline(&self.sphere_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.sphere_buffer.slice(..));
                render_pass.draw(0..6, 0..num_spheres);
            }
        }
    }
}
