use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use std::collections::HashMap;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::core::GpuContext;
use crate::draw::{DrawCommand, DrawList, Shading};
use crate::hud::{Hud, HudStats};
use crate::lighting::{CameraUniform, LightingUniform};
use crate::mesh::{self, MeshKind, Vertex};
use crate::texture::GpuTexture;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const INITIAL_OBJECT_CAPACITY: usize = 512;

/// Per-draw uniform, bind group 1 with a dynamic offset
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// w carries the material alpha
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl ObjectUniform {
    pub fn from_command(command: &DrawCommand) -> Self {
        let material = &command.material;
        Self {
            model: command.model.to_cols_array_2d(),
            normal_matrix: normal_matrix(command.model).to_cols_array_2d(),
            ambient: rgba(material.ambient, material.alpha),
            diffuse: rgba(material.diffuse, material.alpha),
            specular: rgba(material.specular, material.alpha),
        }
    }
}

fn rgba(color: Vec3, alpha: f32) -> [f32; 4] {
    [color.x, color.y, color.z, alpha]
}

/// Inverse-transpose of the model matrix, so normals survive non-uniform scale
pub fn normal_matrix(model: Mat4) -> Mat4 {
    model.inverse().transpose()
}

/// Distance between consecutive object uniforms in the dynamic buffer
pub fn object_stride(min_alignment: u32) -> u64 {
    wgpu::util::align_to(
        std::mem::size_of::<ObjectUniform>() as u64,
        min_alignment.max(1) as u64,
    )
}

/// Pack uniforms at `stride` byte intervals
pub fn pack_objects<'a>(commands: impl Iterator<Item = &'a DrawCommand>, stride: u64) -> Vec<u8> {
    let stride = stride as usize;
    let mut bytes = Vec::new();
    for command in commands {
        let start = bytes.len();
        bytes.extend_from_slice(bytemuck::bytes_of(&ObjectUniform::from_command(command)));
        bytes.resize(start + stride, 0);
    }
    bytes
}

/// Which pipeline draws a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    Opaque,
    Translucent,
    Emissive,
    Textured,
}

impl PipelineKind {
    pub fn for_command(command: &DrawCommand) -> Self {
        match command.shading {
            Shading::Emissive(_) => Self::Emissive,
            Shading::Textured(_) => Self::Textured,
            Shading::Lit if command.is_translucent() => Self::Translucent,
            Shading::Lit => Self::Opaque,
        }
    }
}

struct Pipelines {
    opaque: wgpu::RenderPipeline,
    translucent: wgpu::RenderPipeline,
    emissive: wgpu::RenderPipeline,
    textured: wgpu::RenderPipeline,
}

impl Pipelines {
    fn get(&self, kind: PipelineKind) -> &wgpu::RenderPipeline {
        match kind {
            PipelineKind::Opaque => &self.opaque,
            PipelineKind::Translucent => &self.translucent,
            PipelineKind::Emissive => &self.emissive,
            PipelineKind::Textured => &self.textured,
        }
    }
}

struct MeshBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

struct ObjectBuffer {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    capacity: usize,
}

pub struct Renderer {
    gpu: GpuContext,
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    objects: ObjectBuffer,
    object_stride: u64,
    pipelines: Pipelines,
    meshes: HashMap<MeshKind, MeshBuffer>,
    white_texture: wgpu::BindGroup,
    textures: Vec<wgpu::BindGroup>,
    clear_color: wgpu::Color,
    hud: Option<Hud>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, config: &SceneConfig, show_hud: bool) -> Result<Self> {
        let gpu = GpuContext::for_window(window.clone()).await?;
        let device = &gpu.device;
        let format = gpu.surface_config.format;

        let depth_view = Self::create_depth_view(device, &gpu.surface_config);

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let lighting_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Lighting Buffer"),
            size: std::mem::size_of::<LightingUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = Self::create_frame_layout(device);
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
        });

        let object_layout = Self::create_object_layout(device);
        let object_stride = object_stride(device.limits().min_uniform_buffer_offset_alignment);
        let objects =
            Self::create_object_buffer(device, &object_layout, object_stride, INITIAL_OBJECT_CAPACITY);

        let texture_layout = GpuTexture::bind_group_layout(device);
        let white_texture = GpuTexture::white(device, &gpu.queue).bind_group(device, &texture_layout);
        let textures = config
            .posters
            .iter()
            .map(|poster| {
                GpuTexture::load_or_white(device, &gpu.queue, &poster.texture)
                    .bind_group(device, &texture_layout)
            })
            .collect();

        let pipelines =
            Self::create_pipelines(device, format, &[&frame_layout, &object_layout, &texture_layout]);

        let meshes = MeshKind::ALL
            .iter()
            .map(|&kind| {
                let vertices = mesh::vertices(kind);
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(kind.label()),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let vertex_count = vertices.len() as u32;
                (kind, MeshBuffer { buffer, vertex_count })
            })
            .collect();

        let hud = show_hud.then(|| Hud::new(device, &window, format));

        let [r, g, b] = config.clear_color;
        println!("Renderer initialized: {} poster texture(s)", config.posters.len());

        Ok(Self {
            gpu,
            depth_view,
            camera_buffer,
            lighting_buffer,
            frame_bind_group,
            object_layout,
            objects,
            object_stride,
            pipelines,
            meshes,
            white_texture,
            textures,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            hud,
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.gpu.aspect_ratio()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.gpu.resize(width, height) {
            self.depth_view = Self::create_depth_view(&self.gpu.device, &self.gpu.surface_config);
        }
    }

    /// Reconfigure after the surface was lost or went out of date
    pub fn reconfigure(&mut self) {
        self.gpu.reconfigure();
    }

    /// Forward a window event to the HUD; true when egui consumed it
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        match &mut self.hud {
            Some(hud) => hud.handle_event(window, event),
            None => false,
        }
    }

    pub fn render(
        &mut self,
        window: &Window,
        camera: &Camera,
        list: &DrawList,
        lighting: &LightingUniform,
        stats: &HudStats,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let camera_uniform = CameraUniform::new(camera.view_projection(self.aspect_ratio()), camera.position);
        self.gpu
            .queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));
        self.gpu
            .queue
            .write_buffer(&self.lighting_buffer, 0, bytemuck::cast_slice(&[*lighting]));

        let ordered: Vec<&DrawCommand> = list.ordered_for_blending().collect();
        self.ensure_object_capacity(ordered.len());
        if !ordered.is_empty() {
            let bytes = pack_objects(ordered.iter().copied(), self.object_stride);
            self.gpu.queue.write_buffer(&self.objects.buffer, 0, &bytes);
        }

        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            let mut current = None;
            for (i, command) in ordered.iter().enumerate() {
                let kind = PipelineKind::for_command(command);
                if current != Some(kind) {
                    pass.set_pipeline(self.pipelines.get(kind));
                    current = Some(kind);
                }

                let offset = (i as u64 * self.object_stride) as wgpu::DynamicOffset;
                pass.set_bind_group(1, &self.objects.bind_group, &[offset]);

                let texture = match command.shading {
                    Shading::Textured(slot) => self.textures.get(slot).unwrap_or(&self.white_texture),
                    _ => &self.white_texture,
                };
                pass.set_bind_group(2, texture, &[]);

                if let Some(mesh) = self.meshes.get(&command.mesh) {
                    pass.set_vertex_buffer(0, mesh.buffer.slice(..));
                    pass.draw(0..mesh.vertex_count, 0..1);
                }
            }
        }

        if let Some(hud) = &mut self.hud {
            let size = [self.gpu.surface_config.width, self.gpu.surface_config.height];
            hud.draw(&self.gpu.device, &self.gpu.queue, &mut encoder, &view, window, size, stats);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Grow the dynamic object buffer to hold at least `count` uniforms
    fn ensure_object_capacity(&mut self, count: usize) {
        if count <= self.objects.capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        log::debug!("Growing object buffer {} -> {}", self.objects.capacity, capacity);
        self.objects = Self::create_object_buffer(
            &self.gpu.device,
            &self.object_layout,
            self.object_stride,
            capacity,
        );
    }

    fn create_object_buffer(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> ObjectBuffer {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
        });
        ObjectBuffer {
            buffer,
            bind_group,
            capacity,
        }
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_frame_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let uniform = |binding, visibility| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[
                uniform(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                uniform(1, wgpu::ShaderStages::FRAGMENT),
            ],
        })
    }

    fn create_object_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ObjectUniform>() as u64
                    ),
                },
                count: None,
            }],
        })
    }

    fn create_pipelines(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layouts: &[&wgpu::BindGroupLayout],
    ) -> Pipelines {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: layouts,
            push_constant_ranges: &[],
        });

        let build = |label: &str, entry: &str, blend: wgpu::BlendState, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        Pipelines {
            opaque: build("Opaque Pipeline", "fs_main", wgpu::BlendState::REPLACE, true),
            translucent: build(
                "Translucent Pipeline",
                "fs_main",
                wgpu::BlendState::ALPHA_BLENDING,
                false,
            ),
            emissive: build("Emissive Pipeline", "fs_emissive", wgpu::BlendState::REPLACE, true),
            textured: build(
                "Textured Pipeline",
                "fs_textured",
                wgpu::BlendState::ALPHA_BLENDING,
                true,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::palette;

    #[test]
    fn test_object_uniform_size() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 176);
    }

    #[test]
    fn test_stride_respects_alignment() {
        assert_eq!(object_stride(256), 256);
        assert_eq!(object_stride(64), 192);
        assert_eq!(object_stride(0), 176);
    }

    #[test]
    fn test_pack_objects_pads_to_stride() {
        let mut list = DrawList::new();
        list.cube(Vec3::ZERO, Vec3::ONE, palette::WOOD);
        list.cube(Vec3::X, Vec3::ONE, palette::WALL);

        let bytes = pack_objects(list.commands().iter(), 256);
        assert_eq!(bytes.len(), 512);

        let second: ObjectUniform =
            bytemuck::pod_read_unaligned(&bytes[256..256 + std::mem::size_of::<ObjectUniform>()]);
        assert_eq!(second.model[3][0], 1.0);
        assert_eq!(second.diffuse[3], 1.0);
    }

    #[test]
    fn test_normal_matrix_keeps_normals_perpendicular() {
        let model = Mat4::from_scale(Vec3::new(10.0, 1.0, 1.0))
            * Mat4::from_rotation_z(0.3);
        let tangent = model.transform_vector3(Vec3::new(1.0, -1.0, 0.0));
        let normal = normal_matrix(model).transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        assert!(tangent.dot(normal).abs() < 1e-4);
    }

    #[test]
    fn test_pipeline_selection() {
        let mut list = DrawList::new();
        list.cube(Vec3::ZERO, Vec3::ONE, palette::WOOD);
        list.window(Vec3::ZERO, Vec3::ONE, palette::WINDOW, 90.0);
        list.emissive_cube(Vec3::ZERO, Vec3::ONE, Vec3::ONE);
        list.textured_plane(
            Vec3::ZERO,
            Vec3::ONE,
            crate::draw::Rotation::about_x(90.0),
            palette::POSTER,
            0,
        );

        let kinds: Vec<PipelineKind> = list.commands().iter().map(PipelineKind::for_command).collect();
        assert_eq!(
            kinds,
            vec![
                PipelineKind::Opaque,
                PipelineKind::Translucent,
                PipelineKind::Emissive,
                PipelineKind::Textured
            ]
        );
    }
}
