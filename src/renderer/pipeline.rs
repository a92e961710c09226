//! WebGPU render pipeline setup

use std::ops::Range;
use std::path::Path;

use wgpu::util::DeviceExt;

use super::scene::{Batch, Scene};
use super::texture::{TextureId, TextureSet};
use super::vertex::colors;
use super::vertex::{TexVertex, Vertex};
use crate::error::RenderError;

/// Convert world coordinates to normalized device coordinates
///
/// World y spans [-1, 1]; x is divided by the aspect ratio so the scene
/// keeps its proportions on any window shape.
pub fn world_to_ndc(position: [f32; 2], size: (u32, u32)) -> [f32; 2] {
    let (w, h) = size;
    if w == 0 || h == 0 {
        return position;
    }
    let aspect = w as f32 / h as f32;
    [position[0] / aspect, position[1]]
}

/// One draw call into the frame's vertex buffers
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Colored(Range<u32>),
    Textured(TextureId, Range<u32>),
}

/// Scene flattened into two vertex streams plus the draw order
#[derive(Debug, Default)]
pub struct FrameGeometry {
    pub colored: Vec<Vertex>,
    pub textured: Vec<TexVertex>,
    pub draws: Vec<DrawCall>,
}

impl FrameGeometry {
    /// Flatten `scene` into NDC vertex streams for a viewport of `size`
    pub fn from_scene(scene: &Scene, size: (u32, u32)) -> Self {
        let mut frame = Self::default();
        for batch in scene.batches() {
            match batch {
                Batch::Colored(vertices) => {
                    let start = frame.colored.len() as u32;
                    frame.colored.extend(vertices.iter().map(|v| Vertex {
                        position: world_to_ndc(v.position, size),
                        ..*v
                    }));
                    frame
                        .draws
                        .push(DrawCall::Colored(start..frame.colored.len() as u32));
                }
                Batch::Textured { texture, vertices } => {
                    let start = frame.textured.len() as u32;
                    frame.textured.extend(vertices.iter().map(|v| TexVertex {
                        position: world_to_ndc(v.position, size),
                        ..*v
                    }));
                    frame.draws.push(DrawCall::Textured(
                        *texture,
                        start..frame.textured.len() as u32,
                    ));
                }
            }
        }
        frame
    }
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    colored_pipeline: wgpu::RenderPipeline,
    textured_pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("coaster-ride-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        // Linear surface: colors and sprites are written as-is
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;
        log::info!("Surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let colored_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("colored_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("colored.wgsl").into()),
        });
        let textured_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("textured_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("textured.wgsl").into()),
        });

        let colored_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("colored_pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });
        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pipeline_layout"),
            bind_group_layouts: &[&texture_layout],
            immediate_size: 0,
        });

        let colored_pipeline = create_pipeline(
            &device,
            "colored_pipeline",
            &colored_layout,
            &colored_shader,
            Vertex::desc(),
            config.format,
        );
        let textured_pipeline = create_pipeline(
            &device,
            "textured_pipeline",
            &textured_layout,
            &textured_shader,
            TexVertex::desc(),
            config.format,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            colored_pipeline,
            textured_pipeline,
            texture_layout,
            sampler,
            size: (width, height),
        })
    }

    /// Load the scene sprites from `dir`
    pub fn load_textures(&self, dir: &Path) -> TextureSet {
        TextureSet::load(
            &self.device,
            &self.queue,
            &self.texture_layout,
            &self.sampler,
            dir,
        )
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at the current size
    pub fn reconfigure(&mut self) {
        let (w, h) = self.size;
        self.resize(w, h);
    }

    /// Upload the scene and render one frame
    ///
    /// Textured batches whose sprite failed to load are skipped.
    pub fn render(&mut self, scene: &Scene, textures: &TextureSet) -> Result<(), wgpu::SurfaceError> {
        let frame = FrameGeometry::from_scene(scene, self.size);

        let colored_buffer = (!frame.colored.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("colored_vertex_buffer"),
                    contents: bytemuck::cast_slice(&frame.colored),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
        let textured_buffer = (!frame.textured.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("textured_vertex_buffer"),
                    contents: bytemuck::cast_slice(&frame.textured),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let [r, g, b, a] = colors::CLEAR.map(f64::from);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for draw in &frame.draws {
                match draw {
                    DrawCall::Colored(range) => {
                        let Some(buffer) = &colored_buffer else {
                            continue;
                        };
                        render_pass.set_pipeline(&self.colored_pipeline);
                        render_pass.set_vertex_buffer(0, buffer.slice(..));
                        render_pass.draw(range.clone(), 0..1);
                    }
                    DrawCall::Textured(id, range) => {
                        let (Some(buffer), Some(texture)) = (&textured_buffer, textures.get(*id))
                        else {
                            continue;
                        };
                        render_pass.set_pipeline(&self.textured_pipeline);
                        render_pass.set_bind_group(0, &texture.bind_group, &[]);
                        render_pass.set_vertex_buffer(0, buffer.slice(..));
                        render_pass.draw(range.clone(), 0..1);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Affine2, Vec2};

    use crate::renderer::shapes::{rect, textured_quad};

    #[test]
    fn test_world_to_ndc_scales_x_by_aspect() {
        let ndc = world_to_ndc([1.6, -0.5], (1600, 900));
        assert!((ndc[0] - 0.9).abs() < 1e-6);
        assert_eq!(ndc[1], -0.5);
        assert_eq!(world_to_ndc([0.3, 0.2], (0, 0)), [0.3, 0.2]);
    }

    #[test]
    fn test_frame_geometry_preserves_draw_order() {
        let mut scene = Scene::new();
        scene.push_colored(rect(Vec2::ZERO, Vec2::ONE, colors::SKY));
        scene.push_textured(
            TextureId::Cart,
            textured_quad(&Affine2::IDENTITY, Vec2::ZERO, Vec2::ONE, 1.0),
        );
        scene.push_colored(rect(Vec2::ONE, Vec2::ONE, colors::GRASS));
        scene.push_textured(
            TextureId::Info,
            textured_quad(&Affine2::IDENTITY, Vec2::ONE, Vec2::ONE, 0.85),
        );

        let frame = FrameGeometry::from_scene(&scene, (800, 800));
        assert_eq!(
            frame.draws,
            vec![
                DrawCall::Colored(0..6),
                DrawCall::Textured(TextureId::Cart, 0..6),
                DrawCall::Colored(6..12),
                DrawCall::Textured(TextureId::Info, 6..12),
            ]
        );
        assert_eq!(frame.colored.len(), 12);
        assert_eq!(frame.textured.len(), 12);
        // Square viewport: positions unchanged, attributes carried over
        assert_eq!(frame.colored[0].position, [0.0, 0.0]);
        assert_eq!(frame.textured[6].alpha, 0.85);
    }
}
