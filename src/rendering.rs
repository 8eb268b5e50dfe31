//! Rendering system with wgpu pipelines for the four quadrant regions.
//!
//! One shader module carries a shared vertex stage and four fragment
//! entry points; each quadrant slot gets its own pipeline and vertex
//! buffer while all four share one uniform buffer, so every region
//! reads identical per-frame inputs.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::layout::{quadrant_rects, QuadRect, Quadrant};

/// Uniform buffer shared by all four regions (projection + per-frame
/// inputs). Layout matches the WGSL `Uniforms` struct, 96 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub amplitude: f32,
    pub time: f32,
    pub _padding: [f32; 3],
}

/// Vertex data for a region quad (pixel-space position + local UV)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// Two triangles over the four corner vertices
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

/// Corner vertices for one region rect. UV (0,0) is the bottom-left of
/// the region, matching the +y-up pixel coordinate system.
fn quad_vertices(rect: &QuadRect) -> [Vertex; 4] {
    let hw = rect.width / 2.0;
    let hh = rect.height / 2.0;
    let (cx, cy) = (rect.center_x, rect.center_y);
    [
        Vertex {
            position: [cx - hw, cy - hh],
            uv: [0.0, 0.0],
        },
        Vertex {
            position: [cx + hw, cy - hh],
            uv: [1.0, 0.0],
        },
        Vertex {
            position: [cx - hw, cy + hh],
            uv: [0.0, 1.0],
        },
        Vertex {
            position: [cx + hw, cy + hh],
            uv: [1.0, 1.0],
        },
    ]
}

/// Orthographic projection spanning the viewport in pixels, origin at
/// the center, so one rendering unit equals one pixel.
fn pixel_projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh(
        -width / 2.0,
        width / 2.0,
        -height / 2.0,
        height / 2.0,
        -1.0,
        1.0,
    )
}

/// Rendering system managing the wgpu device, the four region
/// pipelines, and their buffers
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipelines: [wgpu::RenderPipeline; 4],
    vertex_buffers: [wgpu::Buffer; 4],
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(window: std::sync::Arc<winit::window::Window>) -> Result<Self, String> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find suitable GPU adapter")?;

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| format!("Failed to request device: {}", e))?;

        // Configure surface; Fifo present mode ties frame pacing to the
        // display refresh, which is what drives the tick loop
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Load shaders
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quadrant Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("quadrants.wgsl").into()),
        });

        // Shared uniform buffer and bind group
        let uniforms = Uniforms {
            view_proj: pixel_projection(size.width as f32, size.height as f32).to_cols_array_2d(),
            color: [0.0, 1.0, 1.0],
            amplitude: 0.0,
            time: 0.0,
            _padding: [0.0; 3],
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // One pipeline per quadrant slot, differing only in fragment
        // entry point
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quadrant Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipelines = Quadrant::ALL.map(|quadrant| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(quadrant.fragment_entry()),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[
                            wgpu::VertexAttribute {
                                offset: 0,
                                shader_location: 0,
                                format: wgpu::VertexFormat::Float32x2,
                            },
                            wgpu::VertexAttribute {
                                offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                                shader_location: 1,
                                format: wgpu::VertexFormat::Float32x2,
                            },
                        ],
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(quadrant.fragment_entry()),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend: None,
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
                multiview: None,
                cache: None,
            })
        });

        // Per-region quad vertices from the initial layout
        let rects = quadrant_rects(size.width as f32, size.height as f32);
        let vertex_buffers = rects.map(|rect| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Region Vertex Buffer"),
                contents: bytemuck::cast_slice(&quad_vertices(&rect)),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Region Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipelines,
            vertex_buffers,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
        })
    }

    /// Current surface size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Projection for the current surface size (one unit = one pixel)
    pub fn view_proj(&self) -> [[f32; 4]; 4] {
        pixel_projection(self.config.width as f32, self.config.height as f32).to_cols_array_2d()
    }

    /// Handle a viewport size change: reconfigure the surface and
    /// recompute every region rect from scratch.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return; // minimized
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        let rects = quadrant_rects(width as f32, height as f32);
        for (buffer, rect) in self.vertex_buffers.iter().zip(rects.iter()) {
            self.queue
                .write_buffer(buffer, 0, bytemuck::cast_slice(&quad_vertices(rect)));
        }
    }

    /// Upload this tick's shared uniforms
    pub fn update_uniforms(&self, uniforms: &Uniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Draw all four regions in one pass and present the frame
    pub fn render(&self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

            for (pipeline, vertex_buffer) in self.pipelines.iter().zip(&self.vertex_buffers) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_uniforms_match_wgsl_layout() {
        // mat4 (64) + vec3/f32/f32 packed to the next 16-byte boundary
        assert_eq!(std::mem::size_of::<Uniforms>(), 96);
        assert_eq!(std::mem::size_of::<Vertex>(), 16);
    }

    #[test]
    fn test_quad_vertices_span_rect() {
        let rect = QuadRect {
            width: 400.0,
            height: 300.0,
            center_x: -200.0,
            center_y: 150.0,
        };
        let verts = quad_vertices(&rect);

        assert_eq!(verts[0].position, [-400.0, 0.0]); // bottom-left
        assert_eq!(verts[1].position, [0.0, 0.0]); // bottom-right
        assert_eq!(verts[2].position, [-400.0, 300.0]); // top-left
        assert_eq!(verts[3].position, [0.0, 300.0]); // top-right

        assert_eq!(verts[0].uv, [0.0, 0.0]);
        assert_eq!(verts[3].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_pixel_projection_is_one_unit_per_pixel() {
        let proj = pixel_projection(800.0, 600.0);

        // Viewport corner in pixels lands on the clip-space corner
        let corner = proj * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-6);
        assert!((corner.y - 1.0).abs() < 1e-6);

        let center = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(center.x.abs() < 1e-6);
        assert!(center.y.abs() < 1e-6);
    }
}
