use std::ops::Range;

use glam::{Mat4, Vec3};
use sphere_core::{PointAttributes, PointBuffers, PointUniforms};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Camera {
    view_proj: [[f32; 4]; 4],
    viewport: [f32; 2],
    _pad: [f32; 2],
}

/// Storage layout of `Point` in points.wgsl.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuPoint {
    position: [f32; 3],
    class_id: u32,
    brightness: f32,
    phase: f32,
    _pad: [f32; 2],
}

/// Point-cloud buffers on the device. Writes from the core are staged here and
/// flushed onto the queue right before the frame is encoded.
pub struct GpuPointBuffers {
    point_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    staged_points: Option<Vec<GpuPoint>>,
    staged_indices: Vec<u32>,
    indices_pending: bool,
    staged_uniforms: Option<PointUniforms>,
    draw_range: Range<u32>,
    released: bool,
}

impl GpuPointBuffers {
    fn new(device: &wgpu::Device, capacity: u32) -> Self {
        let capacity = capacity.max(1) as u64;
        let point_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("points"),
            size: capacity * std::mem::size_of::<GpuPoint>() as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("active_indices"),
            size: capacity * std::mem::size_of::<u32>() as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("point_uniforms"),
            size: std::mem::size_of::<PointUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            point_buffer,
            index_buffer,
            uniform_buffer,
            staged_points: None,
            staged_indices: Vec::new(),
            indices_pending: false,
            staged_uniforms: None,
            draw_range: 0..0,
            released: false,
        }
    }

    fn flush(&mut self, queue: &wgpu::Queue) {
        if self.released {
            return;
        }
        if let Some(points) = self.staged_points.take() {
            queue.write_buffer(&self.point_buffer, 0, bytemuck::cast_slice(&points));
        }
        if self.indices_pending && !self.staged_indices.is_empty() {
            queue.write_buffer(
                &self.index_buffer,
                0,
                bytemuck::cast_slice(&self.staged_indices),
            );
        }
        self.indices_pending = false;
        if let Some(uniforms) = self.staged_uniforms.take() {
            queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
    }

    fn instances(&self) -> Range<u32> {
        if self.released {
            0..0
        } else {
            self.draw_range.clone()
        }
    }
}

impl PointBuffers for GpuPointBuffers {
    fn write_attributes(&mut self, attributes: &PointAttributes) {
        let points = attributes
            .positions
            .iter()
            .zip(&attributes.color_classes)
            .zip(&attributes.brightness)
            .zip(&attributes.twinkle_phases)
            .map(|(((p, &class), &brightness), &phase)| GpuPoint {
                position: p.to_array(),
                class_id: class as u32,
                brightness,
                phase,
                _pad: [0.0; 2],
            })
            .collect();
        self.staged_points = Some(points);
    }

    fn write_indices(&mut self, indices: &[u32]) {
        self.staged_indices.clear();
        self.staged_indices.extend_from_slice(indices);
        self.indices_pending = true;
    }

    fn set_draw_range(&mut self, range: Range<u32>) {
        self.draw_range = range;
    }

    fn write_uniforms(&mut self, uniforms: &PointUniforms) {
        self.staged_uniforms = Some(*uniforms);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.point_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
        self.staged_points = None;
        self.staged_indices = Vec::new();
        self.staged_uniforms = None;
        self.released = true;
        log::info!("[gpu] point buffers released");
    }
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    points: GpuPointBuffers,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window, capacity: u32) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface has no supported formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(sphere_core::POINTS_WGSL.into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera"),
            size: std::mem::size_of::<Camera>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let points = GpuPointBuffers::new(&device, capacity);

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let storage_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points_bgl"),
            entries: &[
                uniform_entry(0),
                uniform_entry(1),
                storage_entry(2),
                storage_entry(3),
            ],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points_bg"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: points.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: points.point_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: points.index_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // additive, no depth: overlapping stars brighten
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        log::info!(
            "[gpu] {} ({:?}), {}x{}, capacity {}",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.width,
            config.height,
            capacity
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            width: config.width,
            height: config.height,
            config,
            pipeline,
            camera_buffer,
            bind_group,
            points,
        })
    }

    pub fn points_mut(&mut self) -> &mut GpuPointBuffers {
        &mut self.points
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn camera(&self) -> Camera {
        let aspect = self.width as f32 / self.height as f32;
        let proj = Mat4::perspective_rh(75f32.to_radians(), aspect, 0.1, 1000.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        Camera {
            view_proj: (proj * view).to_cols_array_2d(),
            viewport: [self.width as f32, self.height as f32],
            _pad: [0.0; 2],
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.points.flush(&self.queue);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&self.camera()));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
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
            let instances = self.points.instances();
            if !instances.is_empty() {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.draw(0..6, instances);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
