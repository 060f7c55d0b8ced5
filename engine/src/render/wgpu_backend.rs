use std::collections::HashMap;

use ab_glyph::FontArc;
use anyhow::{anyhow, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::{
    vertex_attr_array, AddressMode, BindGroupDescriptor, BindGroupEntry, BindGroupLayout,
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingResource, BindingType, Buffer,
    BufferBindingType, BufferUsages, ColorTargetState, ColorWrites, CommandEncoder,
    CommandEncoderDescriptor, CompositeAlphaMode, DeviceDescriptor, Extent3d, FilterMode,
    FragmentState, Instance, LoadOp, MultisampleState, Operations, Origin3d,
    PipelineLayoutDescriptor, PresentMode, PrimitiveState, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor, RequestAdapterOptions, Sampler,
    SamplerBindingType, SamplerDescriptor, ShaderModuleDescriptor, ShaderSource,
    SurfaceConfiguration, TexelCopyBufferLayout, TexelCopyTextureInfo, Texture, TextureAspect,
    TextureDescriptor, TextureDimension, TextureFormat, TextureSampleType, TextureUsages,
    TextureView, TextureViewDescriptor, TextureViewDimension, VertexState,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    math::{Camera2D, Rect, Transform2D, Vec2},
    render::sprite::TextureHandle,
    render::text::{FontHandle, GlyphCacheEntry, TextRenderer},
};

/// Queued sprite draw command (batched rendering)
struct SpriteDrawCommand {
    uniform_offset: u64,
    texture_handle: TextureHandle,
}

/// Wrapper around wgpu surface/device setup and simple frame management.
pub struct Renderer<'window> {
    backend: WgpuBackend<'window>,
}

impl<'window> Renderer<'window> {
    pub fn new(window: &'window Window, vsync: bool) -> Result<Self> {
        let backend = WgpuBackend::new(window, vsync)?;
        Ok(Self { backend })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.backend.resize(new_size);
    }

    pub fn begin_frame(&mut self) -> Result<Frame> {
        self.backend.begin_frame()
    }

    /// Set the color the frame is cleared to before any sprite is drawn.
    pub fn clear(&mut self, frame: &mut Frame, color: [f32; 4]) {
        frame.clear_color = wgpu::Color {
            r: color[0] as f64,
            g: color[1] as f64,
            b: color[2] as f64,
            a: color[3] as f64,
        };
    }

    /// Draw a texture stretched over a world-space box.
    /// * `uv_rect`: Normalized `[x, y, w, h]` region with a top-left origin; `None` for the full texture.
    pub fn draw_quad(
        &mut self,
        frame: &mut Frame,
        texture: TextureHandle,
        center: Vec2,
        size: Vec2,
        uv_rect: Option<[f32; 4]>,
        tint: [f32; 4],
        camera: &Camera2D,
    ) -> Result<()> {
        let transform = Transform2D::new(center, size, 0.0);
        self.backend
            .draw_texture_region(frame, texture, uv_rect, &transform, Vec2::ONE, tint, camera)
    }

    /// Fill a rectangle with a solid color.
    pub fn draw_rect(&mut self, frame: &mut Frame, rect: Rect, color: [f32; 4], camera: &Camera2D) -> Result<()> {
        let white = self.backend.white_texture;
        self.draw_quad(frame, white, rect.center(), rect.size(), None, color, camera)
    }

    pub fn end_frame(&mut self, frame: Frame) -> Result<()> {
        self.backend.end_frame(frame)
    }

    /// Load a texture from raw RGBA8 data (no PNG decoding).
    ///
    /// `data` must be `width * height * 4` bytes in RGBA8 format.
    pub fn load_texture_from_rgba(&mut self, data: &[u8], width: u32, height: u32) -> Result<TextureHandle> {
        self.backend.load_texture_from_rgba(data, width, height, false)
    }

    /// A 1x1 opaque white texture, useful for tinted solid quads.
    pub fn white_texture(&self) -> TextureHandle {
        self.backend.white_texture
    }

    pub fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.backend.texture_size(handle)
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.backend.surface_size()
    }

    pub fn register_font(&mut self, font: FontArc) -> FontHandle {
        self.backend.text_renderer.register_font(font)
    }

    /// Draw a single line of text. `position` is the left end of the baseline in world units.
    pub fn draw_text(
        &mut self,
        frame: &mut Frame,
        text: &str,
        font: FontHandle,
        size: f32,
        position: Vec2,
        color: [f32; 4],
        camera: &Camera2D,
    ) -> Result<()> {
        self.backend
            .draw_text(frame, text, font, size, position, color, camera)
    }

    /// Measure the width of text without drawing it.
    pub fn measure_text(&self, text: &str, font: FontHandle, size: f32) -> Result<f32> {
        self.backend.text_renderer.measure_text(font, text, size)
    }
}

pub struct Frame {
    surface_texture: Option<wgpu::SurfaceTexture>,
    view: TextureView,
    encoder: Option<CommandEncoder>,
    sprite_draws: Vec<SpriteDrawCommand>,
    clear_color: wgpu::Color,
}

impl Drop for Frame {
    fn drop(&mut self) {
        // A frame dropped without end_frame still has to give its texture back.
        if let Some(surface_texture) = self.surface_texture.take() {
            surface_texture.present();
        }
    }
}

struct TextureEntry {
    /// The underlying GPU texture. Must be kept alive for the view/sampler to be valid.
    #[allow(dead_code)]
    texture: Texture,
    view: TextureView,
    sampler: Sampler,
    size: (u32, u32),
}

struct SpritePipeline {
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    uniform_buffer: Buffer,
    bind_group_layout: BindGroupLayout,
    uniform_buffer_size: u64,
    uniform_alignment: u64,
}

// Maximum number of sprites we can draw per frame
const MAX_SPRITES_PER_FRAME: usize = 4096;

struct WgpuBackend<'window> {
    surface: wgpu::Surface<'window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: SurfaceConfiguration,
    present_mode: PresentMode,
    sprite_pipeline: SpritePipeline,
    textures: HashMap<TextureHandle, TextureEntry>,
    next_texture_id: u32,
    uniform_write_offset: u64,
    bind_group_cache: HashMap<TextureHandle, wgpu::BindGroup>,
    text_renderer: TextRenderer,
    white_texture: TextureHandle,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct SpriteVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct SpriteUniforms {
    mvp: [[f32; 4]; 4],
    color: [f32; 4],
    uv_offset: [f32; 2],
    uv_scale: [f32; 2],
}

// World space is y-up, so the top edge of the quad samples v = 0.
const SPRITE_VERTICES: [SpriteVertex; 6] = [
    SpriteVertex {
        position: [-0.5, 0.5],
        uv: [0.0, 0.0], // Top-left
    },
    SpriteVertex {
        position: [0.5, 0.5],
        uv: [1.0, 0.0], // Top-right
    },
    SpriteVertex {
        position: [0.5, -0.5],
        uv: [1.0, 1.0], // Bottom-right
    },
    SpriteVertex {
        position: [-0.5, 0.5],
        uv: [0.0, 0.0], // Top-left
    },
    SpriteVertex {
        position: [0.5, -0.5],
        uv: [1.0, 1.0], // Bottom-right
    },
    SpriteVertex {
        position: [-0.5, -0.5],
        uv: [0.0, 1.0], // Bottom-left
    },
];

impl<'window> WgpuBackend<'window> {
    fn new(window: &'window Window, vsync: bool) -> Result<Self> {
        let instance = Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&DeviceDescriptor {
            label: Some("platformer-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: Default::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        }))?;

        let size = window.inner_size();
        let capabilities = surface.get_capabilities(&adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .ok_or_else(|| anyhow!("Surface reports no supported formats"))?;

        let present_mode = choose_present_mode(&capabilities.present_modes, vsync);
        let alpha_mode = choose_alpha_mode(&capabilities.alpha_modes);

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::info!(
            "renderer ready: {:?} on {}, {:?}",
            format,
            adapter.get_info().name,
            present_mode
        );

        let sprite_pipeline = create_sprite_pipeline(&device, format);

        let mut backend = Self {
            surface,
            device,
            queue,
            surface_config,
            present_mode,
            sprite_pipeline,
            textures: HashMap::new(),
            next_texture_id: 1,
            uniform_write_offset: 0,
            bind_group_cache: HashMap::new(),
            text_renderer: TextRenderer::new(),
            white_texture: TextureHandle(0),
        };
        backend.white_texture = backend.load_texture_from_rgba(&[255, 255, 255, 255], 1, 1, true)?;

        Ok(backend)
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.surface_config.present_mode = self.present_mode;
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn begin_frame(&mut self) -> Result<Frame> {
        // Reset uniform buffer offset at the start of each frame
        self.uniform_write_offset = 0;

        loop {
            match self.surface.get_current_texture() {
                Ok(surface_texture) => {
                    let view = surface_texture
                        .texture
                        .create_view(&TextureViewDescriptor::default());
                    let encoder = self
                        .device
                        .create_command_encoder(&CommandEncoderDescriptor {
                            label: Some("frame-encoder"),
                        });

                    return Ok(Frame {
                        surface_texture: Some(surface_texture),
                        view,
                        encoder: Some(encoder),
                        sprite_draws: Vec::new(),
                        clear_color: wgpu::Color::BLACK,
                    });
                }
                Err(e) => match e {
                    wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                        self.surface.configure(&self.device, &self.surface_config);
                        continue;
                    }
                    wgpu::SurfaceError::Timeout => {
                        continue;
                    }
                    wgpu::SurfaceError::OutOfMemory => {
                        return Err(anyhow!("Surface ran out of memory"));
                    }
                    wgpu::SurfaceError::Other => {
                        return Err(anyhow!("Surface error: Other"));
                    }
                },
            }
        }
    }

    /// Queue a textured quad of `base_size * transform.scale` world units.
    fn draw_texture_region(
        &mut self,
        frame: &mut Frame,
        texture_handle: TextureHandle,
        uv_rect: Option<[f32; 4]>, // x, y, w, h (normalized)
        transform: &Transform2D,
        base_size: Vec2,
        tint: [f32; 4],
        camera: &Camera2D,
    ) -> Result<()> {
        let texture = self
            .textures
            .get(&texture_handle)
            .ok_or_else(|| anyhow!("Unknown texture handle"))?;

        if self.uniform_write_offset >= self.sprite_pipeline.uniform_buffer_size {
            return Err(anyhow!(
                "Too many sprites drawn in one frame (max: {})",
                MAX_SPRITES_PER_FRAME
            ));
        }

        let model = transform.to_matrix(base_size);
        let vp = camera.view_projection(self.surface_config.width, self.surface_config.height);
        let mvp = vp * model;

        let (uv_offset, uv_scale) = if let Some(rect) = uv_rect {
            ([rect[0], rect[1]], [rect[2], rect[3]])
        } else {
            ([0.0, 0.0], [1.0, 1.0])
        };

        let uniforms = SpriteUniforms {
            mvp: mvp.to_cols_array_2d(),
            color: tint,
            uv_offset,
            uv_scale,
        };

        // Offsets advance in whole alignment steps, so the current offset is always aligned.
        let offset = self.uniform_write_offset;
        self.queue.write_buffer(
            &self.sprite_pipeline.uniform_buffer,
            offset,
            bytemuck::bytes_of(&uniforms),
        );

        let uniform_size = std::mem::size_of::<SpriteUniforms>() as u64;
        self.bind_group_cache.entry(texture_handle).or_insert_with(|| {
            self.device.create_bind_group(&BindGroupDescriptor {
                label: Some("sprite-bind-group"),
                layout: &self.sprite_pipeline.bind_group_layout,
                entries: &[
                    BindGroupEntry {
                        binding: 0,
                        resource: BindingResource::Buffer(wgpu::BufferBinding {
                            buffer: &self.sprite_pipeline.uniform_buffer,
                            offset: 0,
                            size: std::num::NonZeroU64::new(uniform_size),
                        }),
                    },
                    BindGroupEntry {
                        binding: 1,
                        resource: BindingResource::TextureView(&texture.view),
                    },
                    BindGroupEntry {
                        binding: 2,
                        resource: BindingResource::Sampler(&texture.sampler),
                    },
                ],
            })
        });

        frame.sprite_draws.push(SpriteDrawCommand {
            uniform_offset: offset,
            texture_handle,
        });

        self.uniform_write_offset = offset + self.sprite_pipeline.uniform_alignment;

        Ok(())
    }

    /// Record the single pass of the frame: clear, then every queued sprite in order.
    fn flush_sprites(&mut self, frame: &mut Frame) -> Result<()> {
        let encoder = frame
            .encoder
            .as_mut()
            .ok_or_else(|| anyhow!("Frame already ended"))?;

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("sprite-pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(frame.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            multiview_mask: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.sprite_pipeline.pipeline);
        pass.set_vertex_buffer(0, self.sprite_pipeline.vertex_buffer.slice(..));

        for draw_cmd in &frame.sprite_draws {
            let bind_group = self
                .bind_group_cache
                .get(&draw_cmd.texture_handle)
                .ok_or_else(|| anyhow!("Bind group not found for texture handle"))?;
            pass.set_bind_group(0, bind_group, &[draw_cmd.uniform_offset as u32]);
            pass.draw(0..SPRITE_VERTICES.len() as u32, 0..1);
        }

        Ok(())
    }

    fn end_frame(&mut self, mut frame: Frame) -> Result<()> {
        self.flush_sprites(&mut frame)?;

        let encoder = frame
            .encoder
            .take()
            .ok_or_else(|| anyhow!("Frame already ended"))?;
        self.queue.submit(Some(encoder.finish()));

        let surface_texture = frame
            .surface_texture
            .take()
            .ok_or_else(|| anyhow!("Frame already ended"))?;
        surface_texture.present();
        Ok(())
    }

    /// `nearest`: sample without filtering (glyphs and solid fills).
    fn load_texture_from_rgba(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        nearest: bool,
    ) -> Result<TextureHandle> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(anyhow!(
                "RGBA data is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            ));
        }

        let size = Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&TextureDescriptor {
            label: Some("texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            data,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&TextureViewDescriptor::default());

        let filter = if nearest {
            FilterMode::Nearest
        } else {
            FilterMode::Linear
        };
        let sampler = self.device.create_sampler(&SamplerDescriptor {
            label: Some(if nearest { "nearest-sampler" } else { "sprite-sampler" }),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let handle = TextureHandle(self.next_texture_id);
        self.next_texture_id += 1;
        self.textures.insert(
            handle,
            TextureEntry {
                texture,
                view,
                sampler,
                size: (width, height),
            },
        );

        Ok(handle)
    }

    fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(&handle).map(|t| t.size)
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Ensure the glyph is rasterized and uploaded, returning its cache entry.
    fn glyph(&mut self, font: FontHandle, ch: char, size: f32) -> Result<GlyphCacheEntry> {
        if !self.text_renderer.has_glyph(font, ch, size) {
            let raster = self.text_renderer.rasterize(font, ch, size)?;
            let (texture, width, height) = match raster.pixels {
                Some((pixels, width, height)) => {
                    let texture = self.load_texture_from_rgba(&pixels, width, height, true)?;
                    (Some(texture), width as f32, height as f32)
                }
                None => (None, 0.0, 0.0),
            };
            self.text_renderer.cache_glyph(
                font,
                ch,
                size,
                GlyphCacheEntry {
                    texture,
                    width,
                    height,
                    bearing_x: raster.bearing_x,
                    bearing_y: raster.bearing_y,
                    advance: raster.advance,
                },
            );
        }

        self.text_renderer
            .get_glyph(font, ch, size)
            .copied()
            .ok_or_else(|| anyhow!("Failed to rasterize glyph"))
    }

    fn draw_text(
        &mut self,
        frame: &mut Frame,
        text: &str,
        font: FontHandle,
        size: f32,
        position: Vec2,
        color: [f32; 4],
        camera: &Camera2D,
    ) -> Result<()> {
        let mut pen_x = position.x;
        let mut previous: Option<char> = None;

        for ch in text.chars() {
            if let Some(prev) = previous {
                pen_x += self.text_renderer.kern(font, prev, ch, size)?;
            }
            let glyph = self.glyph(font, ch, size)?;

            if let Some(texture) = glyph.texture {
                let center = Vec2::new(
                    pen_x + glyph.bearing_x + glyph.width / 2.0,
                    position.y + glyph.bearing_y - glyph.height / 2.0,
                );
                let transform = Transform2D::new(center, Vec2::ONE, 0.0);
                let base_size = Vec2::new(glyph.width, glyph.height);
                self.draw_texture_region(frame, texture, None, &transform, base_size, color, camera)?;
            }

            pen_x += glyph.advance;
            previous = Some(ch);
        }

        Ok(())
    }
}

fn create_sprite_pipeline(device: &wgpu::Device, surface_format: TextureFormat) -> SpritePipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("sprite-shader"),
        source: ShaderSource::Wgsl(include_str!("sprite.wgsl").into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("sprite-bind-group-layout"),
        entries: &[
            BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<SpriteUniforms>() as u64,
                    ),
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Float { filterable: true },
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("sprite-pipeline-layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("sprite-vertices"),
        contents: bytemuck::cast_slice(&SPRITE_VERTICES),
        usage: BufferUsages::VERTEX,
    });

    // Get the required uniform buffer alignment (usually 256 bytes)
    let uniform_alignment = (device.limits().min_uniform_buffer_offset_alignment as u64)
        .max(std::mem::size_of::<SpriteUniforms>() as u64);

    let uniform_buffer_size = MAX_SPRITES_PER_FRAME as u64 * uniform_alignment;
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("sprite-uniform-buffer"),
        size: uniform_buffer_size,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("sprite-pipeline"),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &vertex_attr_array![0 => Float32x2, 1 => Float32x2],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState::default(),
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    SpritePipeline {
        pipeline,
        vertex_buffer,
        uniform_buffer,
        bind_group_layout,
        uniform_buffer_size,
        uniform_alignment,
    }
}

fn choose_present_mode(modes: &[PresentMode], vsync: bool) -> PresentMode {
    if vsync {
        modes
            .iter()
            .copied()
            .find(|mode| matches!(mode, PresentMode::Fifo | PresentMode::FifoRelaxed))
            .unwrap_or(PresentMode::Fifo)
    } else {
        modes
            .iter()
            .copied()
            .find(|mode| matches!(mode, PresentMode::Immediate | PresentMode::Mailbox))
            .unwrap_or(PresentMode::Fifo)
    }
}

fn choose_alpha_mode(modes: &[CompositeAlphaMode]) -> CompositeAlphaMode {
    modes
        .iter()
        .copied()
        .find(|mode| matches!(mode, CompositeAlphaMode::Auto))
        .unwrap_or_else(|| modes.first().copied().unwrap_or(CompositeAlphaMode::Opaque))
}
