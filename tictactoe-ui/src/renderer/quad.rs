//! Textured-quad pipeline that replays a `DrawList`
//!
//! Fills and images share one pipeline: fills sample a 1×1 white texture
//! and carry their color per vertex, images carry white. Consecutive
//! commands on the same texture are merged into one draw call, so the
//! painter's order of the list is preserved.

use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPass, RenderPipeline, Sampler,
    TextureFormat,
};

use crate::{Bitmap, Bounds, DrawCommand, DrawList};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 2],
    tex_coords: [f32; 2],
    color: [f32; 4],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct CanvasUniforms {
    canvas: [f32; 4], // logical width, height, 0, 0
}

/// Which texture a run of indices samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextureKey {
    White,
    Bitmap(u64),
}

struct Batch {
    key: TextureKey,
    indices: Range<u32>,
}

struct CachedTexture {
    _texture: wgpu::Texture,
    bind_group: BindGroup,
    last_frame: u64,
}

pub struct QuadPipeline {
    pipeline: RenderPipeline,
    uniform_buffer: Buffer,
    uniform_bind_group: BindGroup,
    texture_layout: BindGroupLayout,
    sampler: Sampler,
    white: CachedTexture,
    cache: HashMap<u64, CachedTexture>,
    frame: u64,
    vertex_buffer: Option<Buffer>,
    index_buffer: Option<Buffer>,
    batches: Vec<Batch>,
}

impl QuadPipeline {
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(QUAD_SHADER.into()),
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Quad Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Quad Texture Layout"),
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[QuadVertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Uniform Buffer"),
            contents: bytemuck::cast_slice(&[CanvasUniforms {
                canvas: [640.0, 480.0, 0.0, 0.0],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let white = upload_texture(
            device,
            queue,
            &texture_layout,
            &sampler,
            &image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255])),
            "White Texture",
        );

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            sampler,
            white,
            cache: HashMap::new(),
            frame: 0,
            vertex_buffer: None,
            index_buffer: None,
            batches: Vec::new(),
        }
    }

    /// Build vertex data for `list` and upload any bitmaps seen for the
    /// first time. Textures the list no longer references are released.
    pub fn prepare(&mut self, device: &Device, queue: &Queue, list: &DrawList, canvas: (f32, f32)) {
        self.frame += 1;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[CanvasUniforms {
                canvas: [canvas.0, canvas.1, 0.0, 0.0],
            }]),
        );

        let mut vertices: Vec<QuadVertex> = Vec::with_capacity(list.len() * 4);
        let mut indices: Vec<u32> = Vec::with_capacity(list.len() * 6);
        self.batches.clear();

        for command in list.commands() {
            let key = match command {
                DrawCommand::Fill { rect, color } => {
                    push_quad(&mut vertices, &mut indices, rect, [0.0, 0.0, 1.0, 1.0], 0.0, color.to_linear());
                    TextureKey::White
                }
                DrawCommand::Image {
                    bitmap,
                    source,
                    dest,
                    angle,
                } => {
                    self.ensure_uploaded(device, queue, bitmap);
                    let uv = source_uv(bitmap, source.as_ref());
                    push_quad(&mut vertices, &mut indices, dest, uv, *angle, [1.0; 4]);
                    TextureKey::Bitmap(bitmap.id())
                }
            };

            let end = indices.len() as u32;
            match self.batches.last_mut() {
                Some(batch) if batch.key == key => batch.indices.end = end,
                _ => self.batches.push(Batch {
                    key,
                    indices: end - 6..end,
                }),
            }
        }

        let frame = self.frame;
        self.cache.retain(|_, cached| cached.last_frame == frame);

        if vertices.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    pub fn render<'a>(&'a self, render_pass: &mut RenderPass<'a>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for batch in &self.batches {
            let bind_group = match batch.key {
                TextureKey::White => &self.white.bind_group,
                TextureKey::Bitmap(id) => match self.cache.get(&id) {
                    Some(cached) => &cached.bind_group,
                    None => continue,
                },
            };
            render_pass.set_bind_group(1, bind_group, &[]);
            render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
        }
    }

    fn ensure_uploaded(&mut self, device: &Device, queue: &Queue, bitmap: &Bitmap) {
        let frame = self.frame;
        if let Some(cached) = self.cache.get_mut(&bitmap.id()) {
            cached.last_frame = frame;
            return;
        }

        let mut cached = upload_texture(
            device,
            queue,
            &self.texture_layout,
            &self.sampler,
            bitmap.image(),
            "Bitmap Texture",
        );
        cached.last_frame = frame;
        self.cache.insert(bitmap.id(), cached);
    }
}

fn upload_texture(
    device: &Device,
    queue: &Queue,
    layout: &BindGroupLayout,
    sampler: &Sampler,
    rgba: &image::RgbaImage,
    label: &str,
) -> CachedTexture {
    let (width, height) = rgba.dimensions();
    let texture_size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: texture_size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        texture_size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    CachedTexture {
        _texture: texture,
        bind_group,
        last_frame: 0,
    }
}

/// UV rectangle `[u0, v0, u1, v1]` for a pixel source rect.
fn source_uv(bitmap: &Bitmap, source: Option<&Bounds>) -> [f32; 4] {
    let (w, h) = (bitmap.width() as f32, bitmap.height() as f32);
    match source {
        Some(src) if w > 0.0 && h > 0.0 => [
            src.x() / w,
            src.y() / h,
            (src.x() + src.w()) / w,
            (src.y() + src.h()) / h,
        ],
        _ => [0.0, 0.0, 1.0, 1.0],
    }
}

/// Append one quad, rotated clockwise by `angle` degrees about its center.
fn push_quad(
    vertices: &mut Vec<QuadVertex>,
    indices: &mut Vec<u32>,
    rect: &Bounds,
    uv: [f32; 4],
    angle: f32,
    color: [f32; 4],
) {
    let (cx, cy) = rect.center();
    let (hw, hh) = (rect.w() / 2.0, rect.h() / 2.0);
    let (sin, cos) = angle.to_radians().sin_cos();
    let corner = |dx: f32, dy: f32| [cx + dx * cos - dy * sin, cy + dx * sin + dy * cos];

    let base = vertices.len() as u32;
    vertices.push(QuadVertex {
        position: corner(-hw, -hh),
        tex_coords: [uv[0], uv[1]],
        color,
    });
    vertices.push(QuadVertex {
        position: corner(hw, -hh),
        tex_coords: [uv[2], uv[1]],
        color,
    });
    vertices.push(QuadVertex {
        position: corner(hw, hh),
        tex_coords: [uv[2], uv[3]],
        color,
    });
    vertices.push(QuadVertex {
        position: corner(-hw, hh),
        tex_coords: [uv[0], uv[3]],
        color,
    });

    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

const QUAD_SHADER: &str = r#"
struct Uniforms {
    canvas: vec4<f32>, // width, height, 0, 0
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(1) @binding(1)
var s_diffuse: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) tex_coords: vec2<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
    @location(1) color: vec4<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    // canvas pixels, y down, to clip space
    let clip_x = (in.position.x / uniforms.canvas.x) * 2.0 - 1.0;
    let clip_y = 1.0 - (in.position.y / uniforms.canvas.y) * 2.0;

    out.clip_position = vec4<f32>(clip_x, clip_y, 0.0, 1.0);
    out.tex_coords = in.tex_coords;
    out.color = in.color;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(t_diffuse, s_diffuse, in.tex_coords) * in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_unrotated_quad_corners() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        push_quad(
            &mut vertices,
            &mut indices,
            &Bounds::new(10.0, 20.0, 30.0, 40.0),
            [0.0, 0.0, 1.0, 1.0],
            0.0,
            [1.0; 4],
        );

        assert_eq!(vertices[0].position, [10.0, 20.0]);
        assert_eq!(vertices[2].position, [40.0, 60.0]);
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_quarter_turn_is_clockwise_on_screen() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        push_quad(
            &mut vertices,
            &mut indices,
            &Bounds::new(0.0, 0.0, 2.0, 2.0),
            [0.0, 0.0, 1.0, 1.0],
            90.0,
            [1.0; 4],
        );

        // top-left corner ends up top-right with y pointing down
        let [x, y] = vertices[0].position;
        assert!((x - 2.0).abs() < 1e-5);
        assert!(y.abs() < 1e-5);
    }

    #[test]
    fn test_source_uv() {
        let bitmap = Bitmap::new(RgbaImage::new(100, 50));
        assert_eq!(source_uv(&bitmap, None), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(
            source_uv(&bitmap, Some(&Bounds::new(50.0, 0.0, 50.0, 25.0))),
            [0.5, 0.0, 1.0, 0.5]
        );
    }
}
