use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use storehouse_layout::Layout;
use storehouse_render::RenderView;
use wgpu::util::DeviceExt;

use crate::shaders;
use crate::tuning::LightTuning;

/// Spot lights the uniform block has room for. Extra lights are dropped.
pub const MAX_LIGHTS: usize = 64;

/// Crates sit on integer coordinates; the floor is flush with their bottoms.
const FLOOR_Y: f32 = -0.5;
const GRID_MARGIN: i32 = 10;
const CRATE_HALF_EXTENT: f32 = 0.48;
const WOOD: [f32; 3] = [0.62, 0.45, 0.26];
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct GpuLight {
    position: [f32; 4],
    target: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    light_color: [f32; 4],
    light_params: [f32; 4],
    ambient: [f32; 4],
    lights: [GpuLight; MAX_LIGHTS],
}

impl Uniforms {
    fn new(view_proj: Mat4, tuning: &LightTuning, lights: &[GpuLight; MAX_LIGHTS], count: u32) -> Self {
        let t = tuning.sanitized();
        let (cos_outer, cos_inner) = t.cone_cosines();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            light_color: [t.color[0], t.color[1], t.color[2], t.intensity],
            light_params: [cos_outer, cos_inner, t.distance, count as f32],
            ambient: [t.ambient, 0.0, 0.0, 0.0],
            lights: *lights,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct InstanceData {
    offset: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct GridVertex {
    position: [f32; 3],
    color: [f32; 4],
}

/// Unit cube with outward normals and counter-clockwise faces.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    // (normal, tangent); the bitangent is normal x tangent so that the
    // corner order below winds counter-clockwise seen from outside.
    const FACES: [(Vec3, Vec3); 6] = [
        (Vec3::Z, Vec3::X),
        (Vec3::NEG_Z, Vec3::NEG_X),
        (Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_X, Vec3::Z),
        (Vec3::Y, Vec3::X),
        (Vec3::NEG_Y, Vec3::X),
    ];
    const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, tangent) in FACES {
        let bitangent = normal.cross(tangent);
        let base = vertices.len() as u16;
        for (u, v) in CORNERS {
            let corner = (normal + tangent * u + bitangent * v) * CRATE_HALF_EXTENT;
            vertices.push(Vertex {
                position: corner.to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// Square line grid on the floor plane, centered on `center` (rounded to
/// whole units).
fn grid_mesh(center: Vec3, half_extent: i32) -> Vec<GridVertex> {
    let color = [0.4, 0.4, 0.4, 1.0];
    let cx = center.x.round();
    let cz = center.z.round();
    let extent = half_extent as f32;

    let mut verts = Vec::with_capacity((2 * half_extent as usize + 1) * 4);
    for i in -half_extent..=half_extent {
        let offset = i as f32;
        // Lines along X
        verts.push(GridVertex {
            position: [cx - extent, FLOOR_Y, cz + offset],
            color,
        });
        verts.push(GridVertex {
            position: [cx + extent, FLOOR_Y, cz + offset],
            color,
        });
        // Lines along Z
        verts.push(GridVertex {
            position: [cx + offset, FLOOR_Y, cz - extent],
            color,
        });
        verts.push(GridVertex {
            position: [cx + offset, FLOOR_Y, cz + extent],
            color,
        });
    }
    verts
}

/// Grid center and half extent covering the layout footprint plus a margin.
fn grid_frame(layout: &Layout) -> (Vec3, i32) {
    match layout.bounds() {
        Some(bounds) => {
            let size = bounds.size();
            let half = (size.x.max(size.z) / 2.0).ceil() as i32;
            (bounds.center(), half + GRID_MARGIN)
        }
        None => (Vec3::ZERO, 2 * GRID_MARGIN),
    }
}

/// Wood tone varied slightly per aisle so neighbouring aisles read apart.
fn crate_color(aisle: usize) -> [f32; 4] {
    let shade = 0.85 + 0.15 * (aisle % 4) as f32 / 3.0;
    [WOOD[0] * shade, WOOD[1] * shade, WOOD[2] * shade, 1.0]
}

fn crate_instances(layout: &Layout) -> Vec<InstanceData> {
    layout
        .units
        .iter()
        .map(|unit| InstanceData {
            offset: unit.position.extend(1.0).to_array(),
            color: crate_color(unit.aisle),
        })
        .collect()
}

fn light_block(layout: &Layout) -> ([GpuLight; MAX_LIGHTS], u32) {
    if layout.lights.len() > MAX_LIGHTS {
        tracing::warn!(
            lights = layout.lights.len(),
            max = MAX_LIGHTS,
            "layout has more lights than the renderer supports; extra lights are dropped"
        );
    }
    let mut block = [GpuLight::zeroed(); MAX_LIGHTS];
    let mut count = 0u32;
    for (slot, light) in block.iter_mut().zip(&layout.lights) {
        *slot = GpuLight {
            position: light.position.extend(1.0).to_array(),
            target: light.target.extend(1.0).to_array(),
        };
        count += 1;
    }
    (block, count)
}

struct PipelineDesc<'a> {
    label: &'static str,
    shader: &'a wgpu::ShaderModule,
    vs_entry: &'static str,
    fs_entry: &'static str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
}

/// Opaque, depth-tested pipeline drawing into the surface format.
fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    desc: PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some(desc.vs_entry),
            compilation_options: Default::default(),
            buffers: desc.buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some(desc.fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            cull_mode: desc.cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

/// wgpu renderer for a populated warehouse scene.
pub struct WgpuRenderer {
    crate_pipeline: wgpu::RenderPipeline,
    grid_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    grid_vertex_buffer: wgpu::Buffer,
    grid_vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    lights: [GpuLight; MAX_LIGHTS],
    light_count: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let lights = [GpuLight::zeroed(); MAX_LIGHTS];
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(
                Mat4::IDENTITY,
                &LightTuning::default(),
                &lights,
                0,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let crate_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("crate_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CRATE_SHADER.into()),
        });
        let crate_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            surface_format,
            PipelineDesc {
                label: "crate_pipeline",
                shader: &crate_shader,
                vs_entry: "vs_main",
                fs_entry: "fs_main",
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4],
                    },
                ],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
            },
        );

        let grid_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GRID_SHADER.into()),
        });
        let grid_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            surface_format,
            PipelineDesc {
                label: "grid_pipeline",
                shader: &grid_shader,
                vs_entry: "vs_grid",
                fs_entry: "fs_grid",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GridVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4],
                }],
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
            },
        );

        let (cube_verts, cube_indices) = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let grid_verts = grid_mesh(Vec3::ZERO, 2 * GRID_MARGIN);
        let grid_vertex_buffer = Self::create_grid_buffer(device, &grid_verts);
        let instance_buffer = Self::create_instance_buffer(device, &[]);

        Self {
            crate_pipeline,
            grid_pipeline,
            uniform_buffer,
            uniform_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count: cube_indices.len() as u32,
            grid_vertex_buffer,
            grid_vertex_count: grid_verts.len() as u32,
            instance_buffer,
            instance_count: 0,
            lights,
            light_count: 0,
            depth_texture: Self::create_depth_texture(device, width, height),
            surface_format,
        }
    }

    /// Rebuild scene buffers for `layout`. The instance buffer is sized to
    /// the layout's unit count.
    pub fn populate(&mut self, device: &wgpu::Device, layout: &Layout) {
        let instances = crate_instances(layout);
        self.instance_buffer = Self::create_instance_buffer(device, &instances);
        self.instance_count = instances.len() as u32;

        let (center, half_extent) = grid_frame(layout);
        let grid_verts = grid_mesh(center, half_extent);
        self.grid_vertex_buffer = Self::create_grid_buffer(device, &grid_verts);
        self.grid_vertex_count = grid_verts.len() as u32;

        (self.lights, self.light_count) = light_block(layout);

        tracing::info!(
            crates = self.instance_count,
            lights = self.light_count,
            "scene buffers rebuilt"
        );
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    pub fn light_count(&self) -> u32 {
        self.light_count
    }

    /// Render one frame: floor grid + crates.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        view: &RenderView,
        tuning: &LightTuning,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(
                view.view_projection(),
                tuning,
                &self.lights,
                self.light_count,
            )),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.05,
                            b: 0.07,
                            a: 1.0,
                        }),
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
                ..Default::default()
            });

            pass.set_pipeline(&self.grid_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.grid_vertex_buffer.slice(..));
            pass.draw(0..self.grid_vertex_count, 0..1);

            if self.instance_count > 0 {
                pass.set_pipeline(&self.crate_pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.cube_index_count, 0, 0..self.instance_count);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_instance_buffer(device: &wgpu::Device, instances: &[InstanceData]) -> wgpu::Buffer {
        // Keep at least one slot so the buffer is never zero-sized.
        let placeholder = [InstanceData::zeroed()];
        let contents = if instances.is_empty() {
            &placeholder[..]
        } else {
            instances
        };
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("instance_buffer"),
            contents: bytemuck::cast_slice(contents),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }

    fn create_grid_buffer(device: &wgpu::Device, verts: &[GridVertex]) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertex_buffer"),
            contents: bytemuck::cast_slice(verts),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storehouse_layout::{WarehouseConfig, generate_layout};

    fn sample_layout() -> Layout {
        generate_layout(&WarehouseConfig::new(["A1", "A2"], 1, 2, 2))
    }

    #[test]
    fn uniform_block_fits_default_limits() {
        let size = std::mem::size_of::<Uniforms>();
        assert_eq!(size % 16, 0);
        assert!(size <= 16 * 1024);
    }

    #[test]
    fn cube_faces_wind_outward() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(vertices[i as usize].position));
            let normal = Vec3::from(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
            assert!((a.dot(normal) - CRATE_HALF_EXTENT).abs() < 1e-6);
        }
    }

    #[test]
    fn one_instance_per_unit() {
        let layout = sample_layout();
        let instances = crate_instances(&layout);
        assert_eq!(instances.len(), layout.units.len());
        for (instance, unit) in instances.iter().zip(&layout.units) {
            assert_eq!(instance.offset, unit.position.extend(1.0).to_array());
            assert_eq!(instance.color, crate_color(unit.aisle));
        }
    }

    #[test]
    fn aisles_get_distinct_shades() {
        assert_ne!(crate_color(0), crate_color(1));
        assert_eq!(crate_color(0), crate_color(4));
    }

    #[test]
    fn lights_fill_leading_slots() {
        let layout = sample_layout();
        let (block, count) = light_block(&layout);
        assert_eq!(count as usize, layout.lights.len());
        assert_eq!(block[0].position, layout.lights[0].position.extend(1.0).to_array());
        assert_eq!(block[0].target, layout.lights[0].target.extend(1.0).to_array());
        assert_eq!(block[count as usize], GpuLight::zeroed());
    }

    #[test]
    fn excess_lights_are_truncated() {
        let aisles: Vec<String> = (0..70).map(|i| format!("X{i}")).collect();
        let layout = generate_layout(&WarehouseConfig::new(aisles, 1, 1, 1));
        assert!(layout.lights.len() > MAX_LIGHTS);
        let (_, count) = light_block(&layout);
        assert_eq!(count as usize, MAX_LIGHTS);
    }

    #[test]
    fn grid_lies_on_floor_around_layout() {
        let layout = sample_layout();
        let (center, half) = grid_frame(&layout);
        assert!(half > GRID_MARGIN);
        let verts = grid_mesh(center, half);
        assert_eq!(verts.len(), (2 * half as usize + 1) * 4);
        assert!(verts.iter().all(|v| v.position[1] == FLOOR_Y));
    }

    #[test]
    fn empty_layout_grid_centers_on_origin() {
        let layout = generate_layout(&WarehouseConfig::new(Vec::<String>::new(), 1, 1, 1));
        assert_eq!(grid_frame(&layout), (Vec3::ZERO, 2 * GRID_MARGIN));
    }

    #[test]
    fn uniforms_carry_tuning_and_light_count() {
        let tuning = LightTuning::default();
        let (block, count) = light_block(&sample_layout());
        let uniforms = Uniforms::new(Mat4::IDENTITY, &tuning, &block, count);
        let (cos_outer, cos_inner) = tuning.cone_cosines();
        assert_eq!(uniforms.light_params, [cos_outer, cos_inner, tuning.distance, count as f32]);
        assert_eq!(uniforms.light_color[3], tuning.intensity);
        assert_eq!(uniforms.ambient[0], tuning.ambient);
    }
}
