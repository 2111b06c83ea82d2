use std::time::Instant;

use bytemuck_derive::{Pod, Zeroable};

use crate::{
    mesh::{Mesh, MeshBuffers, Position, Vertex},
    pulse::{pulse_red, Stopwatch},
    shader::{compile, link, LinkArgs, ShaderStage},
    view::{Draw, DrawArgs, InitArgs},
};

pub(crate) const VERTEX_SHADER: &str = include_str!("vertex.wgsl");
pub(crate) const FRAGMENT_SHADER: &str = include_str!("fragment.wgsl");

/// Position-only triangle tinted by a pulsing uniform color.
#[derive(Debug)]
pub struct DrawTriangle {
    pipeline: Option<Pipeline>,
}
impl DrawTriangle {
    pub fn new() -> Self {
        Self { pipeline: None }
    }
}
impl Default for DrawTriangle {
    fn default() -> Self {
        Self::new()
    }
}
impl Draw for DrawTriangle {
    fn init(&mut self, args: InitArgs<'_>) {
        self.pipeline = Some(Pipeline::new(args));
    }

    fn draw(&mut self, args: DrawArgs<'_>) {
        let Some(pipeline) = self.pipeline.as_ref() else {
            tracing::warn!("draw before init");
            return;
        };
        pipeline.draw(args);
    }
}

#[derive(Debug)]
struct Pipeline {
    pipeline: wgpu::RenderPipeline,
    mesh: MeshBuffers,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    clock: Stopwatch,
}
impl Pipeline {
    pub fn new(args: InitArgs<'_>) -> Self {
        let vertex = compile(args.device, ShaderStage::Vertex, "triangle", VERTEX_SHADER);
        let fragment = compile(
            args.device,
            ShaderStage::Fragment,
            "triangle",
            FRAGMENT_SHADER,
        );
        let mesh = Mesh::triangle().upload(args.device);
        let desc = wgpu::BindGroupLayoutDescriptor {
            label: Some("triangle color"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        };
        let bind_group_layout = args.device.create_bind_group_layout(&desc);
        let link_args = LinkArgs {
            label: "triangle",
            vertex: &vertex,
            fragment: &fragment,
            buffers: &[Position::layout()],
            bind_group_layouts: &[&bind_group_layout],
            format: args.format,
        };
        let pipeline = link(args.device, link_args);
        let desc = wgpu::BufferDescriptor {
            label: Some("uniform"),
            size: core::mem::size_of::<Uniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        };
        let uniform_buffer = args.device.create_buffer(&desc);
        let desc = wgpu::BindGroupDescriptor {
            label: Some("triangle color"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        };
        let bind_group = args.device.create_bind_group(&desc);
        Self {
            pipeline,
            mesh,
            uniform_buffer,
            bind_group,
            clock: Stopwatch::new(Instant::now()),
        }
    }

    pub fn draw(&self, mut args: DrawArgs<'_>) {
        let uniform = Uniform::new(pulse_red(self.clock.elapsed()));
        args.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
        let mut pass = args.begin_cleared_pass();
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        self.mesh.draw(&mut pass);
    }
}

/// `vec3<f32>` padded out to its 16-byte uniform alignment.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Uniform {
    pub color: [f32; 3],
    _pad: f32,
}
impl Uniform {
    fn new(color: [f32; 3]) -> Self {
        Self { color, _pad: 0. }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::tests::validate_wgsl;

    #[test]
    fn test_shaders_validate() {
        let vertex = validate_wgsl(VERTEX_SHADER);
        assert!(vertex.entry_points.iter().any(|e| e.name == "vs_main"));
        let fragment = validate_wgsl(FRAGMENT_SHADER);
        assert!(fragment.entry_points.iter().any(|e| e.name == "fs_main"));
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(core::mem::size_of::<Uniform>(), 16);
        let uniform = Uniform::new([0.25, 0., 0.]);
        let bytes = bytemuck::bytes_of(&uniform);
        assert_eq!(&bytes[..4], &0.25_f32.to_ne_bytes());
    }
}
