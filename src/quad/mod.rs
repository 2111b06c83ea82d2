use crate::{
    mesh::{ColoredVertex, Mesh, MeshBuffers, Vertex},
    shader::{compile, link, LinkArgs, ShaderStage},
    view::{Draw, DrawArgs, InitArgs},
};

pub(crate) const VERTEX_SHADER: &str = include_str!("vertex.wgsl");
pub(crate) const FRAGMENT_SHADER: &str = include_str!("fragment.wgsl");

/// Indexed quad with per-vertex colors blended across its face.
#[derive(Debug)]
pub struct DrawQuad {
    pipeline: Option<Pipeline>,
}
impl DrawQuad {
    pub fn new() -> Self {
        Self { pipeline: None }
    }
}
impl Default for DrawQuad {
    fn default() -> Self {
        Self::new()
    }
}
impl Draw for DrawQuad {
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
}
impl Pipeline {
    pub fn new(args: InitArgs<'_>) -> Self {
        let mesh = Mesh::quad().upload(args.device);
        let vertex = compile(args.device, ShaderStage::Vertex, "quad", VERTEX_SHADER);
        let fragment = compile(args.device, ShaderStage::Fragment, "quad", FRAGMENT_SHADER);
        let link_args = LinkArgs {
            label: "quad",
            vertex: &vertex,
            fragment: &fragment,
            buffers: &[ColoredVertex::layout()],
            bind_group_layouts: &[],
            format: args.format,
        };
        let pipeline = link(args.device, link_args);
        Self { pipeline, mesh }
    }

    pub fn draw(&self, mut args: DrawArgs<'_>) {
        let mut pass = args.begin_cleared_pass();
        pass.set_pipeline(&self.pipeline);
        self.mesh.draw(&mut pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::tests::validate_wgsl;

    #[test]
    fn test_shaders_validate() {
        let vertex = validate_wgsl(VERTEX_SHADER);
        let entry = vertex
            .entry_points
            .iter()
            .find(|e| e.name == "vs_main")
            .unwrap();
        // one shader input per vertex attribute
        assert_eq!(
            entry.function.arguments.len(),
            ColoredVertex::ATTRIBUTES.len()
        );
        let fragment = validate_wgsl(FRAGMENT_SHADER);
        assert!(fragment.entry_points.iter().any(|e| e.name == "fs_main"));
    }
}
