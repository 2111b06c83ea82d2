use std::fmt;

/// Longest diagnostic kept from a failed compile, in bytes.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}
impl ShaderStage {
    pub fn entry_point(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }
}
impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "Vertex"),
            ShaderStage::Fragment => write!(f, "Fragment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileStatus {
    Compiled,
    Failed(String),
}

#[derive(Debug)]
pub struct Shader {
    module: wgpu::ShaderModule,
    stage: ShaderStage,
    status: CompileStatus,
}
impl Shader {
    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }
    pub fn entry_point(&self) -> &'static str {
        self.stage.entry_point()
    }
    pub fn status(&self) -> &CompileStatus {
        &self.status
    }
    pub fn is_compiled(&self) -> bool {
        self.status == CompileStatus::Compiled
    }
}

/// Compiles one WGSL stage.
///
/// A failed compile is reported and otherwise ignored: the returned module is
/// invalid and whatever is built from it renders nothing useful.
pub fn compile(device: &wgpu::Device, stage: ShaderStage, label: &str, source: &str) -> Shader {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let desc = wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    };
    let module = device.create_shader_module(desc);
    let status = match pollster::block_on(device.pop_error_scope()) {
        None => CompileStatus::Compiled,
        Some(e) => CompileStatus::Failed(truncate_log(&e.to_string(), INFO_LOG_CAPACITY).into()),
    };
    report(stage, label, &status);
    Shader {
        module,
        stage,
        status,
    }
}

fn report(stage: ShaderStage, label: &str, status: &CompileStatus) {
    match status {
        CompileStatus::Compiled => tracing::debug!(%stage, label, "shader compiled"),
        CompileStatus::Failed(log) => {
            tracing::warn!(%stage, label, "{stage} shader issues!\n{log}");
        }
    }
}

/// Inputs for linking two compiled stages into a render pipeline.
#[derive(Debug)]
pub struct LinkArgs<'a> {
    pub label: &'a str,
    pub vertex: &'a Shader,
    pub fragment: &'a Shader,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub format: wgpu::TextureFormat,
}

/// Links the vertex and fragment stages into one pipeline drawing triangle lists.
pub fn link(device: &wgpu::Device, args: LinkArgs<'_>) -> wgpu::RenderPipeline {
    if !args.vertex.is_compiled() || !args.fragment.is_compiled() {
        tracing::warn!(label = args.label, "linking a program with a failed stage");
    }
    let desc = wgpu::PipelineLayoutDescriptor {
        label: Some(args.label),
        bind_group_layouts: args.bind_group_layouts,
        push_constant_ranges: &[],
    };
    let layout = device.create_pipeline_layout(&desc);
    let vertex = wgpu::VertexState {
        module: args.vertex.module(),
        entry_point: args.vertex.entry_point(),
        compilation_options: Default::default(),
        buffers: args.buffers,
    };
    let fragment = wgpu::FragmentState {
        module: args.fragment.module(),
        entry_point: args.fragment.entry_point(),
        compilation_options: Default::default(),
        targets: &[Some(args.format.into())],
    };
    let desc = wgpu::RenderPipelineDescriptor {
        label: Some(args.label),
        layout: Some(&layout),
        vertex,
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(fragment),
        multiview: None,
        cache: None,
    };
    let pipeline = device.create_render_pipeline(&desc);
    tracing::debug!(label = args.label, "pipeline linked");
    pipeline
}

/// Cuts `log` down to at most `capacity` bytes without splitting a char.
pub fn truncate_log(log: &str, capacity: usize) -> &str {
    if log.len() <= capacity {
        return log;
    }
    let mut end = capacity;
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    &log[..end]
}
