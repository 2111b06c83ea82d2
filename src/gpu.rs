use anyhow::Context;

pub fn instance() -> wgpu::Instance {
    wgpu::Instance::default()
}
/// handle to graphics card
pub async fn adapter(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'_>>,
) -> Option<wgpu::Adapter> {
    let options = wgpu::RequestAdapterOptions {
        compatible_surface: surface,
        ..Default::default()
    };
    instance.request_adapter(&options).await
}
pub async fn device(adapter: &wgpu::Adapter) -> anyhow::Result<(wgpu::Device, wgpu::Queue)> {
    let trace_path = None;
    let desc = wgpu::DeviceDescriptor {
        label: Some("device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
        memory_hints: wgpu::MemoryHints::Performance,
    };
    let info = adapter.get_info();
    tracing::info!(name = %info.name, backend = ?info.backend, "requesting device");
    let device = adapter
        .request_device(&desc, trace_path)
        .await
        .with_context(|| format!("no device on adapter {}", info.name))?;
    Ok(device)
}
