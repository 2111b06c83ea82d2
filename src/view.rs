use std::sync::Arc;

use anyhow::Context;

use crate::gpu::{adapter, device};

/// Background behind the shape.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

#[derive(Debug)]
pub struct View {
    window: Arc<winit::window::Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    target: wgpu::TextureFormat,
    device: wgpu::Device,
    queue: wgpu::Queue,
    draw: Box<dyn Draw>,
}
impl View {
    pub async fn new(
        window: Arc<winit::window::Window>,
        instance: &wgpu::Instance,
        mut draw: Box<dyn Draw>,
    ) -> anyhow::Result<Self> {
        let surface = instance.create_surface(window.clone())?;
        let adapter = adapter(instance, Some(&surface))
            .await
            .context("no adapter")?;
        let (device, queue) = device(&adapter).await?;
        device.on_uncaptured_error(Box::new(|e| {
            tracing::error!("gpu error: {e}");
        }));
        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps).context("surface not supported by adapter")?;
        let mut config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .context("surface not supported by adapter")?;
        let target = format.remove_srgb_suffix();
        config.format = format;
        if target != format {
            config.view_formats = vec![target];
        }
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);
        tracing::info!(
            width = config.width,
            height = config.height,
            format = ?config.format,
            target = ?target,
            "surface configured"
        );
        let args = InitArgs {
            device: &device,
            queue: &queue,
            format: target,
        };
        draw.init(args);
        Ok(Self {
            window,
            surface,
            config,
            target,
            device,
            queue,
            draw,
        })
    }

    pub fn window(&self) -> &winit::window::Window {
        &self.window
    }

    /// Whether the window currently has something to draw into.
    pub fn is_visible(&self) -> bool {
        has_area(self.window.inner_size())
    }

    pub fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if !has_area(size) {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn draw(&mut self) -> anyhow::Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if self.is_visible() {
                    tracing::debug!("surface out of date; reconfiguring");
                    self.surface.configure(&self.device, &self.config);
                }
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::debug!("frame timed out; skipping");
                return Ok(());
            }
            Err(e) => return Err(e).context("acquire frame"),
        };
        let desc = wgpu::TextureViewDescriptor {
            format: Some(self.target),
            ..Default::default()
        };
        let view = frame.texture.create_view(&desc);
        let desc = wgpu::CommandEncoderDescriptor { label: None };
        let mut command = self.device.create_command_encoder(&desc);
        let args = DrawArgs {
            command: &mut command,
            view,
            queue: &self.queue,
        };
        self.draw.draw(args);
        self.queue.submit([command.finish()]);
        self.window.pre_present_notify();
        frame.present();
        Ok(())
    }
}

/// Picks a linear surface format so shader outputs are stored unencoded.
///
/// Falls back to the first format when the surface only offers sRGB ones; the
/// frame is then drawn through a view with the sRGB suffix removed.
pub fn choose_surface_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }
    let linear = caps.formats.iter().find(|f| !f.is_srgb());
    Some(*linear.unwrap_or(&caps.formats[0]))
}

pub fn has_area(size: winit::dpi::PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

#[derive(Debug)]
pub struct InitArgs<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub format: wgpu::TextureFormat,
}

#[derive(Debug)]
pub struct DrawArgs<'a> {
    pub command: &'a mut wgpu::CommandEncoder,
    pub view: wgpu::TextureView,
    pub queue: &'a wgpu::Queue,
}
impl DrawArgs<'_> {
    /// Starts a pass over the frame that first clears it to [`CLEAR_COLOR`].
    pub fn begin_cleared_pass(&mut self) -> wgpu::RenderPass<'_> {
        let background = wgpu::RenderPassColorAttachment {
            view: &self.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
        };
        let desc = wgpu::RenderPassDescriptor {
            label: None,
            color_attachments: &[Some(background)],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        };
        self.command.begin_render_pass(&desc)
    }
}

/// One demo program: set up once, then record a frame at a time.
pub trait Draw: core::fmt::Debug + Sync + Send {
    fn init(&mut self, args: InitArgs<'_>);
    fn draw(&mut self, args: DrawArgs<'_>);
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalSize;

    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn test_choose_surface_format() {
        use wgpu::TextureFormat::*;

        let vulkan = caps(vec![Bgra8UnormSrgb, Bgra8Unorm, Rgba8UnormSrgb]);
        assert_eq!(choose_surface_format(&vulkan), Some(Bgra8Unorm));

        let linear_first = caps(vec![Rgba8Unorm, Bgra8UnormSrgb]);
        assert_eq!(choose_surface_format(&linear_first), Some(Rgba8Unorm));

        let srgb_only = caps(vec![Rgba8UnormSrgb]);
        assert_eq!(choose_surface_format(&srgb_only), Some(Rgba8UnormSrgb));
        assert_eq!(Rgba8UnormSrgb.remove_srgb_suffix(), Rgba8Unorm);

        assert_eq!(choose_surface_format(&caps(vec![])), None);
    }

    #[test]
    fn test_has_area() {
        assert!(has_area(PhysicalSize::new(800, 600)));
        assert!(!has_area(PhysicalSize::new(0, 0)));
        assert!(!has_area(PhysicalSize::new(800, 0)));
    }
}
