use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    gpu::instance,
    input::InputState,
    view::{has_area, Draw, View},
};

#[derive(Debug, Clone)]
pub struct WndConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}
impl WndConfig {
    pub fn attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(self.resizable)
    }
}
impl Default for WndConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL".into(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }
}

/// Opens the default window and runs `draw` in it until closed.
pub fn run(draw: Box<dyn Draw>) -> anyhow::Result<()> {
    let event_loop = EventLoop::builder().build()?;
    let mut app = Wnd::new(draw);
    event_loop.run_app(&mut app)?;
    app.into_result()
}

#[derive(Debug)]
pub struct Wnd {
    config: WndConfig,
    instance: wgpu::Instance,
    draw: Option<Box<dyn Draw>>,
    view: Option<View>,
    input: InputState,
    error: Option<anyhow::Error>,
}
impl Wnd {
    pub fn new(draw: Box<dyn Draw>) -> Self {
        Self::with_config(WndConfig::default(), draw)
    }
    pub fn with_config(config: WndConfig, draw: Box<dyn Draw>) -> Self {
        Self {
            config,
            instance: instance(),
            draw: Some(draw),
            view: None,
            input: InputState::new(),
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn into_result(self) -> anyhow::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        // already open; resumed fires again on some platforms
        let Some(draw) = self.draw.take() else {
            return Ok(());
        };
        let window = event_loop.create_window(self.config.attributes())?;
        let window = Arc::new(window);
        let view = pollster::block_on(View::new(window, &self.instance, draw))?;
        view.window().request_redraw();
        self.view = Some(view);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        tracing::error!("{e:#}");
        self.error = Some(e);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        if let Err(e) = view.draw() {
            self.fail(event_loop, e);
            return;
        }
        if self.input.is_key_pressed(KeyCode::Escape) {
            tracing::info!("escape pressed");
            event_loop.exit();
            return;
        }
        // minimised; Resized restarts the loop
        if view.is_visible() {
            view.window().request_redraw();
        }
    }
}
impl ApplicationHandler for Wnd {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        tracing::info!("resumed");
        if let Err(e) = self.open(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.update_key(&event);
            }
            WindowEvent::Focused(false) => {
                self.input.clear();
            }
            WindowEvent::Resized(size) => {
                if let Some(view) = self.view.as_mut() {
                    view.resize(size);
                    if has_area(size) {
                        view.window().request_redraw();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::Size;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = WndConfig::default();
        assert_eq!(config.title, "OpenGL");
        assert_eq!((config.width, config.height), (800, 600));
        assert!(!config.resizable);

        let attributes = config.attributes();
        assert_eq!(attributes.title, "OpenGL");
        assert!(!attributes.resizable);
        assert_eq!(
            attributes.inner_size,
            Some(Size::Logical(LogicalSize::new(800., 600.)))
        );
    }
}
