use gl_triangle::{quad::DrawQuad, wnd};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    wnd::run(Box::new(DrawQuad::new()))
}
