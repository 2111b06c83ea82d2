use gl_triangle::{triangle::DrawTriangle, wnd};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    wnd::run(Box::new(DrawTriangle::new()))
}
