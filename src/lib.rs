pub mod gpu;
pub mod input;
pub mod mesh;
pub mod pulse;
pub mod quad;
pub mod shader;
pub mod triangle;
pub mod view;
pub mod wnd;
