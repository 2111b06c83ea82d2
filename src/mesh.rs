use bytemuck_derive::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Vertex types that know their own buffer layout.
pub trait Vertex: bytemuck::Pod {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: core::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    pub position: [f32; 2],
}
impl Vertex for Position {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x2,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ColoredVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}
impl Vertex for ColoredVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x3,
    ];
}

#[derive(Debug, Clone)]
pub struct Mesh<V> {
    pub vertices: Vec<V>,
    pub indices: Option<Vec<u32>>,
}
impl<V> Mesh<V> {
    /// Number of vertices the draw call walks.
    pub fn draw_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.vertices.len() as u32,
        }
    }
}
impl Mesh<Position> {
    pub fn triangle() -> Self {
        let vertices = vec![
            Position {
                position: [0., 0.5],
            },
            Position {
                position: [0.5, -0.5],
            },
            Position {
                position: [-0.5, -0.5],
            },
        ];
        Self {
            vertices,
            indices: None,
        }
    }
}
impl Mesh<ColoredVertex> {
    pub fn quad() -> Self {
        let red = [1., 0., 0.];
        let green = [0., 1., 0.];
        let blue = [0., 0., 1.];
        let vertices = vec![
            ColoredVertex {
                position: [-0.5, 0.5],
                color: red,
            },
            ColoredVertex {
                position: [0.5, 0.5],
                color: green,
            },
            ColoredVertex {
                position: [0.5, -0.5],
                color: blue,
            },
            ColoredVertex {
                position: [-0.5, -0.5],
                color: red,
            },
        ];
        let vertex_pos = QuadVertexPos {
            top_left: 0,
            top_right: 1,
            bottom_right: 2,
            bottom_left: 3,
        };
        Self {
            vertices,
            indices: Some(quad_indices(vertex_pos).into()),
        }
    }
}
impl<V: Vertex> Mesh<V> {
    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffers {
        let desc = wgpu::util::BufferInitDescriptor {
            label: Some("vertices"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        };
        let vertex_buffer = device.create_buffer_init(&desc);
        let index_buffer = self.indices.as_ref().map(|indices| {
            let desc = wgpu::util::BufferInitDescriptor {
                label: Some("indices"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            };
            device.create_buffer_init(&desc)
        });
        tracing::debug!(
            vertices = self.vertices.len(),
            indexed = index_buffer.is_some(),
            "mesh uploaded"
        );
        MeshBuffers {
            vertex_buffer,
            index_buffer,
            count: self.draw_count(),
        }
    }
}

/// GPU side of a [`Mesh`].
#[derive(Debug)]
pub struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    count: u32,
}
impl MeshBuffers {
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.count, 0, 0..1);
            }
            None => pass.draw(0..self.count, 0..1),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct QuadVertexPos {
    pub top_left: u32,
    pub top_right: u32,
    pub bottom_right: u32,
    pub bottom_left: u32,
}
fn quad_indices(vertex_pos: QuadVertexPos) -> [u32; 6] {
    [
        vertex_pos.top_left,
        vertex_pos.top_right,
        vertex_pos.bottom_right, //
        vertex_pos.bottom_right,
        vertex_pos.bottom_left,
        vertex_pos.top_left,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_layout() {
        let layout = Position::layout();
        assert_eq!(layout.array_stride, 2 * 4);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn test_colored_vertex_layout() {
        let layout = ColoredVertex::layout();
        assert_eq!(layout.array_stride, 5 * 4);
        let color = layout.attributes[1];
        assert_eq!(color.shader_location, 1);
        assert_eq!(color.offset, core::mem::offset_of!(ColoredVertex, color) as u64);
        assert_eq!(color.offset, 2 * 4);
        assert_eq!(color.format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn test_triangle() {
        let mesh = Mesh::triangle();
        assert!(mesh.indices.is_none());
        assert_eq!(mesh.draw_count(), 3);
        let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        assert_eq!(bytes.len(), 3 * 2 * 4);
    }

    #[test]
    fn test_quad() {
        let mesh = Mesh::quad();
        let indices = mesh.indices.as_ref().unwrap();
        assert_eq!(indices, &[0, 1, 2, 2, 3, 0]);
        assert_eq!(mesh.draw_count(), 6);
        assert!(indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));

        // top-left and bottom-left share a color
        assert_eq!(mesh.vertices[0].color, mesh.vertices[3].color);
        assert_eq!(mesh.vertices[2].position, [0.5, -0.5]);
    }
}
