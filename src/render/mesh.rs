use crate::render::types::VertexData;

/// Index/vertex data ready for upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<VertexData>,
    pub indices: Vec<u32>,
}

/// Subdivided plane centered on the origin in the XY plane, facing +Z.
///
/// Rows run from +Y down to -Y, so `uv.v` is 1 on the top edge. Each grid
/// cell becomes two counter-clockwise triangles.
pub fn plane_geometry(width: f32, height: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let grid_x = width_segments.max(1);
    let grid_y = height_segments.max(1);
    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;

    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;
    let half_width = width * 0.5;
    let half_height = height * 0.5;

    let mut vertices = Vec::with_capacity((grid_x1 * grid_y1) as usize);
    for iy in 0..grid_y1 {
        let y = iy as f32 * segment_height - half_height;
        for ix in 0..grid_x1 {
            let x = ix as f32 * segment_width - half_width;
            vertices.push(VertexData {
                position: [x, -y, 0.0],
                uv: [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                normal: [0.0, 0.0, 1.0],
            });
        }
    }

    let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);
    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = (ix + 1) + grid_x1 * (iy + 1);
            let d = (ix + 1) + grid_x1 * iy;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}
