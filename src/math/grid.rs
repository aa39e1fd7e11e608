use glam::Vec3;

/// World position of a maze cell's center. Columns run along +X, rows along -Z,
/// each cell is one unit wide.
pub fn cell_to_world(row: usize, col: usize, height: f32) -> Vec3 {
    Vec3::new(col as f32, height, -(row as f32))
}

/// Maze cell containing `pos`, or `None` when `pos` lies before the first row/column.
pub fn world_to_cell(pos: Vec3) -> Option<(usize, usize)> {
    let col = pos.x.round();
    let row = (-pos.z).round();
    if col < 0.0 || row < 0.0 {
        return None;
    }
    Some((row as usize, col as usize))
}
