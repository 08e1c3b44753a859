/// Billboard anchor points.
///
/// One position per billboard; the quad itself is expanded screen-facing in
/// the vertex stage, so the only geometry this carries is the anchors.
#[derive(Debug, Clone, Default)]
pub struct BillboardData {
    positions: Vec<[f32; 3]>,
    revision: u64,
}

impl BillboardData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the anchor points; returns the new count.
    pub fn set_points(&mut self, points: &[[f32; 3]]) -> u32 {
        self.positions.clear();
        self.positions.extend_from_slice(points);
        self.revision += 1;
        self.count()
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Bumped on every mutation; renderers watch it to re-upload.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Raw position bytes for vertex-buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}
