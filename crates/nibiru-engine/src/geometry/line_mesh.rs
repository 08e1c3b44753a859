/// Sentinel index that breaks a polyline strip into disjoint segments.
///
/// Matches the native strip-restart value of the GPU API (`u32::MAX`).
/// Renderers without native restart may remap sentinel entries to the dummy
/// vertex reserved at slot 0.
pub const RESTART_INDEX: u32 = u32::MAX;

/// Line-strip geometry: positions plus a `u32` index sequence.
///
/// Slot 0 always holds a dummy vertex, so real vertices are 1-based and a
/// restart entry has a well-defined fallback target. Strips are separated by
/// [`RESTART_INDEX`] entries in the index stream.
#[derive(Debug, Clone)]
pub struct LineMeshData {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
    revision: u64,
}

impl LineMeshData {
    /// Creates an empty mesh with `dummy` occupying the reserved slot 0.
    pub fn new(dummy: [f32; 3]) -> Self {
        Self {
            positions: vec![dummy],
            indices: Vec::new(),
            revision: 0,
        }
    }

    /// Appends one vertex and returns its index.
    pub fn add_vertex(&mut self, position: [f32; 3]) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Appends a polyline strip followed by a restart entry.
    ///
    /// Returns the new index count. Strips with fewer than two points draw
    /// nothing but are stored anyway; the caller decides what is degenerate.
    pub fn add_strip(&mut self, points: &[[f32; 3]]) -> u32 {
        for &p in points {
            let index = self.add_vertex(p);
            self.indices.push(index);
        }
        self.indices.push(RESTART_INDEX);
        self.revision += 1;
        self.index_count()
    }

    /// Replaces all geometry after the dummy slot.
    ///
    /// `indices` are interpreted against the full vertex buffer: slot 0 is
    /// the dummy, the first supplied position is index 1. Returns the new
    /// index count.
    pub fn set_vertices(&mut self, positions: &[[f32; 3]], indices: &[u32]) -> u32 {
        self.positions.truncate(1);
        self.positions.extend_from_slice(positions);
        self.indices.clear();
        self.indices.extend_from_slice(indices);
        self.revision += 1;
        self.index_count()
    }

    /// Number of vertices, including the reserved dummy slot.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Number of index entries (the draw count), restart entries included.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
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

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Raw position bytes for vertex-buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw index bytes for index-buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMMY: [f32; 3] = [0.0, -1.0, 0.0];

    #[test]
    fn dummy_occupies_slot_zero() {
        let mesh = LineMeshData::new(DUMMY);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions()[0], DUMMY);
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn strips_are_one_based_and_restart_terminated() {
        let mut mesh = LineMeshData::new(DUMMY);
        mesh.add_strip(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(mesh.indices(), &[1, 2, RESTART_INDEX]);

        mesh.add_strip(&[[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 2.0, 0.0]]);
        assert_eq!(
            mesh.indices(),
            &[1, 2, RESTART_INDEX, 3, 4, 5, RESTART_INDEX]
        );
        assert_eq!(mesh.vertex_count(), 6);
    }

    #[test]
    fn mutators_report_the_new_count_and_bump_revision() {
        let mut mesh = LineMeshData::new(DUMMY);
        let r0 = mesh.revision();
        let count = mesh.add_strip(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(count, 3);
        assert!(mesh.revision() > r0);
    }

    #[test]
    fn set_vertices_replaces_payload_but_keeps_the_dummy() {
        let mut mesh = LineMeshData::new(DUMMY);
        mesh.add_strip(&[[9.0, 9.0, 9.0]]);

        let count = mesh.set_vertices(
            &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            &[1, 2, RESTART_INDEX],
        );
        assert_eq!(count, 3);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.positions()[0], DUMMY);
        assert_eq!(mesh.positions()[1], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn byte_views_cover_the_buffers() {
        let mut mesh = LineMeshData::new(DUMMY);
        mesh.add_strip(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(mesh.position_bytes().len(), 3 * 3 * 4);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
    }
}
