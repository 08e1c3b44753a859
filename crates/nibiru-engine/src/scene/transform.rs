use crate::math::{Mat4, Vec3};

/// Per-entity model matrix, double precision.
///
/// In this subsystem a transform only ever represents the static world
/// position of an entity's origin: it is built by `translate` calls from an
/// identity base. No rotation or scale path exists here.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transform translated once from identity.
    pub fn from_translation(t: Vec3) -> Self {
        let mut transform = Self::new();
        transform.translate(t);
        transform
    }

    /// Post-multiplies a translation onto the model matrix.
    ///
    /// Successive calls accumulate (the matrix's own translate semantics).
    pub fn translate(&mut self, t: Vec3) {
        self.matrix.translate(t);
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert!(Transform::new().matrix().is_identity());
    }

    #[test]
    fn from_translation_sets_the_translation_column() {
        let t = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.matrix().translation(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn successive_translates_accumulate() {
        let mut t = Transform::new();
        t.translate(Vec3::new(1.0, 0.0, 0.0));
        t.translate(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(t.matrix().translation(), Vec3::new(1.0, 2.0, 0.0));
    }
}
