//! Double-precision perspective camera.
//!
//! Holds both derived matrices in `f64`: the projection (from vertical FOV,
//! aspect, near, far) and the view (from eye/center via look-at). Narrowing
//! happens downstream in the MVP pipeline, never here.

use std::fmt;

use crate::math::{approx_zero, Mat4, Vec3};

/// The scene's up direction. This subsystem views the XZ plane, so "up" is
/// the Z axis, not the usual Y.
const UP: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Fail-fast camera precondition violations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CameraError {
    /// near/far/FOV/aspect outside their valid ranges.
    InvalidConfiguration(&'static str),
    /// `eye ≈ center`, or the view direction is parallel to the up vector.
    DegenerateViewDirection,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(what) => {
                write!(f, "invalid camera configuration: {what}")
            }
            Self::DegenerateViewDirection => write!(f, "degenerate view direction"),
        }
    }
}

impl std::error::Error for CameraError {}

/// Perspective camera with double-precision projection and view matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    near: f64,
    far: f64,
    /// Vertical field of view in degrees.
    fov_y_deg: f64,
    aspect: f64,

    projection: Mat4,
    view: Mat4,
}

impl Camera {
    /// Creates a camera and computes its initial projection matrix.
    ///
    /// Validated preconditions: `0 < near < far`, `0 < fov_y_deg < 180`,
    /// `aspect > 0`.
    pub fn new(fov_y_deg: f64, aspect: f64, near: f64, far: f64) -> Result<Self, CameraError> {
        if !(near > 0.0) {
            return Err(CameraError::InvalidConfiguration("near must be positive"));
        }
        if !(near < far) {
            return Err(CameraError::InvalidConfiguration("near must be less than far"));
        }
        if !(fov_y_deg > 0.0 && fov_y_deg < 180.0) {
            return Err(CameraError::InvalidConfiguration(
                "vertical FOV must be in (0, 180) degrees",
            ));
        }
        if !(aspect > 0.0) {
            return Err(CameraError::InvalidConfiguration("aspect ratio must be positive"));
        }

        let mut camera = Self {
            near,
            far,
            fov_y_deg,
            aspect,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        Ok(camera)
    }

    /// Recomputes the projection matrix from the current parameters.
    ///
    /// Symmetric perspective from the vertical FOV half-angle cotangent. If
    /// `sin(fov/2) ≈ 0` the update is skipped and the previous projection is
    /// retained (a guard, not an error).
    pub fn update_projection_matrix(&mut self) {
        let half = (self.fov_y_deg / 2.0).to_radians();
        let sine = half.sin();
        if approx_zero(sine) {
            return;
        }
        let cotan = half.cos() / sine;
        let clip = self.far - self.near;

        self.projection = Mat4::from_rows(
            cotan / self.aspect, 0.0, 0.0, 0.0,
            0.0, cotan, 0.0, 0.0,
            0.0, 0.0, -(self.near + self.far) / clip, -(2.0 * self.near * self.far) / clip,
            0.0, 0.0, -1.0, 0.0,
        );
    }

    /// Updates the aspect ratio and recomputes the projection.
    pub fn set_aspect_ratio(&mut self, aspect: f64) -> Result<(), CameraError> {
        if !(aspect > 0.0) {
            return Err(CameraError::InvalidConfiguration("aspect ratio must be positive"));
        }
        self.aspect = aspect;
        self.update_projection_matrix();
        log::trace!("projection recomputed for aspect {aspect}");
        Ok(())
    }

    /// Rebuilds the view matrix from an eye position and view center.
    ///
    /// Starts from a fresh identity every call: prior view state is fully
    /// discarded, never composed onto. Uses the scene's fixed up vector.
    pub fn look_at(&mut self, eye: Vec3, center: Vec3) -> Result<(), CameraError> {
        let forward = center - eye;
        if forward.approx_null() {
            return Err(CameraError::DegenerateViewDirection);
        }
        if forward.normalized().cross(UP).approx_null() {
            // Sight line parallel to the up vector: no usable side axis.
            return Err(CameraError::DegenerateViewDirection);
        }

        let mut view = Mat4::IDENTITY;
        view.look_at(eye, center, UP);
        self.view = view;
        Ok(())
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    pub fn fov_y_deg(&self) -> f64 {
        self.fov_y_deg
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn camera() -> Camera {
        Camera::new(25.0, 1.0, 0.1, 1024.0).expect("valid test camera")
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn rejects_non_positive_near() {
        assert!(matches!(
            Camera::new(25.0, 1.0, 0.0, 10.0),
            Err(CameraError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Camera::new(25.0, 1.0, -1.0, 10.0),
            Err(CameraError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_near_not_below_far() {
        assert!(Camera::new(25.0, 1.0, 10.0, 10.0).is_err());
        assert!(Camera::new(25.0, 1.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_fov() {
        assert!(Camera::new(0.0, 1.0, 0.1, 10.0).is_err());
        assert!(Camera::new(180.0, 1.0, 0.1, 10.0).is_err());
    }

    #[test]
    fn rejects_non_positive_aspect() {
        assert!(Camera::new(25.0, 0.0, 0.1, 10.0).is_err());
        let mut cam = camera();
        assert!(cam.set_aspect_ratio(-2.0).is_err());
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn projection_matches_cotangent_formula() {
        let cam = camera();
        let half = (25.0f64 / 2.0).to_radians();
        let cotan = half.cos() / half.sin();
        let p = cam.projection();
        assert!(approx_eq(p.at(0, 0), cotan));
        assert!(approx_eq(p.at(1, 1), cotan));
        assert!(approx_eq(p.at(3, 2), -1.0));
        assert!(approx_eq(p.at(3, 3), 0.0));
    }

    #[test]
    fn doubling_aspect_halves_only_the_first_element() {
        let mut cam = camera();
        let before = *cam.projection();
        cam.set_aspect_ratio(2.0).expect("positive aspect");
        let after = cam.projection();

        assert!(approx_eq(after.at(0, 0), before.at(0, 0) * 0.5));
        for row in 0..4 {
            for col in 0..4 {
                if (row, col) == (0, 0) {
                    continue;
                }
                assert_eq!(after.at(row, col), before.at(row, col));
            }
        }
    }

    // ── view ──────────────────────────────────────────────────────────────

    #[test]
    fn look_at_replaces_prior_view_state() {
        let mut cam = camera();
        cam.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO)
            .expect("valid view");
        let first = *cam.view();

        cam.look_at(Vec3::new(5.0, 10.0, 5.0), Vec3::ZERO)
            .expect("valid view");
        cam.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO)
            .expect("valid view");

        // Same inputs give the same matrix, regardless of what happened
        // in between; no accumulation across calls.
        assert_eq!(*cam.view(), first);
    }

    #[test]
    fn look_at_rejects_coincident_eye_and_center() {
        let mut cam = camera();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(cam.look_at(p, p), Err(CameraError::DegenerateViewDirection));
    }

    #[test]
    fn look_at_rejects_sight_line_parallel_to_up() {
        let mut cam = camera();
        // Looking straight along the Z axis, which is this scene's up.
        let err = cam.look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert_eq!(err, Err(CameraError::DegenerateViewDirection));
    }

    #[test]
    fn failed_look_at_leaves_view_unchanged() {
        let mut cam = camera();
        cam.look_at(Vec3::new(1.0, 10.0, 0.0), Vec3::ZERO)
            .expect("valid view");
        let before = *cam.view();
        let p = Vec3::new(4.0, 4.0, 4.0);
        let _ = cam.look_at(p, p);
        assert_eq!(*cam.view(), before);
    }
}
