//! Camera orbit animation.
//!
//! State is a plain value owned by the scene/pipeline caller and passed into
//! the tick handler; there is no global timer or counter. The tick source
//! itself lives in [`crate::time::TickTimer`]; pausing is a state transition
//! here, not a timer mutation.

use std::f64::consts::TAU;

use crate::math::Vec3;

/// Running/paused flag plus the tick counter, modulo a fixed period.
///
/// Mutated only by the tick path (`advance`) and the toggle action.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AnimationState {
    running: bool,
    phase: u32,
}

impl AnimationState {
    /// Creates the state with a chosen initial run mode.
    pub fn new(running: bool) -> Self {
        Self { running, phase: 0 }
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Flips between Running and Paused; returns the new mode.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Advances the phase counter by one tick, wrapping at `period`.
    pub fn advance(&mut self, period: u32) {
        debug_assert!(period > 0, "animation period must be non-zero");
        self.phase = (self.phase + 1) % period;
    }
}

/// Sinusoidal orbit of fixed small amplitude around a base pose.
///
/// Each tick derives `t = phase / period ∈ [0, 1)` and offsets both eye and
/// view-center by `(sin(2πt)·amplitude, 0, cos(2πt)·amplitude)`, so the
/// camera circles in the XZ plane without changing its viewing direction.
#[derive(Debug, Copy, Clone)]
pub struct OrbitAnimation {
    pub period: u32,
    pub amplitude: f64,
    pub base_eye: Vec3,
    pub base_center: Vec3,
}

impl OrbitAnimation {
    pub fn new(period: u32, amplitude: f64, base_eye: Vec3, base_center: Vec3) -> Self {
        debug_assert!(period > 0, "orbit period must be non-zero");
        Self {
            period,
            amplitude,
            base_eye,
            base_center,
        }
    }

    /// The world-space offset for a given phase.
    pub fn offset_at(&self, phase: u32) -> Vec3 {
        let t = f64::from(phase % self.period) / f64::from(self.period);
        let angle = t * TAU;
        Vec3::new(angle.sin() * self.amplitude, 0.0, angle.cos() * self.amplitude)
    }

    /// Eye and view-center for a given phase, both shifted by the same
    /// offset.
    pub fn eye_center_at(&self, phase: u32) -> (Vec3, Vec3) {
        let offset = self.offset_at(phase);
        (self.base_eye + offset, self.base_center + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    // ── state machine ─────────────────────────────────────────────────────

    #[test]
    fn initial_mode_is_configurable() {
        assert!(AnimationState::new(true).running());
        assert!(!AnimationState::new(false).running());
    }

    #[test]
    fn toggle_alternates_modes() {
        let mut state = AnimationState::new(true);
        assert!(!state.toggle());
        assert!(state.toggle());
        assert!(state.running());
    }

    #[test]
    fn phase_wraps_at_period() {
        let mut state = AnimationState::new(true);
        for _ in 0..50 {
            state.advance(50);
        }
        assert_eq!(state.phase(), 0);
        state.advance(50);
        assert_eq!(state.phase(), 1);
    }

    #[test]
    fn toggle_does_not_reset_phase() {
        let mut state = AnimationState::new(true);
        state.advance(50);
        state.advance(50);
        state.toggle();
        assert_eq!(state.phase(), 2);
    }

    // ── orbit ─────────────────────────────────────────────────────────────

    fn orbit() -> OrbitAnimation {
        OrbitAnimation::new(50, 0.1, Vec3::new(1.0, 10.0, 0.0), Vec3::ZERO)
    }

    #[test]
    fn offset_at_phase_zero_points_along_z() {
        let o = orbit().offset_at(0);
        assert!(approx_eq(o.x, 0.0));
        assert!(approx_eq(o.y, 0.0));
        assert!(approx_eq(o.z, 0.1));
    }

    #[test]
    fn offset_follows_the_unit_circle() {
        // 12/50 of a turn; the closest whole phase to a quarter period.
        let o = orbit().offset_at(12);
        let t = 12.0 / 50.0 * TAU;
        assert!(approx_eq(o.x, t.sin() * 0.1));
        assert!(approx_eq(o.z, t.cos() * 0.1));
    }

    #[test]
    fn eye_and_center_share_the_offset() {
        let o = orbit();
        let (eye, center) = o.eye_center_at(7);
        assert_eq!(eye - o.base_eye, center - o.base_center);
    }

    #[test]
    fn full_period_returns_to_start() {
        let o = orbit();
        assert_eq!(o.offset_at(0), o.offset_at(50));
    }
}
