//! Camera: smoothed follow, world clamp, decaying shake
//!
//! The follow factor is `1 - SMOOTHING_BASE.powf(dt)`, which converges
//! identically at 30, 60, or 144 FPS. A naive `lerp(x, target, 0.1)`
//! per frame does not have that property and must not replace it.
//!
//! Shake is an impulse model: `kick` raises magnitude and remaining
//! time to the max of current and requested, so a big early kick is
//! never cut short or drowned out by a small later one.

use rand::Rng;

/// Fraction of the follow error remaining after one second.
const SMOOTHING_BASE: f32 = 0.002;
/// Magnitude multiplier applied once per update call.
const SHAKE_DECAY: f32 = 0.9;
/// Jitter spans `[-magnitude * 0.7, magnitude * 0.7]` on each axis.
const SHAKE_JITTER: f32 = 0.7;

pub struct Camera {
    /// Top-left of the view in world units.
    pub x: f32,
    pub y: f32,
    pub view_w: f32,
    pub view_h: f32,
    pub world_w: f32,
    pub world_h: f32,
    shake_magnitude: f32,
    shake_remaining: f32,
}

impl Camera {
    pub fn new(view_w: f32, view_h: f32, world_w: f32, world_h: f32) -> Self {
        Camera {
            x: 0.0,
            y: 0.0,
            view_w,
            view_h,
            world_w,
            world_h,
            shake_magnitude: 0.0,
            shake_remaining: 0.0,
        }
    }

    /// Centers the view on the target immediately (session start, room
    /// transition) without a visible pan.
    pub fn snap_to(&mut self, target_x: f32, target_y: f32) {
        self.x = target_x - self.view_w / 2.0;
        self.y = target_y - self.view_h / 2.0;
        self.clamp();
    }

    /// One frame of smoothing toward the target plus shake decay.
    pub fn update(&mut self, dt: f32, target_x: f32, target_y: f32) {
        let t = 1.0 - SMOOTHING_BASE.powf(dt);
        self.x += (target_x - self.view_w / 2.0 - self.x) * t;
        self.y += (target_y - self.view_h / 2.0 - self.y) * t;
        self.clamp();

        self.shake_remaining = (self.shake_remaining - dt).max(0.0);
        if self.shake_remaining <= 0.0 {
            self.shake_magnitude = 0.0;
        } else {
            self.shake_magnitude *= SHAKE_DECAY;
        }
    }

    /// Requests shake. Overlapping kicks hold the maximum of both the
    /// current and requested magnitude and duration.
    pub fn kick(&mut self, power: f32, duration: f32) {
        self.shake_magnitude = self.shake_magnitude.max(power);
        self.shake_remaining = self.shake_remaining.max(duration);
    }

    pub fn shake_magnitude(&self) -> f32 {
        self.shake_magnitude
    }

    pub fn shake_remaining(&self) -> f32 {
        self.shake_remaining
    }

    /// The translation renderers subtract from world coordinates.
    ///
    /// Jitter is recomputed fresh on every call; callers must query it
    /// exactly once per frame for stable visuals within that frame.
    pub fn render_offset(&self, rng: &mut impl Rng) -> (f32, f32) {
        if self.shake_magnitude <= 0.0 {
            return (self.x, self.y);
        }
        let span = self.shake_magnitude * SHAKE_JITTER;
        (
            self.x + rng.gen_range(-span..=span),
            self.y + rng.gen_range(-span..=span),
        )
    }

    /// Clamp into `[0, world - view]`. `min` before `max`: when the
    /// world is smaller than the view the (negative) ceiling loses and
    /// the camera pins to 0. Renderers must tolerate that.
    fn clamp(&mut self) {
        self.x = self.x.min(self.world_w - self.view_w).max(0.0);
        self.y = self.y.min(self.world_h - self.view_h).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_follow_converges_on_target() {
        let mut cam = Camera::new(320.0, 180.0, 2000.0, 2000.0);
        cam.snap_to(400.0, 400.0);
        for _ in 0..120 {
            cam.update(1.0 / 60.0, 1000.0, 1000.0);
        }
        assert!((cam.x - (1000.0 - 160.0)).abs() < 1.0);
        assert!((cam.y - (1000.0 - 90.0)).abs() < 1.0);
    }

    #[test]
    fn test_follow_is_framerate_independent() {
        // Same simulated second at 30 vs 120 FPS lands in the same place
        let mut cam_30 = Camera::new(320.0, 180.0, 4000.0, 4000.0);
        let mut cam_120 = Camera::new(320.0, 180.0, 4000.0, 4000.0);
        cam_30.snap_to(200.0, 200.0);
        cam_120.snap_to(200.0, 200.0);
        for _ in 0..30 {
            cam_30.update(1.0 / 30.0, 2000.0, 2000.0);
        }
        for _ in 0..120 {
            cam_120.update(1.0 / 120.0, 2000.0, 2000.0);
        }
        assert!((cam_30.x - cam_120.x).abs() < 2.0);
        assert!((cam_30.y - cam_120.y).abs() < 2.0);
    }

    #[test]
    fn test_clamp_boundary_world_smaller_than_view() {
        // worldW=100, viewW=320: worldW - viewW is negative, floor wins
        let mut cam = Camera::new(320.0, 180.0, 100.0, 100.0);
        cam.update(1.0 / 60.0, 50.0, 50.0);
        assert_eq!(cam.x, 0.0);
        assert_eq!(cam.y, 0.0);
    }

    #[test]
    fn test_clamp_at_world_edges() {
        let mut cam = Camera::new(320.0, 180.0, 640.0, 360.0);
        for _ in 0..300 {
            cam.update(1.0 / 60.0, 10000.0, 10000.0);
        }
        assert_eq!(cam.x, 320.0);
        assert_eq!(cam.y, 180.0);
    }

    #[test]
    fn test_kick_holds_maximum() {
        let mut cam = Camera::new(320.0, 180.0, 640.0, 360.0);
        cam.kick(2.0, 0.1);
        cam.kick(5.0, 0.05);
        assert_eq!(cam.shake_magnitude(), 5.0);
        assert_eq!(cam.shake_remaining(), 0.1);
    }

    #[test]
    fn test_shake_snaps_to_zero_when_time_runs_out() {
        let mut cam = Camera::new(320.0, 180.0, 640.0, 360.0);
        cam.kick(10.0, 0.05);
        cam.update(0.1, 100.0, 100.0);
        assert_eq!(cam.shake_magnitude(), 0.0);
    }

    #[test]
    fn test_render_offset_jitters_within_bounds() {
        let mut cam = Camera::new(320.0, 180.0, 2000.0, 2000.0);
        cam.snap_to(1000.0, 1000.0);
        cam.kick(10.0, 1.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let (ox, oy) = cam.render_offset(&mut rng);
            assert!((ox - cam.x).abs() <= 10.0 * 0.7 + 1e-4);
            assert!((oy - cam.y).abs() <= 10.0 * 0.7 + 1e-4);
        }
    }

    #[test]
    fn test_render_offset_stable_without_shake() {
        let mut cam = Camera::new(320.0, 180.0, 2000.0, 2000.0);
        cam.snap_to(500.0, 500.0);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(cam.render_offset(&mut rng), (cam.x, cam.y));
    }
}
