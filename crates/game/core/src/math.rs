//! Small numeric helpers shared by the tempo and threat curves.

use glam::Vec3;

/// Clamps `value` to [0, 1].
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Linear interpolation between `from` and `to`; `t` is clamped to [0, 1].
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * clamp01(t)
}

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_delta || distance == 0.0 {
        return target;
    }
    current + offset / distance * max_delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_clamps_parameter() {
        assert_eq!(lerp(0.55, 0.18, -1.0), 0.55);
        assert_eq!(lerp(0.55, 0.18, 2.0), 0.18);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn move_towards_never_overshoots() {
        let start = Vec3::ZERO;
        let target = Vec3::new(3.0, 0.0, 4.0);

        let step = move_towards(start, target, 1.0);
        assert!((step.length() - 1.0).abs() < 1e-5);

        assert_eq!(move_towards(start, target, 10.0), target);
    }
}
