//! Row-level snap animation with exponential ease-out.
//!
//! While a drag is live the offset is pinned to the averaged pointer
//! position.  On release or toggle a target rest offset is set and each
//! tick the offset moves a fixed fraction of the remaining distance —
//! visible deceleration into the snap position.

/// Offset animator for the sheet's vertical translation.
/// Offsets are translation rows: 0 at the collapsed rest position,
/// negative while the sheet is risen.
#[derive(Debug, Clone)]
pub struct SnapAnimator {
    offset: f64,
    target: f64,
    /// Fraction of the remaining distance covered per tick.
    /// Higher = faster settle.  Good range: 0.25–0.45 at 30 fps.
    speed: f64,
}

impl SnapAnimator {
    pub fn new(speed: f64) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Pin the offset directly (live drag) — no animation.
    pub fn set(&mut self, offset: f64) {
        self.offset = offset;
        self.target = offset;
    }

    /// Start easing toward `target`.
    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
    }

    /// Advance toward the target.  Call once per frame.
    pub fn tick(&mut self) {
        self.offset += (self.target - self.offset) * self.speed;
        if (self.target - self.offset).abs() < 0.4 {
            self.offset = self.target;
        }
    }

    /// Current offset in whole rows.
    pub fn offset_rows(&self) -> i16 {
        self.offset.round() as i16
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// True while there is still visible motion.
    pub fn is_animating(&self) -> bool {
        self.offset != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pins_without_animation() {
        let mut anim = SnapAnimator::new(0.35);
        anim.set(-6.0);
        assert_eq!(anim.offset_rows(), -6);
        assert!(!anim.is_animating());
    }

    #[test]
    fn converges_to_the_target() {
        let mut anim = SnapAnimator::new(0.35);
        anim.set(-2.0);
        anim.animate_to(-12.0);
        assert!(anim.is_animating());
        for _ in 0..40 {
            anim.tick();
        }
        assert_eq!(anim.offset_rows(), -12);
        assert!(!anim.is_animating());
    }

    #[test]
    fn settles_exactly_once_close() {
        let mut anim = SnapAnimator::new(0.5);
        anim.set(-0.5);
        anim.animate_to(0.0);
        anim.tick();
        assert_eq!(anim.offset(), 0.0);
        assert!(!anim.is_animating());
    }

    #[test]
    fn speed_is_clamped_to_a_sane_range() {
        let mut anim = SnapAnimator::new(5.0);
        anim.animate_to(-10.0);
        anim.tick();
        // Even a silly speed never overshoots the target.
        assert!(anim.offset() >= -10.0 && anim.offset() < 0.0);
    }
}
