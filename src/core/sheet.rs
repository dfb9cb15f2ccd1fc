//! Sheet state machine — collapsed/extended tracking and snap-on-release.
//!
//! The sheet is a boolean at heart: collapsed or extended.  While a drag is
//! in flight the clamped translation feeds through [`Sheet::apply`], which
//! flips the flag whenever the sheet is pinned at either end of its travel.
//! On release the offset ratio decides which rest position to snap to.

use super::geometry::{Edge, Translation};

/// Rest position the sheet should animate toward after a release or toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    Collapsed,
    Extended,
}

impl SnapTarget {
    pub fn is_extended(self) -> bool {
        matches!(self, SnapTarget::Extended)
    }
}

/// Collapsed/extended state plus the most recent drag position.
#[derive(Debug, Clone, Copy)]
pub struct Sheet {
    extended: bool,
    /// Travel ratio of the last applied translation: 0.0 at the collapsed
    /// rest position, 1.0 fully extended.
    ratio: f64,
}

impl Default for Sheet {
    fn default() -> Self {
        Self {
            extended: false,
            ratio: 0.0,
        }
    }
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Track a drag position.  Hitting either travel limit flips the
    /// extended flag immediately; interior positions leave it untouched.
    pub fn apply(&mut self, translation: Translation) {
        self.ratio = translation.ratio();
        match translation.edge() {
            Edge::Collapsed => self.extended = false,
            Edge::Extended => self.extended = true,
            Edge::Interior => {}
        }
    }

    /// End a drag: snap to extended when the sheet was dragged at least
    /// `threshold` of the way there, back to collapsed otherwise.
    ///
    /// A release without any recorded movement holds `ratio` at the current
    /// rest position, so the sheet snaps back to where it already is.
    pub fn release(&mut self, threshold: f64) -> SnapTarget {
        let target = if self.ratio >= threshold {
            SnapTarget::Extended
        } else {
            SnapTarget::Collapsed
        };
        self.settle(target);
        target
    }

    /// Flip between the two rest positions.
    pub fn toggle(&mut self) -> SnapTarget {
        let target = if self.extended {
            SnapTarget::Collapsed
        } else {
            SnapTarget::Extended
        };
        self.settle(target);
        target
    }

    fn settle(&mut self, target: SnapTarget) {
        self.extended = target.is_extended();
        self.ratio = if self.extended { 1.0 } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Coordinate, Translator};

    const THRESHOLD: f64 = 0.5;

    fn translator() -> Translator {
        Translator::new(Coordinate::new(0.0, 20.0), 80.0, 10.0)
    }

    fn drag_to(sheet: &mut Sheet, row: f64) {
        sheet.apply(translator().translate(Coordinate::new(0.0, row)));
    }

    #[test]
    fn starts_collapsed() {
        let sheet = Sheet::new();
        assert!(!sheet.is_extended());
        assert_eq!(sheet.ratio(), 0.0);
    }

    #[test]
    fn release_past_threshold_snaps_extended() {
        let mut sheet = Sheet::new();
        drag_to(&mut sheet, 13.0); // ratio 0.7
        assert_eq!(sheet.release(THRESHOLD), SnapTarget::Extended);
        assert!(sheet.is_extended());
        assert_eq!(sheet.ratio(), 1.0);
    }

    #[test]
    fn release_short_of_threshold_snaps_collapsed() {
        let mut sheet = Sheet::new();
        drag_to(&mut sheet, 17.0); // ratio 0.3
        assert_eq!(sheet.release(THRESHOLD), SnapTarget::Collapsed);
        assert!(!sheet.is_extended());
        assert_eq!(sheet.ratio(), 0.0);
    }

    #[test]
    fn release_exactly_at_threshold_snaps_extended() {
        let mut sheet = Sheet::new();
        drag_to(&mut sheet, 15.0); // ratio 0.5
        assert_eq!(sheet.release(THRESHOLD), SnapTarget::Extended);
    }

    #[test]
    fn release_without_movement_keeps_current_state() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.release(THRESHOLD), SnapTarget::Collapsed);

        sheet.toggle();
        assert_eq!(sheet.release(THRESHOLD), SnapTarget::Extended);
        assert!(sheet.is_extended());
    }

    #[test]
    fn dragging_to_either_limit_flips_the_flag_mid_drag() {
        let mut sheet = Sheet::new();
        drag_to(&mut sheet, 5.0); // pinned at the extended limit
        assert!(sheet.is_extended());

        drag_to(&mut sheet, 15.0); // interior: flag untouched
        assert!(sheet.is_extended());

        drag_to(&mut sheet, 25.0); // pinned at the collapsed limit
        assert!(!sheet.is_extended());
    }

    #[test]
    fn toggle_alternates_rest_positions() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.toggle(), SnapTarget::Extended);
        assert_eq!(sheet.toggle(), SnapTarget::Collapsed);
        assert!(!sheet.is_extended());
    }
}
