//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    geometry::Coordinate,
    sampler::{PointerSampler, ThrottledAverager},
    sheet::Sheet,
};
use crate::ui::{
    layout::{AppLayout, SheetGeometry},
    sheet_widget::SheetWidgetState,
    snap::SnapAnimator,
};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Sheet,
    Help,
}

/// Top-level application state.
pub struct AppState {
    /// Collapsed/extended state machine.
    pub sheet: Sheet,
    /// Pointer-move sample buffer for the drag in flight.
    pub sampler: PointerSampler,
    /// Accumulation-window throttle over the sampler.
    pub averager: ThrottledAverager,
    /// Eased vertical offset actually rendered.
    pub animator: SnapAnimator,
    /// Widget-level state (body scroll).
    pub sheet_state: SheetWidgetState,
    /// Placeholder paragraphs shown inside the sheet.
    pub paragraphs: Vec<String>,
    /// User-configurable keybindings and drag tuning.
    pub config: AppConfig,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Full terminal area, cached by the draw pass for mouse hit-testing.
    pub terminal_area: Rect,
    /// Where the pointer went down, for tap detection.
    pub drag_origin: Option<Coordinate>,
    /// Whether the pointer travelled at least one row since it went down.
    pub drag_moved: bool,
}

impl AppState {
    pub fn new(config: AppConfig, paragraphs: Vec<String>) -> Self {
        let averager = ThrottledAverager::new(Duration::from_millis(config.accumulation_ms));
        let animator = SnapAnimator::new(config.snap_speed);
        Self {
            sheet: Sheet::new(),
            sampler: PointerSampler::new(),
            averager,
            animator,
            sheet_state: SheetWidgetState::default(),
            paragraphs,
            config,
            active_view: ActiveView::default(),
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
            drag_origin: None,
            drag_moved: false,
        }
    }

    /// Sheet placement for the current terminal size.
    pub fn geometry(&self) -> SheetGeometry {
        let layout = AppLayout::from_area(self.terminal_area);
        SheetGeometry::new(layout.content_area, self.config.sheet_height_pct)
    }
}
