//! Input handling — maps key/mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::geometry::Coordinate;
use crate::core::sheet::SnapTarget;
use crate::ui::sheet_widget::{self, SheetWidget};

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Sheet => handle_sheet_key(state, key),
        ActiveView::Help => handle_help_key(state, key),
    }
}

fn handle_sheet_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::OpenHelp => {
            state.active_view = ActiveView::Help;
        }
        Action::ToggleSheet => {
            toggle_sheet(state);
        }
        Action::ScrollUp => {
            if state.sheet.is_extended() {
                state.sheet_state.scroll_up();
            }
        }
        Action::ScrollDown => {
            if state.sheet.is_extended() {
                let max = max_body_scroll(state);
                state.sheet_state.scroll_down(max);
            }
        }
    }
}

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Sheet;
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view == ActiveView::Help {
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            state.active_view = ActiveView::Sheet;
        }
        return;
    }

    let geom = state.geometry();
    let offset = state.animator.offset_rows();
    let coord = Coordinate::new(f64::from(mouse.column), f64::from(mouse.row));

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !geom.is_on_handle(mouse.column, mouse.row, offset) {
                return;
            }
            state.sampler.begin();
            state.drag_origin = Some(coord);
            state.drag_moved = false;
            state.status_message = None;
            // Freeze any snap in flight; the pointer owns the offset now.
            state.animator.set(state.animator.offset());
            tracing::debug!("drag begin at ({}, {})", mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if !state.sampler.is_active() {
                return;
            }
            // A stream of drag events can starve ticks, so flush here too.
            if let Some(avg) = state.averager.poll(now, &mut state.sampler) {
                apply_pointer(state, avg);
            }
            if let Some(origin) = state.drag_origin {
                if (coord.y - origin.y).abs() >= 1.0 {
                    state.drag_moved = true;
                }
            }
            if state.sampler.push(coord) {
                state.averager.arm(now);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if !state.sampler.is_active() {
                return;
            }
            state.sampler.end();
            // The final samples must not be lost to the window.
            if let Some(avg) = state.averager.flush_now(&mut state.sampler) {
                apply_pointer(state, avg);
            }

            if state.drag_moved {
                let target = state.sheet.release(state.config.snap_threshold);
                tracing::debug!("drag release: snap -> {target:?}");
                start_snap(state, target);
            } else {
                // Press and release without movement: a tap on the handle.
                toggle_sheet(state);
            }
            state.drag_origin = None;
        }
        MouseEventKind::ScrollUp => {
            if state.sheet.is_extended() && geom.is_on_sheet(mouse.column, mouse.row, offset) {
                state.sheet_state.scroll_up();
            }
        }
        MouseEventKind::ScrollDown => {
            if state.sheet.is_extended() && geom.is_on_sheet(mouse.column, mouse.row, offset) {
                let max = max_body_scroll(state);
                state.sheet_state.scroll_down(max);
            }
        }
        _ => {}
    }
}

/// The terminal lost focus (or the pointer was cancelled): release the drag
/// in place and snap from wherever the sheet is.
pub fn handle_pointer_cancel(state: &mut AppState) {
    if !state.sampler.is_active() {
        return;
    }
    state.sampler.cancel();
    state.averager.disarm();
    state.drag_origin = None;
    state.status_message = Some("Drag cancelled".to_string());

    let target = state.sheet.release(state.config.snap_threshold);
    tracing::debug!("drag cancelled: snap -> {target:?}");
    start_snap(state, target);
}

/// Advance time-driven work: flush the averager when its window elapses and
/// step the snap animation.
pub fn handle_tick(state: &mut AppState, now: Instant) {
    if let Some(avg) = state.averager.poll(now, &mut state.sampler) {
        apply_pointer(state, avg);
    }
    state.animator.tick();
}

// ── helpers ─────────────────────────────────────────────────────

/// Feed one averaged pointer coordinate through the translator and pin the
/// rendered offset to it.
fn apply_pointer(state: &mut AppState, avg: Coordinate) {
    let translation = state.geometry().translator().translate(avg);
    state.sheet.apply(translation);
    state.animator.set(translation.y);
    tracing::debug!(
        "pointer avg=({:.1}, {:.1}) offset={:.1} ratio={:.2}",
        avg.x,
        avg.y,
        translation.y,
        translation.ratio()
    );
}

fn toggle_sheet(state: &mut AppState) {
    let target = state.sheet.toggle();
    tracing::debug!("toggle -> {target:?}");
    start_snap(state, target);
}

fn start_snap(state: &mut AppState, target: SnapTarget) {
    let rest = if target.is_extended() {
        state.geometry().extended_offset()
    } else {
        0.0
    };
    state.animator.animate_to(rest);
}

/// Highest valid body scroll for the sheet's current height.
fn max_body_scroll(state: &AppState) -> usize {
    let rect = state
        .geometry()
        .sheet_rect(state.animator.offset_rows());
    let total = sheet_widget::body_line_count(&state.paragraphs, SheetWidget::body_width(rect));
    total.saturating_sub(SheetWidget::body_height(rect) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn test_state() -> AppState {
        let config = AppConfig::defaults();
        let mut state = AppState::new(config, vec!["lorem ipsum dolor".to_string()]);
        // 80x21 terminal: content area 80x20, anchor row 19, rise 11.
        state.terminal_area = Rect::new(0, 0, 80, 21);
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Run enough ticks for the snap animation to settle.
    fn settle(state: &mut AppState, now: Instant) {
        for i in 0u64..100 {
            handle_tick(state, now + Duration::from_millis(200 + i * 33));
        }
    }

    #[test]
    fn drag_past_threshold_snaps_extended() {
        let mut state = test_state();
        let now = Instant::now();

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 19), now);
        assert!(state.sampler.is_active());

        // Drag up 8 rows: ratio 8/11 over the threshold.
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 11), now);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 40, 11), now);

        assert!(state.sheet.is_extended());
        settle(&mut state, now);
        assert_eq!(state.animator.offset_rows(), -11);
    }

    #[test]
    fn short_drag_snaps_back_collapsed() {
        let mut state = test_state();
        let now = Instant::now();

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 19), now);
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 16), now);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 40, 16), now);

        assert!(!state.sheet.is_extended());
        settle(&mut state, now);
        assert_eq!(state.animator.offset_rows(), 0);
    }

    #[test]
    fn tap_on_handle_toggles() {
        let mut state = test_state();
        let now = Instant::now();

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 19), now);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 40, 19), now);
        assert!(state.sheet.is_extended());

        settle(&mut state, now);
        // The handle moved to the top of the extended sheet.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 8), now);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 40, 8), now);
        assert!(!state.sheet.is_extended());
    }

    #[test]
    fn press_off_the_handle_is_ignored() {
        let mut state = test_state();
        let now = Instant::now();

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 5), now);
        assert!(!state.sampler.is_active());
    }

    #[test]
    fn averager_window_batches_drag_samples() {
        let mut state = test_state();
        let now = Instant::now();

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 19), now);
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 17), now);
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 13), now);

        // Window not elapsed: the rendered offset has not moved yet.
        handle_tick(&mut state, now + Duration::from_millis(50));
        assert_eq!(state.animator.offset_rows(), 0);

        // Window elapsed: the two samples average to row 15, offset -4.
        handle_tick(&mut state, now + Duration::from_millis(100));
        assert_eq!(state.animator.offset_rows(), -4);
    }

    #[test]
    fn focus_loss_cancels_and_snaps() {
        let mut state = test_state();
        let now = Instant::now();

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 40, 19), now);
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 10), now);
        handle_tick(&mut state, now + Duration::from_millis(100));

        handle_pointer_cancel(&mut state);
        assert!(!state.sampler.is_active());
        assert!(state.sheet.is_extended()); // ratio 9/11 past the threshold

        settle(&mut state, now);
        assert_eq!(state.animator.offset_rows(), -11);
    }

    #[test]
    fn toggle_key_opens_and_closes() {
        let mut state = test_state();
        let key = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);

        handle_key(&mut state, key);
        assert!(state.sheet.is_extended());
        handle_key(&mut state, key);
        assert!(!state.sheet.is_extended());
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut state = test_state();
        state.active_view = ActiveView::Help;
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }
}
