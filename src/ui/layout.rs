//! Layout helpers — split the terminal area into regions and place the sheet.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::geometry::{Coordinate, Translator};

/// Primary screen layout: the page content plus a bottom status bar.
pub struct AppLayout {
    pub content_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page content (takes all remaining space)
                Constraint::Length(1), // status / hint bar
            ])
            .split(area);

        Self {
            content_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

/// Where the sheet lives inside the content area.
///
/// The anchor row is the handle's collapsed rest position (the bottom row of
/// the content area, so a collapsed sheet peeks one row).  `rise` is how many
/// rows the sheet can climb above the anchor when fully extended.
#[derive(Debug, Clone, Copy)]
pub struct SheetGeometry {
    area: Rect,
    anchor_row: u16,
    rise: u16,
}

impl SheetGeometry {
    /// `height_pct` is the share of the content area an extended sheet covers.
    pub fn new(content: Rect, height_pct: u16) -> Self {
        if content.height == 0 {
            return Self {
                area: content,
                anchor_row: content.y,
                rise: 0,
            };
        }

        let extended = ((u32::from(content.height) * u32::from(height_pct) / 100).max(2) as u16)
            .min(content.height);
        Self {
            area: content,
            anchor_row: content.y + content.height - 1,
            rise: extended.saturating_sub(1),
        }
    }

    pub fn rise(&self) -> u16 {
        self.rise
    }

    /// Translation of the fully extended rest position.
    pub fn extended_offset(&self) -> f64 {
        -f64::from(self.rise)
    }

    /// The translator mapping pointer cells onto this geometry.
    pub fn translator(&self) -> Translator {
        Translator::new(
            Coordinate::new(f64::from(self.area.x), f64::from(self.anchor_row)),
            f64::from(self.area.width),
            f64::from(self.rise),
        )
    }

    /// The rect the sheet occupies at a given translation offset
    /// (0 collapsed, `-rise` extended).
    pub fn sheet_rect(&self, offset_rows: i16) -> Rect {
        let lowest = i32::from(self.anchor_row);
        let highest = lowest - i32::from(self.rise);
        let top = (lowest + i32::from(offset_rows)).clamp(highest, lowest) as u16;

        Rect {
            x: self.area.x,
            y: top,
            width: self.area.width,
            height: self.area.y + self.area.height - top,
        }
    }

    /// Is the pointer on the grab handle (the sheet's top row)?
    pub fn is_on_handle(&self, column: u16, row: u16, offset_rows: i16) -> bool {
        let sheet = self.sheet_rect(offset_rows);
        row == sheet.y && column >= sheet.x && column < sheet.x.saturating_add(sheet.width)
    }

    /// Is the pointer anywhere on the sheet at this offset?
    pub fn is_on_sheet(&self, column: u16, row: u16, offset_rows: i16) -> bool {
        let sheet = self.sheet_rect(offset_rows);
        column >= sheet.x
            && column < sheet.x.saturating_add(sheet.width)
            && row >= sheet.y
            && row < sheet.y.saturating_add(sheet.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Rect {
        Rect::new(0, 0, 80, 20)
    }

    #[test]
    fn collapsed_sheet_peeks_one_row_at_the_bottom() {
        let geom = SheetGeometry::new(content(), 60);
        let rect = geom.sheet_rect(0);
        assert_eq!(rect.y, 19);
        assert_eq!(rect.height, 1);
    }

    #[test]
    fn extended_sheet_covers_the_configured_share() {
        let geom = SheetGeometry::new(content(), 60);
        assert_eq!(geom.rise(), 11); // 12 rows extended, 1 row peek
        let rect = geom.sheet_rect(-11);
        assert_eq!(rect.y, 8);
        assert_eq!(rect.height, 12);
    }

    #[test]
    fn offsets_beyond_the_travel_range_are_clamped() {
        let geom = SheetGeometry::new(content(), 60);
        assert_eq!(geom.sheet_rect(-100), geom.sheet_rect(-11));
        assert_eq!(geom.sheet_rect(5), geom.sheet_rect(0));
    }

    #[test]
    fn handle_hit_test_follows_the_sheet() {
        let geom = SheetGeometry::new(content(), 60);
        assert!(geom.is_on_handle(40, 19, 0));
        assert!(!geom.is_on_handle(40, 18, 0));
        assert!(geom.is_on_handle(0, 14, -5));
        assert!(!geom.is_on_handle(80, 14, -5)); // one past the right edge
    }

    #[test]
    fn translator_matches_the_geometry() {
        let geom = SheetGeometry::new(content(), 60);
        let t = geom.translator();
        assert_eq!(t.height(), 11.0);
        assert_eq!(t.max_translation().y, -11.0);
    }

    #[test]
    fn tiny_terminal_degenerates_gracefully() {
        // Two rows: the 2-row extended minimum leaves a rise of one.
        let geom = SheetGeometry::new(Rect::new(0, 0, 10, 2), 10);
        assert_eq!(geom.rise(), 1);
        // One row: nowhere to rise at all.
        let geom = SheetGeometry::new(Rect::new(0, 0, 10, 1), 60);
        assert_eq!(geom.rise(), 0);
        let geom = SheetGeometry::new(Rect::new(0, 0, 10, 0), 60);
        assert_eq!(geom.rise(), 0);
    }
}
