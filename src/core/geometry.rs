//! Pointer-to-translation mapping — the clamped coordinate space of the sheet.
//!
//! A [`Translator`] converts an absolute pointer coordinate into an offset
//! relative to the sheet's anchor (its collapsed rest position), bounded to
//! the panel: `x` in `[0, width]`, `y` in `[-height, 0]`.  The sheet rises,
//! so a fully extended panel sits at `y = -height`.

/// A point in terminal-cell space.  Fractional values occur after averaging
/// buffered pointer samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which rest position a clamped translation is pinned to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Collapsed,
    Extended,
    Interior,
}

/// A bounded offset relative to the anchor, plus how far along the travel
/// range it sits (`ratio` 0.0 = collapsed rest, 1.0 = fully extended).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
    ratio: f64,
    edge: Edge,
}

impl Translation {
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }
}

/// Maps absolute pointer coordinates into the sheet's travel range.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    anchor: Coordinate,
    width: f64,
    height: f64,
}

impl Translator {
    pub fn new(anchor: Coordinate, width: f64, height: f64) -> Self {
        Self {
            anchor,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Clamp `client` into the panel's travel range relative to the anchor.
    ///
    /// Vertical position alone decides the edge classification: the sheet
    /// only travels vertically, so a pointer at the horizontal limits is
    /// not pinned to either rest position.
    pub fn translate(&self, client: Coordinate) -> Translation {
        let x = (client.x - self.anchor.x).clamp(0.0, self.width);
        let y = (client.y - self.anchor.y).clamp(-self.height, 0.0);

        // A zero-height panel (degenerate terminal) has nowhere to go.
        if self.height <= 0.0 {
            return Translation {
                x,
                y: 0.0,
                ratio: 0.0,
                edge: Edge::Collapsed,
            };
        }

        let edge = if y <= -self.height {
            Edge::Extended
        } else if y >= 0.0 {
            Edge::Collapsed
        } else {
            Edge::Interior
        };

        Translation {
            x,
            y,
            ratio: -y / self.height,
            edge,
        }
    }

    /// The translation of a fully extended sheet.
    pub fn max_translation(&self) -> Translation {
        Translation {
            x: self.width,
            y: -self.height,
            ratio: if self.height > 0.0 { 1.0 } else { 0.0 },
            edge: if self.height > 0.0 {
                Edge::Extended
            } else {
                Edge::Collapsed
            },
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
