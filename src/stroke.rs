use egui::Pos2;

/// A pointer drag being rasterized onto the canvas.
///
/// Only the last point is kept, in canvas space and already clipped. Color and
/// thickness come from the active selection at each move.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    last_point: Pos2,
    points: usize,
}

impl Stroke {
    /// Start a stroke at `at`
    pub fn begin(at: Pos2) -> Self {
        Self {
            last_point: at,
            points: 1,
        }
    }

    /// Record a point, returning the previous last point as the segment start
    pub fn extend(&mut self, to: Pos2) -> Pos2 {
        self.points += 1;
        std::mem::replace(&mut self.last_point, to)
    }

    /// Most recent point of the stroke
    pub fn last_point(&self) -> Pos2 {
        self.last_point
    }

    /// Number of points recorded so far, including the first
    pub fn point_count(&self) -> usize {
        self.points
    }
}
