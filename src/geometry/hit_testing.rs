use egui::{Pos2, Rect, pos2, vec2};

/// Screen-space geometry of an interactive region
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle. Containment includes the edges.
    Rect(Rect),
    /// Circle. Containment excludes the boundary so touching circles never share a point.
    Circle { center: Pos2, radius: f32 },
}

impl Shape {
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Shape::Rect(Rect::from_min_size(pos2(x, y), vec2(width, height)))
    }

    pub fn circle(center: Pos2, radius: f32) -> Self {
        Shape::Circle { center, radius }
    }

    pub fn contains(&self, point: Pos2) -> bool {
        match self {
            Shape::Rect(rect) => {
                point.x >= rect.min.x
                    && point.x <= rect.max.x
                    && point.y >= rect.min.y
                    && point.y <= rect.max.y
            }
            Shape::Circle { center, radius } => point.distance_sq(*center) < radius * radius,
        }
    }

    /// Smallest rectangle enclosing the shape
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect(rect) => *rect,
            Shape::Circle { center, radius } => Rect::from_center_size(*center, vec2(radius * 2.0, radius * 2.0)),
        }
    }

    pub fn center(&self) -> Pos2 {
        match self {
            Shape::Rect(rect) => rect.center(),
            Shape::Circle { center, .. } => *center,
        }
    }

    /// True if the two shapes share at least one point
    pub fn overlaps(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Rect(a), Shape::Rect(b)) => {
                a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
            }
            (Shape::Circle { center: a, radius: ra }, Shape::Circle { center: b, radius: rb }) => {
                a.distance(*b) < ra + rb
            }
            (Shape::Rect(rect), Shape::Circle { center, radius })
            | (Shape::Circle { center, radius }, Shape::Rect(rect)) => {
                let nearest = pos2(
                    center.x.clamp(rect.min.x, rect.max.x),
                    center.y.clamp(rect.min.y, rect.max.y),
                );
                nearest.distance_sq(*center) < radius * radius
            }
        }
    }
}

/// Calculate distance from a point to a line segment
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let shape = Shape::rect(20.0, 20.0, 30.0, 30.0);
        assert!(shape.contains(pos2(20.0, 20.0)));
        assert!(shape.contains(pos2(50.0, 50.0)));
        assert!(!shape.contains(pos2(50.5, 30.0)));
    }

    #[test]
    fn test_touching_circles_do_not_overlap() {
        let a = Shape::circle(pos2(620.0, 35.0), 20.0);
        let b = Shape::circle(pos2(660.0, 35.0), 20.0);
        assert!(!a.overlaps(&b));
        let touch = pos2(640.0, 35.0);
        assert!(!(a.contains(touch) && b.contains(touch)));
    }

    #[test]
    fn test_distance_to_segment() {
        let d = distance_to_line_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-5);
        let end = distance_to_line_segment(pos2(13.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((end - 5.0).abs() < 1e-5);
        let degenerate = distance_to_line_segment(pos2(3.0, 4.0), pos2(0.0, 0.0), pos2(0.0, 0.0));
        assert!((degenerate - 5.0).abs() < 1e-5);
    }
}
