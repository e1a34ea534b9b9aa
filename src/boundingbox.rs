//! The clipping rectangle an otherwise-unbounded diagram is finished
//! against (§4.4/§4.5): built from the extent of the input sites plus
//! a margin, wide enough that every site lies strictly inside it.

use crate::vector2::{Point, Vec2};
use std::f64;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    None,
}

#[derive(Debug)]
pub struct BoundingBox {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        BoundingBox {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Builds the box from the sites' coordinate extent, grown by
    /// `margin_fraction` of the larger span on every side (§4.5). A
    /// degenerate extent (all sites share an x or y) is widened to a
    /// minimum span first so the margin is never zero.
    pub fn from_extent(points: &[Point], margin_fraction: f64) -> Self {
        let (mut min_x, mut max_x, mut min_y, mut max_y) =
            (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        let span_x = (max_x - min_x).max(1.0);
        let span_y = (max_y - min_y).max(1.0);
        let margin = span_x.max(span_y) * margin_fraction;

        BoundingBox {
            left: min_x - margin,
            right: max_x + margin,
            top: min_y - margin,
            bottom: max_y + margin,
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        (point.x >= self.left)
            && (point.x <= self.right)
            && (point.y >= self.top)
            && (point.y <= self.bottom)
    }

    /// The nearest point to `point` that lies within the box.
    pub fn clamp(&self, point: &Point) -> Point {
        Point::new(
            point.x.max(self.left).min(self.right),
            point.y.max(self.top).min(self.bottom),
        )
    }

    /// The point where the ray from `origin` (which must lie within
    /// the box) in `direction` first leaves the box, and which side
    /// it leaves by.
    pub fn get_intersection(&self, origin: &Point, direction: &Vec2) -> (Point, Side) {
        debug_assert!(self.contains(origin));
        let (t1, side1) = if direction.x > 0.0 {
            ((self.right - origin.x) / direction.x, Side::Right)
        } else if direction.x < 0.0 {
            ((self.left - origin.x) / direction.x, Side::Left)
        } else {
            (f64::INFINITY, Side::None)
        };

        let (t2, side2) = if direction.y > 0.0 {
            ((self.bottom - origin.y) / direction.y, Side::Bottom)
        } else if direction.y < 0.0 {
            ((self.top - origin.y) / direction.y, Side::Top)
        } else {
            (f64::INFINITY, Side::None)
        };

        let (t, side) = if t1 < t2 { (t1, side1) } else { (t2, side2) };

        (*origin + (*direction * t), side)
    }

    pub fn get_top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn get_top_right(&self) -> Point {
        Point::new(self.right, self.top)
    }

    pub fn get_bottom_left(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    pub fn get_bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_extent_has_margin_on_every_side() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let bbox = BoundingBox::from_extent(&points, 0.2);
        assert!(bbox.left < 0.0);
        assert!(bbox.right > 10.0);
        assert!(bbox.top < 0.0);
        assert!(bbox.bottom > 10.0);
    }

    #[test]
    fn clamp_is_identity_inside_box() {
        let bbox = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        let p = Point::new(5.0, 5.0);
        assert_eq!(bbox.clamp(&p), p);
    }

    #[test]
    fn clamp_pulls_outside_point_to_nearest_edge() {
        let bbox = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        let clamped = bbox.clamp(&Point::new(-5.0, 20.0));
        assert_relative_eq!(clamped.x, 0.0);
        assert_relative_eq!(clamped.y, 10.0);
    }

    #[test]
    fn intersection_exits_through_expected_side() {
        let bbox = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        let (point, side) = bbox.get_intersection(&Point::new(5.0, 5.0), &Vec2::new(1.0, 0.0));
        assert_eq!(side, Side::Right);
        assert_relative_eq!(point.x, 10.0);
        assert_relative_eq!(point.y, 5.0);
    }
}
