//! Pure geometry kernel: parabola/directrix math, breakpoint and
//! circumcenter formulas, robust sign tests. No hidden state; every
//! function here is a pure function of its arguments.

use cgmath::{EuclideanSpace, InnerSpace};

/// A site or vertex location. An alias, not a newtype, so the kernel
/// composes directly with `cgmath`'s vector algebra.
pub type Point = cgmath::Point2<f64>;
pub type Vec2 = cgmath::Vector2<f64>;

/// Below this magnitude a quantity is treated as zero everywhere in
/// the kernel except the exact sign tests in [`ccw_sign`].
pub const EPSILON: f64 = 1e-10;

/// Rotates `v` by +90 degrees. Used to turn the vector between two
/// sites into the direction of their perpendicular bisector.
pub fn orthogonal(v: Vec2) -> Vec2 {
    cgmath::Vector2::new(-v.y, v.x)
}

fn det(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// The x-coordinate of the breakpoint between two parabolic arcs
/// with foci `p_left` and `p_right` and a common directrix at
/// `directrix_y`, using `epsilon` as the near-degenerate tolerance.
///
/// If the two foci share a y-coordinate the breakpoint is their
/// midpoint. Otherwise the breakpoint is one of the two roots of the
/// quadratic obtained by equating the two parabolas; the root on the
/// correct branch is chosen from the relative order of the foci's
/// y-coordinates.
pub fn breakpoint_x(p_left: Point, p_right: Point, directrix_y: f64, epsilon: f64) -> f64 {
    if (p_left.y - p_right.y).abs() < epsilon {
        return (p_left.x + p_right.x) / 2.0;
    }

    let d1 = 1.0 / (2.0 * (p_left.y - directrix_y));
    let d2 = 1.0 / (2.0 * (p_right.y - directrix_y));
    let a = d1 - d2;

    let b = 2.0 * (p_right.x * d2 - p_left.x * d1);
    let c = (p_left.y.powi(2) + p_left.x.powi(2) - directrix_y.powi(2)) * d1
        - (p_right.y.powi(2) + p_right.x.powi(2) - directrix_y.powi(2)) * d2;

    if a.abs() < epsilon {
        // Linear case: the quadratic term cancels.
        return -c / b;
    }

    let discriminant = b.powi(2) - 4.0 * a * c;
    if discriminant < 0.0 {
        // Floating-point error pushed a degenerate (tangential) case
        // negative; fall back to the midpoint.
        return (p_left.x + p_right.x) / 2.0;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let root_plus = (-b + sqrt_discriminant) / (2.0 * a);
    let root_minus = (-b - sqrt_discriminant) / (2.0 * a);

    if p_left.y > p_right.y {
        root_plus.max(root_minus)
    } else {
        root_plus.min(root_minus)
    }
}

/// The y-coordinate of the parabolic arc with focus `site` at `x`,
/// for the given directrix. Undefined (and not called) when
/// `site.y == directrix_y`.
pub fn parabola_y(site: Point, x: f64, directrix_y: f64) -> f64 {
    let numerator = (x - site.x).powi(2) + site.y.powi(2) - directrix_y.powi(2);
    numerator / (2.0 * (site.y - directrix_y))
}

/// The circumcircle of three points, as (center, radius). Returns
/// `None` iff the three points are colinear (signed twice-area is
/// zero, within `epsilon`), in which case no circumcircle exists.
pub fn circumcircle(a: Point, b: Point, c: Point, epsilon: f64) -> Option<(Point, f64)> {
    let signed_area2 = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if signed_area2.abs() < epsilon {
        return None;
    }

    let v1 = orthogonal(a - b);
    let v2 = orthogonal(b - c);
    let delta = (c - a) * 0.5;
    let t = det(delta, v2) / det(v1, v2);
    let center = Point::midpoint(a, b) + v1 * t;
    let radius = (center - a).magnitude();
    Some((center, radius))
}

/// Sign of the 2-D cross product `(b - a) x (c - a)`: +1 if `a, b,
/// c` turn left (counter-clockwise), -1 if they turn right, 0 if
/// colinear. Unlike every other comparison in the kernel this is an
/// exact comparison against zero, per the numerical policy in §4.1.
pub fn ccw_sign(a: Point, b: Point, c: Point) -> i32 {
    let cross = det(b - a, c - a);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn breakpoint_shared_y_is_midpoint() {
        let x = breakpoint_x(Point::new(0.0, 5.0), Point::new(10.0, 5.0), 4.0, EPSILON);
        assert_relative_eq!(x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn breakpoint_symmetric_sites() {
        let x = breakpoint_x(Point::new(4.0, 5.0), Point::new(6.0, 5.0), 8.0, EPSILON);
        assert_relative_eq!(x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn parabola_y_matches_definition() {
        let site = Point::new(0.0, 2.0);
        let y = parabola_y(site, 3.0, 0.0);
        // (3-0)^2 / (2*2) + (2+0)/2 = 9/4 + 1 = 3.25
        assert_relative_eq!(y, 3.25, epsilon = 1e-12);
    }

    #[test]
    fn circumcircle_of_right_triangle() {
        let (center, radius) =
            circumcircle(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 4.0), EPSILON).unwrap();
        assert_relative_eq!(center.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(center.y, 2.0, epsilon = 1e-9);
        assert_relative_eq!(radius, (2.0_f64 * 2.0 * 2.0).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn circumcircle_colinear_is_none() {
        assert!(circumcircle(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0), EPSILON).is_none());
    }

    #[test]
    fn ccw_sign_turns() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        assert_eq!(ccw_sign(a, b, Point::new(1.0, 1.0)), 1);
        assert_eq!(ccw_sign(a, b, Point::new(1.0, -1.0)), -1);
        assert_eq!(ccw_sign(a, b, Point::new(2.0, 0.0)), 0);
    }
}
