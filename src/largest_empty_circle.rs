//! Largest-empty-circle analysis (§4.6, optional): among the
//! circumcircles of true Voronoi vertices, the ones whose interior
//! contains no input site, filtered down to the largest radius.

use crate::diagram::Dcel;
use crate::vector2::{circumcircle, Point};
use cgmath::MetricSpace;

/// One maximal empty circle: its center and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmptyCircle {
    pub center: Point,
    pub radius: f64,
}

/// Computes every empty circumcircle tied for the largest radius
/// among all Voronoi vertices, using `epsilon` as the tolerance for
/// both the inside-circle test and the largest-radius tie. Vertices
/// produced only by clipping an open edge to the bounding box
/// (`site_triple` is `None`) are not circumcenters of anything and
/// are skipped, per §4.6.
pub fn compute(dcel: &Dcel, sites: &[Point], epsilon: f64) -> Vec<EmptyCircle> {
    let mut candidates: Vec<EmptyCircle> = Vec::new();

    'vertex: for (_, vertex) in dcel.get_vertices() {
        let triple = match vertex.site_triple {
            Some(t) => t,
            None => continue,
        };
        let points = triple.map(|face| dcel.get_face_point(face));
        let (center, radius) = match circumcircle(points[0], points[1], points[2], epsilon) {
            Some(cr) => cr,
            None => continue,
        };

        for &site in sites {
            if center.distance(site) < radius - epsilon {
                continue 'vertex;
            }
        }

        candidates.push(EmptyCircle { center, radius });
    }

    let max_radius = candidates.iter().fold(f64::MIN, |acc, c| acc.max(c.radius));
    candidates
        .into_iter()
        .filter(|c| (c.radius - max_radius).abs() < epsilon)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundingbox::BoundingBox;
    use crate::voronoi_builder;

    #[test]
    fn square_reports_one_circle_centered_at_the_middle() {
        let sites = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let (dcel, _bbox, _faces): (Dcel, BoundingBox, Vec<_>) =
            voronoi_builder::build(&sites, 0.2, crate::vector2::EPSILON);

        let circles = compute(&dcel, &sites, crate::vector2::EPSILON);
        assert_eq!(circles.len(), 1);
        assert!((circles[0].center.x - 5.0).abs() < 1e-6);
        assert!((circles[0].center.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn colinear_sites_have_no_empty_circle() {
        let sites = vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(10.0, 0.0)];
        let (dcel, _bbox, _faces) = voronoi_builder::build(&sites, 0.2, crate::vector2::EPSILON);
        assert!(compute(&dcel, &sites, crate::vector2::EPSILON).is_empty());
    }
}
