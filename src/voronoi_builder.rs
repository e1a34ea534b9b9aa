//! Sweep driver (§4.5): owns the event queue and beachline, replays
//! site and circle events in strict y-descending order (ties broken
//! by x-ascending, enforced by `EventQueue` itself), and finishes the
//! diagram once the queue is drained.

use crate::beachline::Beachline;
use crate::boundingbox::BoundingBox;
use crate::diagram::{Dcel, FaceKey};
use crate::event::{EventKind, EventQueue};
use crate::vector2::Point;

/// Runs Fortune's algorithm to completion over `sites`, returning the
/// finished DCEL, the bounding box it was clipped against, and the
/// face keys in the same order as `sites` (so a caller can recover
/// the original site index of any face without relying on slotmap
/// iteration order). `epsilon` is the near-degenerate tolerance used
/// throughout the beachline (§6).
pub(crate) fn build(
    sites: &[Point],
    bounding_margin_ratio: f64,
    epsilon: f64,
) -> (Dcel, BoundingBox, Vec<FaceKey>) {
    let bbox = BoundingBox::from_extent(sites, bounding_margin_ratio);

    let mut dcel = Dcel::new();
    let mut beachline = Beachline::new(epsilon);
    let mut queue = EventQueue::new();

    let faces: Vec<FaceKey> = sites.iter().map(|&p| dcel.add_face(p)).collect();
    for &face in &faces {
        let point = dcel.get_face_point(face);
        queue.push_site(point.y, point.x, face, point);
    }

    log::debug!("compute: {} sites", faces.len());

    while let Some(event) = queue.pop_top() {
        match &event.kind {
            EventKind::Site { face, point } => {
                log::trace!("site event y={} site=({}, {})", event.y, point.x, point.y);
                beachline.insert_site(&mut dcel, &mut queue, *face, event.y);
            }
            EventKind::Circle { point, arc } => {
                log::trace!("circle event y={} center=({}, {})", event.y, point.x, point.y);
                let site_triple = beachline.circle_event_sites(*arc);
                let vertex = dcel.add_vertex(*point, Some(site_triple));
                beachline.remove_arc(&mut dcel, &mut queue, *arc, vertex, event.y);
            }
        }
    }

    dcel.finalize_open_edges(&bbox);

    let vertex_count = dcel.get_vertices().count();
    let edge_count = dcel.edge_pairs().len();
    log::debug!("compute: {} vertices, {} edges", vertex_count, edge_count);

    (dcel, bbox, faces)
}
