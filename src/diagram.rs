//! The diagram builder (§4.4): a doubly connected edge list (DCEL) of
//! faces, half-edges and vertices, built incrementally by the sweep
//! driver and finished off by clipping open half-edges to the
//! bounding box.

use crate::boundingbox::BoundingBox;
use crate::vector2::Point;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct FaceKey;
    pub struct VertexKey;
    pub struct HalfEdgeKey;
}

/// A face of the diagram: one input site and a handle to one of the
/// half-edges bordering its Voronoi cell.
struct Face {
    point: Point,
    outer_component: Option<HalfEdgeKey>,
}

/// A Voronoi vertex. `site_triple` names the three sites whose arcs
/// met at the circle event that created this vertex; vertices
/// created instead by clipping an open edge to the bounding box (and
/// the box's own corners) carry `None` and are excluded from the
/// largest-empty-circle analysis (§4.6), since they are not true
/// circumcenters.
pub struct Vertex {
    point: Point,
    pub site_triple: Option<[FaceKey; 3]>,
}

/// A half-edge of the DCEL. `left_site`/`right_site` are the two
/// sites whose perpendicular bisector this half-edge traces; this is
/// the "site-triple" context of §3, attached per-edge as the pair
/// that actually varies edge to edge.
pub struct HalfEdge {
    origin: Option<VertexKey>,
    destination: Option<VertexKey>,
    incident_face: FaceKey,
    left_site: FaceKey,
    right_site: FaceKey,
    twin: Option<HalfEdgeKey>,
    prev: Option<HalfEdgeKey>,
    next: Option<HalfEdgeKey>,
}

impl HalfEdge {
    fn new(incident_face: FaceKey, left_site: FaceKey, right_site: FaceKey) -> Self {
        HalfEdge {
            origin: None,
            destination: None,
            incident_face,
            left_site,
            right_site,
            twin: None,
            prev: None,
            next: None,
        }
    }
}

/// Iterates the half-edges bordering a single face, in DCEL `next`
/// order, once the face's ring is fully linked.
pub struct EdgeIterator<'a> {
    dcel: &'a Dcel,
    start_edge: HalfEdgeKey,
    current_edge: Option<HalfEdgeKey>,
}

impl<'a> Iterator for EdgeIterator<'a> {
    type Item = HalfEdgeKey;

    fn next(&mut self) -> Option<HalfEdgeKey> {
        if self.current_edge.is_none() {
            self.current_edge = Some(self.start_edge);
        } else {
            self.current_edge = self.dcel.get_half_edge_next(self.current_edge.unwrap());
            if self.current_edge == Some(self.start_edge) {
                self.current_edge = None;
            }
        }
        self.current_edge
    }
}

/// The diagram builder (§4.4): owns the growing faces, vertices and
/// half-edges and the methods that keep them mutually consistent.
pub struct Dcel {
    faces: SlotMap<FaceKey, Face>,
    vertices: SlotMap<VertexKey, Vertex>,
    half_edges: SlotMap<HalfEdgeKey, HalfEdge>,
    /// One entry per `add_edge` call, so the full set of undirected
    /// edges can be recovered without walking every face's ring.
    edges: Vec<(HalfEdgeKey, HalfEdgeKey)>,
}

impl Dcel {
    pub fn new() -> Self {
        Dcel {
            faces: SlotMap::with_key(),
            vertices: SlotMap::with_key(),
            half_edges: SlotMap::with_key(),
            edges: Vec::new(),
        }
    }

    pub fn add_face(&mut self, point: Point) -> FaceKey {
        self.faces.insert(Face {
            point,
            outer_component: None,
        })
    }

    pub fn get_face_indices(&self) -> Vec<FaceKey> {
        self.faces.keys().collect()
    }

    pub fn get_face_point(&self, face: FaceKey) -> Point {
        self.faces[face].point
    }

    pub fn get_face_outer_component(&self, face: FaceKey) -> Option<HalfEdgeKey> {
        self.faces[face].outer_component
    }

    fn set_face_outer_component(&mut self, face: FaceKey, half_edge: HalfEdgeKey) {
        let face = &mut self.faces[face];
        if face.outer_component.is_none() {
            face.outer_component = Some(half_edge);
        }
    }

    pub fn outer_edge_iter(&self, face: FaceKey) -> EdgeIterator {
        let start_edge = self
            .get_face_outer_component(face)
            .expect("face has no bordering half-edge; diagram was not finished");
        EdgeIterator {
            dcel: self,
            start_edge,
            current_edge: None,
        }
    }

    /// Creates the twin pair of half-edges tracing the bisector
    /// between `left_face` and `right_face`. The new half-edges are
    /// not yet positioned; call `set_half_edge_origin`/`finish` once
    /// the start/end points are known.
    pub fn add_edge(&mut self, left_face: FaceKey, right_face: FaceKey) -> (HalfEdgeKey, HalfEdgeKey) {
        let half_edge_1 = self.add_half_edge(left_face, left_face, right_face);
        let half_edge_2 = self.add_half_edge(right_face, right_face, left_face);

        self.half_edges[half_edge_1].twin = Some(half_edge_2);
        self.half_edges[half_edge_2].twin = Some(half_edge_1);
        self.edges.push((half_edge_1, half_edge_2));

        (half_edge_1, half_edge_2)
    }

    fn add_half_edge(&mut self, face: FaceKey, left_site: FaceKey, right_site: FaceKey) -> HalfEdgeKey {
        let key = self.half_edges.insert(HalfEdge::new(face, left_site, right_site));
        self.set_face_outer_component(face, key);
        key
    }

    pub fn add_vertex(&mut self, point: Point, site_triple: Option<[FaceKey; 3]>) -> VertexKey {
        self.vertices.insert(Vertex { point, site_triple })
    }

    pub fn get_vertex_point(&self, vertex: VertexKey) -> Point {
        self.vertices[vertex].point
    }

    pub fn get_vertices(&self) -> impl Iterator<Item = (VertexKey, &Vertex)> {
        self.vertices.iter()
    }

    pub fn link_half_edges(&mut self, prev: HalfEdgeKey, next: HalfEdgeKey) {
        self.half_edges[prev].next = Some(next);
        self.half_edges[next].prev = Some(prev);
    }

    pub fn get_half_edge_twin(&self, half_edge: HalfEdgeKey) -> Option<HalfEdgeKey> {
        self.half_edges[half_edge].twin
    }

    pub fn get_half_edge_next(&self, half_edge: HalfEdgeKey) -> Option<HalfEdgeKey> {
        self.half_edges[half_edge].next
    }

    pub fn get_half_edge_sites(&self, half_edge: HalfEdgeKey) -> (FaceKey, FaceKey) {
        let edge = &self.half_edges[half_edge];
        (edge.left_site, edge.right_site)
    }

    /// Sets the origin of `half_edge`, the point at which it is known
    /// to start. Idempotent: a second call is a no-op, per §4.4's
    /// `finish` contract applied to the start point.
    pub fn set_half_edge_origin(&mut self, half_edge: HalfEdgeKey, origin: VertexKey) {
        let edge = &mut self.half_edges[half_edge];
        if edge.origin.is_none() {
            edge.origin = Some(origin);
        }
    }

    pub fn get_half_edge_origin(&self, half_edge: HalfEdgeKey) -> Option<VertexKey> {
        self.half_edges[half_edge].origin
    }

    /// Sets the destination of `half_edge`. Idempotent: calling this
    /// twice is a no-op, matching the `finish` contract of §4.4.
    pub fn finish(&mut self, half_edge: HalfEdgeKey, destination: VertexKey) {
        let edge = &mut self.half_edges[half_edge];
        if edge.destination.is_none() {
            edge.destination = Some(destination);
        }
    }

    pub fn get_half_edge_destination(&self, half_edge: HalfEdgeKey) -> Option<VertexKey> {
        self.half_edges[half_edge].destination
    }

    /// A half-edge is finished once both its endpoints are known.
    pub fn is_finished(&self, half_edge: HalfEdgeKey) -> bool {
        let edge = &self.half_edges[half_edge];
        edge.origin.is_some() && edge.destination.is_some()
    }

    pub fn get_half_edge_origin_point(&self, half_edge: HalfEdgeKey) -> Point {
        self.get_vertex_point(self.get_half_edge_origin(half_edge).unwrap())
    }

    /// Calculates the centroid of a face's bordering vertices.
    pub fn calculate_face_center(&self, face: FaceKey) -> Point {
        let mut acc = cgmath::Vector2::new(0.0, 0.0);
        let mut count = 0u32;
        for edge in self.outer_edge_iter(face) {
            let p = self.get_half_edge_origin_point(edge);
            acc += cgmath::Vector2::new(p.x, p.y);
            count += 1;
        }
        Point::new(acc.x / f64::from(count), acc.y / f64::from(count))
    }

    /// Shoelace area of a face's bordering polygon.
    pub fn get_face_area(&self, face: FaceKey) -> f64 {
        self.outer_edge_iter(face)
            .fold(0.0, |acc, edge| {
                let origin = self.get_half_edge_origin_point(edge);
                let destination =
                    self.get_vertex_point(self.get_half_edge_destination(edge).unwrap());
                acc + origin.x * destination.y - destination.x * origin.y
            })
            .abs()
            * 0.5
    }

    /// Finishes every half-edge left open when the sweep ran out of
    /// sites (§4.4): an edge that never met a circle event on one or
    /// either end is extended, in the direction of its bisector, to
    /// where it leaves the bounding box.
    ///
    /// For a twin pair `(he1, he2)` with `he1` incident to the left
    /// site and `he2` to the right, the bisector direction
    /// `orthogonal(left - right)` always points from the pair's
    /// "start" slot (`he1.origin` / `he2.destination`) towards its
    /// "end" slot (`he1.destination` / `he2.origin`); the two missing
    /// slots are filled by casting a ray from whichever slot is
    /// already known (or, if neither is, from the sites' midpoint) in
    /// that direction and its reverse. If the known slot's vertex
    /// already lies outside the box, the ray is cast from its nearest
    /// point inside the box instead, per the clip-both-ends policy
    /// (§9 open question).
    pub fn finalize_open_edges(&mut self, bbox: &BoundingBox) {
        let pairs = self.edges.clone();
        for (he1, he2) in pairs {
            if self.is_finished(he1) {
                continue;
            }

            let (left_site, right_site) = self.get_half_edge_sites(he1);
            let left_point = self.get_face_point(left_site);
            let right_point = self.get_face_point(right_site);
            let direction = crate::vector2::orthogonal(left_point - right_point);

            let start_slot = self.get_half_edge_origin(he1); // == he2.destination
            let end_slot = self.get_half_edge_destination(he1); // == he2.origin

            match (start_slot, end_slot) {
                (Some(_), Some(_)) => unreachable!("is_finished would have been true"),
                (Some(start), None) => {
                    let anchor = self.get_vertex_point(start);
                    let end_point = self.cast_to_box(bbox, anchor, direction);
                    let end_vertex = self.add_vertex(end_point, None);
                    self.finish(he1, end_vertex);
                    self.set_half_edge_origin(he2, end_vertex);
                }
                (None, Some(end)) => {
                    let anchor = self.get_vertex_point(end);
                    let start_point = self.cast_to_box(bbox, anchor, -direction);
                    let start_vertex = self.add_vertex(start_point, None);
                    self.set_half_edge_origin(he1, start_vertex);
                    self.finish(he2, start_vertex);
                }
                (None, None) => {
                    let anchor: Point = cgmath::EuclideanSpace::midpoint(left_point, right_point);
                    let start_point = self.cast_to_box(bbox, anchor, -direction);
                    let end_point = self.cast_to_box(bbox, anchor, direction);
                    let start_vertex = self.add_vertex(start_point, None);
                    let end_vertex = self.add_vertex(end_point, None);
                    self.set_half_edge_origin(he1, start_vertex);
                    self.finish(he1, end_vertex);
                    self.set_half_edge_origin(he2, end_vertex);
                    self.finish(he2, start_vertex);
                }
            }
        }
    }

    fn cast_to_box(&self, bbox: &BoundingBox, anchor: Point, direction: crate::vector2::Vec2) -> Point {
        let clipped_anchor = if bbox.contains(&anchor) {
            anchor
        } else {
            bbox.clamp(&anchor)
        };
        bbox.get_intersection(&clipped_anchor, &direction).0
    }

    pub fn edge_pairs(&self) -> &[(HalfEdgeKey, HalfEdgeKey)] {
        &self.edges
    }
}

impl Default for Dcel {
    fn default() -> Self {
        Self::new()
    }
}
