//! The beachline (§4.3): the ordered sequence of parabolic arcs above
//! the current directrix, held in a `binary_search_tree::Tree` keyed
//! by arc position (not an explicit key — position is implied by
//! in-order traversal, the same way the teacher's tree keys the
//! beachline).

use crate::diagram::{Dcel, FaceKey, HalfEdgeKey, VertexKey};
use crate::event::{EventHandle, EventQueue};
use crate::vector2::{breakpoint_x, ccw_sign, circumcircle, Point};
use binary_search_tree::Tree;

/// Opaque handle to a beachline arc; also the type circle events carry
/// as their target (`EventKind::Circle`).
pub type ArcHandle = generational_arena::Index;

#[derive(Clone)]
struct Arc {
    face: FaceKey,
    left_half_edge: Option<HalfEdgeKey>,
    right_half_edge: Option<HalfEdgeKey>,
    event: Option<EventHandle>,
}

impl Arc {
    fn new(face: FaceKey) -> Self {
        Arc {
            face,
            left_half_edge: None,
            right_half_edge: None,
            event: None,
        }
    }
}

/// `find_arc_above` was called on a beachline with no arcs (§4.3).
#[derive(Debug)]
pub struct BeachlineEmpty;

pub struct Beachline {
    tree: Tree<Arc>,
    epsilon: f64,
}

impl Beachline {
    pub fn new(epsilon: f64) -> Self {
        Beachline { tree: Tree::new(), epsilon }
    }

    pub fn is_empty(&self) -> bool {
        !self.tree.has_root()
    }

    fn face_of(&self, arc: ArcHandle) -> FaceKey {
        self.tree.get_contents(arc).face
    }

    fn get_left_half_edge(&self, arc: ArcHandle) -> Option<HalfEdgeKey> {
        self.tree.get_contents(arc).left_half_edge
    }

    fn set_left_half_edge(&mut self, arc: ArcHandle, half_edge: Option<HalfEdgeKey>) {
        self.tree.get_mut_contents(arc).left_half_edge = half_edge;
    }

    fn get_right_half_edge(&self, arc: ArcHandle) -> Option<HalfEdgeKey> {
        self.tree.get_contents(arc).right_half_edge
    }

    fn set_right_half_edge(&mut self, arc: ArcHandle, half_edge: Option<HalfEdgeKey>) {
        self.tree.get_mut_contents(arc).right_half_edge = half_edge;
    }

    fn invalidate_event(&mut self, arc: ArcHandle) {
        if let Some(event) = self.tree.get_mut_contents(arc).event.take() {
            event.invalidate();
        }
    }

    /// Returns the unique arc whose horizontal span at `directrix_y`
    /// contains `x` (§4.3).
    pub fn find_arc_above(&self, x: f64, directrix_y: f64, dcel: &Dcel) -> Result<ArcHandle, BeachlineEmpty> {
        let mut current = self.tree.root.ok_or(BeachlineEmpty)?;
        loop {
            let focus = dcel.get_face_point(self.face_of(current));
            if (focus.y - directrix_y).abs() < self.epsilon {
                // The arc above is degenerate at the current directrix;
                // the new site lands strictly to one side of its focus.
                current = if x < focus.x {
                    self.tree.get_left(current).unwrap_or(current)
                } else if x > focus.x {
                    self.tree.get_right(current).unwrap_or(current)
                } else {
                    return Ok(current);
                };
                continue;
            }

            let prev = self.tree.get_prev(current);
            let next = self.tree.get_next(current);

            let left_bound = match prev {
                Some(p) => {
                    breakpoint_x(dcel.get_face_point(self.face_of(p)), focus, directrix_y, self.epsilon)
                }
                None => f64::NEG_INFINITY,
            };
            let right_bound = match next {
                Some(n) => {
                    breakpoint_x(focus, dcel.get_face_point(self.face_of(n)), directrix_y, self.epsilon)
                }
                None => f64::INFINITY,
            };

            if x < left_bound {
                current = self.tree.get_left(current).unwrap_or(current);
            } else if x > right_bound {
                current = self.tree.get_right(current).unwrap_or(current);
            } else {
                return Ok(current);
            }
        }
    }

    /// Inserts `face` into the beachline at the current directrix
    /// (§4.3). Locates the arc above the new site, invalidates its
    /// pending circle event if any, splits it, and re-checks the two
    /// arcs now flanking the new breakpoint(s) for circle events.
    pub fn insert_site(
        &mut self,
        dcel: &mut Dcel,
        queue: &mut EventQueue,
        face: FaceKey,
        directrix_y: f64,
    ) -> ArcHandle {
        if self.is_empty() {
            return self.tree.create_root(Arc::new(face));
        }

        let site_point = dcel.get_face_point(face);
        let arc = self
            .find_arc_above(site_point.x, directrix_y, dcel)
            .expect("beachline is non-empty, checked above");
        self.invalidate_event(arc);

        let arc_focus = dcel.get_face_point(self.face_of(arc));
        let new_arc = if (arc_focus.y - site_point.y).abs() < self.epsilon {
            self.split_degenerate(dcel, arc, face, arc_focus, site_point)
        } else {
            self.split_generic(dcel, arc, face)
        };

        if let Some(left) = self.tree.get_prev(new_arc) {
            self.predict_circle(dcel, queue, left, directrix_y);
        }
        if let Some(right) = self.tree.get_next(new_arc) {
            self.predict_circle(dcel, queue, right, directrix_y);
        }

        new_arc
    }

    /// `A.focus.y != site.y`: the ordinary three-way split
    /// `A_left, A_new, A_right` (§4.3). The node under `arc` is
    /// reused for `A_new` and returned, matching the teacher's
    /// `break_arc`.
    fn split_generic(&mut self, dcel: &mut Dcel, arc: ArcHandle, new_face: FaceKey) -> ArcHandle {
        let arc_face = self.face_of(arc);
        let left_he = self.get_left_half_edge(arc);
        let right_he = self.get_right_half_edge(arc);

        self.tree.set_contents(arc, Arc::new(new_face));
        let left_arc = self.tree.insert_before(arc, Arc::new(arc_face));
        self.set_left_half_edge(left_arc, left_he);
        let right_arc = self.tree.insert_after(arc, Arc::new(arc_face));
        self.set_right_half_edge(right_arc, right_he);

        // One new edge traces both of the new arc's breakpoints until
        // a future event lets them diverge (§4.3; mirrors the
        // teacher's `handle_site_event`).
        let (he1, he2) = dcel.add_edge(arc_face, new_face);
        self.set_right_half_edge(left_arc, Some(he1));
        self.set_left_half_edge(arc, Some(he2));
        self.set_right_half_edge(arc, Some(he2));
        self.set_left_half_edge(right_arc, Some(he1));

        arc
    }

    /// `A.focus.y == site.y`: the two foci share a y-coordinate, so
    /// the arc above has zero height at the current directrix and the
    /// split produces only one new breakpoint, not two (§4.3).
    fn split_degenerate(
        &mut self,
        dcel: &mut Dcel,
        arc: ArcHandle,
        new_face: FaceKey,
        arc_focus: Point,
        site_point: Point,
    ) -> ArcHandle {
        let arc_face = self.face_of(arc);
        if site_point.x >= arc_focus.x {
            let right_he = self.get_right_half_edge(arc);
            let new_arc = self.tree.insert_after(arc, Arc::new(new_face));
            let (he1, he2) = dcel.add_edge(arc_face, new_face);
            self.set_right_half_edge(arc, Some(he1));
            self.set_left_half_edge(new_arc, Some(he2));
            self.set_right_half_edge(new_arc, right_he);
            new_arc
        } else {
            let left_he = self.get_left_half_edge(arc);
            let new_arc = self.tree.insert_before(arc, Arc::new(new_face));
            let (he1, he2) = dcel.add_edge(new_face, arc_face);
            self.set_right_half_edge(new_arc, Some(he1));
            self.set_left_half_edge(arc, Some(he2));
            self.set_left_half_edge(new_arc, left_he);
            new_arc
        }
    }

    /// The three sites whose arcs are converging at `arc`'s circle
    /// event: its own focus and those of its current neighbours. Must
    /// be read before `remove_arc` splices `arc` out of the tree.
    pub fn circle_event_sites(&self, arc: ArcHandle) -> [FaceKey; 3] {
        let prev = self.tree.get_prev(arc).expect("circle event arc has a left neighbour");
        let next = self.tree.get_next(arc).expect("circle event arc has a right neighbour");
        [self.face_of(prev), self.face_of(arc), self.face_of(next)]
    }

    /// Finalizes the half-edges bounding `arc`, splices it out of the
    /// beachline, opens the new edge between its former neighbours, and
    /// re-checks those neighbours for a new circle event now that they
    /// are adjacent (§4.3).
    pub fn remove_arc(
        &mut self,
        dcel: &mut Dcel,
        queue: &mut EventQueue,
        arc: ArcHandle,
        vertex: VertexKey,
        current_y: f64,
    ) {
        let prev = self.tree.get_prev(arc).expect("circle event arc has a left neighbour");
        let next = self.tree.get_next(arc).expect("circle event arc has a right neighbour");

        self.invalidate_event(prev);
        self.invalidate_event(next);

        let left_he = self
            .get_left_half_edge(arc)
            .expect("arc created by insert_site always has both half-edges");
        let right_he = self
            .get_right_half_edge(arc)
            .expect("arc created by insert_site always has both half-edges");
        let prev_right_he = self
            .get_right_half_edge(prev)
            .expect("prev arc always has a right half-edge");
        let next_left_he = self
            .get_left_half_edge(next)
            .expect("next arc always has a left half-edge");

        dcel.set_half_edge_origin(prev_right_he, vertex);
        dcel.finish(left_he, vertex);
        dcel.set_half_edge_origin(right_he, vertex);
        dcel.finish(next_left_he, vertex);

        dcel.link_half_edges(left_he, right_he);

        let prev_face = self.face_of(prev);
        let next_face = self.face_of(next);
        let (he1, he2) = dcel.add_edge(prev_face, next_face);

        self.set_right_half_edge(prev, Some(he1));
        self.set_left_half_edge(next, Some(he2));

        dcel.finish(he1, vertex);
        dcel.set_half_edge_origin(he2, vertex);

        dcel.link_half_edges(he1, prev_right_he);
        dcel.link_half_edges(next_left_he, he2);

        self.tree.delete_node(arc);

        self.predict_circle(dcel, queue, prev, current_y);
        self.predict_circle(dcel, queue, next, current_y);
    }

    /// Predicts the circle event, if any, for `arc` converging with
    /// its current neighbours (§4.3). Stores the resulting handle on
    /// `arc` so a later split or removal can invalidate it.
    pub fn predict_circle(&mut self, dcel: &Dcel, queue: &mut EventQueue, arc: ArcHandle, current_y: f64) {
        let (prev, next) = match (self.tree.get_prev(arc), self.tree.get_next(arc)) {
            (Some(p), Some(n)) => (p, n),
            _ => return,
        };

        let prev_focus = dcel.get_face_point(self.face_of(prev));
        let arc_focus = dcel.get_face_point(self.face_of(arc));
        let next_focus = dcel.get_face_point(self.face_of(next));

        if ccw_sign(prev_focus, arc_focus, next_focus) >= 0 {
            return;
        }

        let (center, radius) = match circumcircle(prev_focus, arc_focus, next_focus, self.epsilon) {
            Some(c) => c,
            None => return,
        };

        let event_y = center.y - radius;
        if event_y > current_y + self.epsilon {
            return;
        }

        let handle = queue.push_circle(event_y, center.x, center, arc);
        self.tree.get_mut_contents(arc).event = Some(handle);
    }
}
