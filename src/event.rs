//! Event queue (§4.2): a max-heap ordered by event y (descending),
//! ties broken by x (ascending). Circle events are invalidated
//! logically — a flag flip, no heap mutation — since arcs routinely
//! outlive or lose their predicted circle event and a heap built for
//! decrease-key would be needless complexity here.

use crate::beachline::ArcHandle;
use crate::diagram::FaceKey;
use crate::vector2::Point;
use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

#[derive(Debug)]
pub enum EventKind {
    Site { face: FaceKey, point: Point },
    Circle { point: Point, arc: ArcHandle },
}

/// A pending site or circle event. `valid` starts `true` and is
/// flipped permanently false by [`Event::invalidate`]; invalidating
/// an already-invalid event is a no-op (§5).
#[derive(Debug)]
pub struct Event {
    pub y: f64,
    pub x: f64,
    pub kind: EventKind,
    valid: Cell<bool>,
}

impl Event {
    fn new(y: f64, x: f64, kind: EventKind) -> Rc<Event> {
        Rc::new(Event {
            y,
            x,
            kind,
            valid: Cell::new(true),
        })
    }

    pub fn is_valid(&self) -> bool {
        self.valid.get()
    }

    pub fn invalidate(&self) {
        self.valid.set(false);
    }
}

/// Shared handle to a queued event. Cloning is cheap and shares the
/// same validity flag, so a beachline arc can hold one and invalidate
/// it without the queue's cooperation.
pub type EventHandle = Rc<Event>;

/// Higher priority pops first: greater `y`, then (on a tie) smaller
/// `x`. Site coordinates are always finite (§7), so `partial_cmp`
/// never returns `None` on real input.
fn priority(a: &Event, b: &Event) -> Ordering {
    match a.y.partial_cmp(&b.y) {
        Some(Ordering::Equal) | None => b.x.partial_cmp(&a.x).unwrap_or(Ordering::Equal),
        Some(order) => order,
    }
}

fn parent(index: usize) -> usize {
    (index + 1) / 2 - 1
}

fn left_child(index: usize) -> usize {
    2 * (index + 1) - 1
}

fn right_child(index: usize) -> usize {
    2 * (index + 1)
}

/// The max-priority queue of §4.2. Holds a strong reference to every
/// event it has not yet returned from `pop_top`; arcs hold cloned
/// handles purely to call `invalidate`.
pub struct EventQueue {
    queue: Vec<EventHandle>,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue { queue: Vec::new() }
    }

    pub fn push_site(&mut self, y: f64, x: f64, face: FaceKey, point: Point) -> EventHandle {
        self.push(Event::new(y, x, EventKind::Site { face, point }))
    }

    pub fn push_circle(&mut self, y: f64, x: f64, point: Point, arc: ArcHandle) -> EventHandle {
        self.push(Event::new(y, x, EventKind::Circle { point, arc }))
    }

    fn push(&mut self, event: EventHandle) -> EventHandle {
        let handle = event.clone();
        self.queue.push(event);
        self.sift_up(self.queue.len() - 1);
        handle
    }

    /// Pops the highest-priority event, silently discarding any
    /// invalid circle events found along the way (§4.2, §5).
    pub fn pop_top(&mut self) -> Option<EventHandle> {
        loop {
            let top = self.pop_raw()?;
            if top.is_valid() {
                return Some(top);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn pop_raw(&mut self) -> Option<EventHandle> {
        if self.queue.is_empty() {
            return None;
        }
        let last = self.queue.len() - 1;
        self.queue.swap(0, last);
        let top = self.queue.pop();
        if !self.queue.is_empty() {
            self.sift_down(0);
        }
        top
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 && priority(&self.queue[parent(index)], &self.queue[index]) == Ordering::Less {
            self.queue.swap(index, parent(index));
            index = parent(index);
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let mut largest = index;
            let left = left_child(index);
            let right = right_child(index);
            if left < self.queue.len()
                && priority(&self.queue[largest], &self.queue[left]) == Ordering::Less
            {
                largest = left;
            }
            if right < self.queue.len()
                && priority(&self.queue[largest], &self.queue[right]) == Ordering::Less
            {
                largest = right;
            }
            if largest == index {
                break;
            }
            self.queue.swap(index, largest);
            index = largest;
        }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn dummy_face() -> FaceKey {
        let mut faces: SlotMap<FaceKey, ()> = SlotMap::with_key();
        faces.insert(())
    }

    fn dummy_arc() -> ArcHandle {
        let mut arena: generational_arena::Arena<()> = generational_arena::Arena::new();
        arena.insert(())
    }

    #[test]
    fn pops_in_y_descending_order() {
        let mut queue = EventQueue::new();
        let face = dummy_face();
        queue.push_site(1.0, 0.0, face, Point::new(0.0, 1.0));
        queue.push_site(3.0, 0.0, face, Point::new(0.0, 3.0));
        queue.push_site(2.0, 0.0, face, Point::new(0.0, 2.0));

        assert_eq!(queue.pop_top().unwrap().y, 3.0);
        assert_eq!(queue.pop_top().unwrap().y, 2.0);
        assert_eq!(queue.pop_top().unwrap().y, 1.0);
        assert!(queue.pop_top().is_none());
    }

    #[test]
    fn ties_broken_by_x_ascending() {
        let mut queue = EventQueue::new();
        let face = dummy_face();
        queue.push_site(5.0, 2.0, face, Point::new(2.0, 5.0));
        queue.push_site(5.0, 0.0, face, Point::new(0.0, 5.0));
        queue.push_site(5.0, 1.0, face, Point::new(1.0, 5.0));

        assert_eq!(queue.pop_top().unwrap().x, 0.0);
        assert_eq!(queue.pop_top().unwrap().x, 1.0);
        assert_eq!(queue.pop_top().unwrap().x, 2.0);
    }

    #[test]
    fn invalidated_circle_events_are_skipped_on_pop() {
        let mut queue = EventQueue::new();
        let arc = dummy_arc();
        let stale = queue.push_circle(4.0, 0.0, Point::new(0.0, 4.0), arc);
        queue.push_circle(2.0, 0.0, Point::new(0.0, 2.0), arc);
        stale.invalidate();

        let popped = queue.pop_top().unwrap();
        assert_eq!(popped.y, 2.0);
        assert!(queue.pop_top().is_none());
    }

    #[test]
    fn invalidating_twice_is_a_no_op() {
        let mut queue = EventQueue::new();
        let arc = dummy_arc();
        let handle = queue.push_circle(1.0, 0.0, Point::new(0.0, 1.0), arc);
        handle.invalidate();
        handle.invalidate();
        assert!(!handle.is_valid());
        assert!(queue.pop_top().is_none());
    }
}
