#![warn(clippy::all)]
#![forbid(unsafe_code)]
//!# Docs
//!
//! A rust implementation of
//! [fortune's algorithm](https://en.wikipedia.org/wiki/Fortune%27s_algorithm) to generate a
//! bounded [voronoi diagram](https://en.wikipedia.org/wiki/Voronoi_diagram) of the plane.
//!
//!## Implementation Details
//! The implementation is entirely in safe rust code.
//!
//! The input is an arbitrary slice of `(f64, f64)` sites; the result is clipped to a
//! bounding rectangle computed from the input's extent plus a configurable margin. The
//! diagram is returned as a flat, serialization-friendly set of vertices and edges rather
//! than the internal [Doubly Connected Edge List](https://en.wikipedia.org/wiki/Doubly_connected_edge_list)
//! the sweep builds it with.
//!
//!## Example Usage
//!
//! ```rust
//! use planar_voronoi::{compute, Options};
//!
//! let sites = vec![(0.0, 0.0), (10.0, 0.0), (5.0, 8.66)];
//! let diagram = compute(&sites, &Options::default()).unwrap();
//! assert_eq!(diagram.edges.len(), 3);
//! ```

mod beachline;
mod boundingbox;
mod diagram;
pub mod error;
mod event;
mod largest_empty_circle;
pub mod vector2;
mod voronoi_builder;

use diagram::{Dcel, FaceKey, VertexKey};
use std::collections::HashMap;
use vector2::Point;

pub use error::VoronoiError;
pub use largest_empty_circle::EmptyCircle;

/// Configuration accepted by [`compute`]; every field defaults to the
/// value named in the external-interfaces contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Extra margin added on every side of the sites' extent when
    /// building the clipping rectangle, as a fraction of the larger
    /// span. Default `0.2`.
    pub bounding_margin_ratio: f64,
    /// Whether to additionally compute the largest empty circle(s)
    /// among the diagram's vertices (§4.6). Off by default since it
    /// is an O(V * n) pass over every vertex and every site.
    pub compute_largest_empty_circles: bool,
    /// The numerical tolerance used throughout the sweep for
    /// near-degenerate comparisons. Default `1e-10`, matching
    /// [`vector2::EPSILON`].
    pub epsilon: f64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            bounding_margin_ratio: 0.2,
            compute_largest_empty_circles: false,
            epsilon: vector2::EPSILON,
        }
    }
}

/// One finished edge of the diagram: the perpendicular bisector
/// between `left_site_index` and `right_site_index`, clipped to the
/// bounding box, named by its endpoint indices into
/// [`Diagram::vertices`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
    pub left_site_index: usize,
    pub right_site_index: usize,
}

/// The result of [`compute`] (§6): a flat, index-based view of the
/// clipped planar subdivision, independent of the internal DCEL it
/// was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    /// The deduplicated input sites, in first-occurrence order.
    pub sites: Vec<(f64, f64)>,
    pub vertices: Vec<(f64, f64)>,
    pub edges: Vec<Edge>,
    /// `(x_min, y_min, x_max, y_max)`.
    pub bounding_box: (f64, f64, f64, f64),
    /// Populated only when [`Options::compute_largest_empty_circles`]
    /// was set; empty otherwise.
    pub largest_empty_circles: Vec<EmptyCircle>,
}

/// Computes the bounded planar Voronoi diagram of `sites` (§1, §6).
///
/// Sites are deduplicated (exact equality) before processing; two
/// calls with the same multiset of sites up to duplication and input
/// order produce the same [`Diagram`]. Colinear or coincident inputs
/// are not an error: they produce a diagram with zero vertices and
/// parallel edges (§7).
///
/// # Errors
/// Returns [`VoronoiError::EmptyInput`] if `sites` is empty, or
/// [`VoronoiError::NonFiniteCoordinate`] if any coordinate is NaN or
/// infinite.
pub fn compute(sites: &[(f64, f64)], options: &Options) -> Result<Diagram, VoronoiError> {
    if sites.is_empty() {
        return Err(VoronoiError::EmptyInput);
    }
    for (index, &(x, y)) in sites.iter().enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(VoronoiError::NonFiniteCoordinate { index, x, y });
        }
    }

    let mut deduped: Vec<(f64, f64)> = Vec::with_capacity(sites.len());
    for &site in sites {
        if !deduped.contains(&site) {
            deduped.push(site);
        }
    }

    let points: Vec<Point> = deduped.iter().map(|&(x, y)| Point::new(x, y)).collect();
    let (dcel, bbox, faces) =
        voronoi_builder::build(&points, options.bounding_margin_ratio, options.epsilon);

    let largest_empty_circles = if options.compute_largest_empty_circles {
        largest_empty_circle::compute(&dcel, &points, options.epsilon)
    } else {
        Vec::new()
    };

    let face_to_index: HashMap<FaceKey, usize> =
        faces.iter().enumerate().map(|(index, &face)| (face, index)).collect();

    let vertex_keys: Vec<VertexKey> = dcel.get_vertices().map(|(key, _)| key).collect();
    let vertex_to_index: HashMap<VertexKey, usize> =
        vertex_keys.iter().enumerate().map(|(index, &key)| (key, index)).collect();
    let vertices = vertex_keys
        .iter()
        .map(|&key| {
            let p = dcel.get_vertex_point(key);
            (p.x, p.y)
        })
        .collect();

    let edges = dcel
        .edge_pairs()
        .iter()
        .map(|&(he, _twin)| {
            let origin = dcel
                .get_half_edge_origin(he)
                .expect("finalize_open_edges leaves no half-edge without an origin");
            let destination = dcel
                .get_half_edge_destination(he)
                .expect("finalize_open_edges leaves no half-edge without a destination");
            let (left_site, right_site) = dcel.get_half_edge_sites(he);
            Edge {
                start: vertex_to_index[&origin],
                end: vertex_to_index[&destination],
                left_site_index: face_to_index[&left_site],
                right_site_index: face_to_index[&right_site],
            }
        })
        .collect();

    Ok(Diagram {
        sites: deduped,
        vertices,
        edges,
        bounding_box: {
            let top_left = bbox.get_top_left();
            let bottom_right = bbox.get_bottom_right();
            (top_left.x, top_left.y, bottom_right.x, bottom_right.y)
        },
        largest_empty_circles,
    })
}
