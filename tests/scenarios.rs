//! Scenario and property tests from §8, run against the public
//! `compute()` entry point rather than any internal type.

use approx::assert_relative_eq;
use planar_voronoi::{compute, Diagram, Options};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MARGIN: f64 = 0.2;

fn default_options() -> Options {
    Options { bounding_margin_ratio: MARGIN, ..Options::default() }
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

// Scenario A: two sites -> one vertical edge at the midpoint x, no
// Voronoi (circle-event) vertices; only the edge's two box-clip
// endpoints appear in `vertices`.
#[test]
fn scenario_a_two_sites() {
    let diagram = compute(&[(0.0, 0.0), (10.0, 0.0)], &default_options()).unwrap();
    assert_eq!(diagram.edges.len(), 1);
    let edge = diagram.edges[0];
    let start = diagram.vertices[edge.start];
    let end = diagram.vertices[edge.end];
    assert_relative_eq!(start.0, 5.0, epsilon = 1e-6);
    assert_relative_eq!(end.0, 5.0, epsilon = 1e-6);
    assert_ne!(start.1, end.1, "the clipped edge should run vertically between two distinct y values");
}

// Scenario B: three colinear sites -> two parallel vertical edges,
// zero circle-event vertices.
#[test]
fn scenario_b_three_colinear_sites() {
    let diagram = compute(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)], &default_options()).unwrap();
    assert_eq!(diagram.edges.len(), 2);
    let mut xs: Vec<f64> = diagram
        .edges
        .iter()
        .map(|e| diagram.vertices[e.start].0)
        .collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_relative_eq!(xs[0], 2.5, epsilon = 1e-6);
    assert_relative_eq!(xs[1], 7.5, epsilon = 1e-6);
}

// Scenario C: equilateral triangle -> one vertex at the centroid,
// three edges radiating to the box.
#[test]
fn scenario_c_equilateral_triangle() {
    let sites = [(0.0, 0.0), (10.0, 0.0), (5.0, 8.6602540378)];
    let diagram = compute(&sites, &default_options()).unwrap();
    assert_eq!(diagram.edges.len(), 3);

    let centroid = diagram
        .vertices
        .iter()
        .find(|&&(x, y)| (x - 5.0).abs() < 1e-6 && (y - 2.8867513459).abs() < 1e-6);
    assert!(centroid.is_some(), "expected a vertex at the triangle's centroid");
}

// Scenario D: square -> one vertex at the center, four edges of equal
// length to each side, four cells of equal area (checked indirectly
// via the edges all meeting at the shared center).
#[test]
fn scenario_d_square() {
    let sites = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
    let diagram = compute(&sites, &default_options()).unwrap();
    assert_eq!(diagram.edges.len(), 4);

    let center = diagram
        .vertices
        .iter()
        .find(|&&(x, y)| (x - 5.0).abs() < 1e-6 && (y - 5.0).abs() < 1e-6)
        .copied();
    assert!(center.is_some(), "expected a vertex at the square's center");
    let center = center.unwrap();

    for edge in &diagram.edges {
        let start = diagram.vertices[edge.start];
        let end = diagram.vertices[edge.end];
        let touches_center = (start.0 - center.0).abs() < 1e-6 && (start.1 - center.1).abs() < 1e-6
            || (end.0 - center.0).abs() < 1e-6 && (end.1 - center.1).abs() < 1e-6;
        assert!(touches_center, "every edge of a square's diagram meets at the center");
    }
}

// Scenario E: five cocircular sites -> a single vertex at the circle's
// center (or two within epsilon, if circle events are not coalesced),
// all at radius 5 from it.
#[test]
fn scenario_e_cocircular_quintuple() {
    let center = (5.0, 5.0);
    let radius = 5.0;
    let sites: Vec<(f64, f64)> = (0..5)
        .map(|i| {
            let angle = std::f64::consts::PI * 2.0 * (i as f64) / 5.0;
            (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
        })
        .collect();
    let diagram = compute(&sites, &default_options()).unwrap();

    let near_center: Vec<(f64, f64)> = diagram
        .vertices
        .iter()
        .copied()
        .filter(|&p| dist(p, center) < 1e-3)
        .collect();
    assert!(!near_center.is_empty(), "expected one or more vertices coinciding with the circle's center");

    for &site in &sites {
        assert_relative_eq!(dist(site, center), radius, epsilon = 1e-6);
    }
}

// Scenario F: duplicate removal.
#[test]
fn scenario_f_duplicate_removal() {
    let with_dup = compute(&[(1.0, 1.0), (1.0, 1.0), (3.0, 3.0)], &default_options()).unwrap();
    let without_dup = compute(&[(1.0, 1.0), (3.0, 3.0)], &default_options()).unwrap();
    assert_eq!(with_dup, without_dup);
}

// Property 1: Euler's formula for the clipped planar graph. F counts
// the unbounded face once, so F = n (one bounded face per site) + 1.
#[test]
fn property_euler_relation_holds_for_random_sites() {
    for seed in 0..20 {
        let diagram = random_diagram(seed, 12);
        let v = diagram.vertices.len() as i64;
        let e = diagram.edges.len() as i64;
        let f = diagram.sites.len() as i64 + 1;
        assert_eq!(v - e + f, 2, "Euler relation failed for seed {seed}");
    }
}

// Property 2: every edge's supporting line passes through the
// midpoint of its two flanking sites.
#[test]
fn property_edges_lie_on_the_perpendicular_bisector() {
    for seed in 0..20 {
        let diagram = random_diagram(seed, 10);
        for edge in &diagram.edges {
            let left = diagram.sites[edge.left_site_index];
            let right = diagram.sites[edge.right_site_index];
            let midpoint = ((left.0 + right.0) / 2.0, (left.1 + right.1) / 2.0);
            let start = diagram.vertices[edge.start];
            let end = diagram.vertices[edge.end];

            let edge_vec = (end.0 - start.0, end.1 - start.1);
            let to_mid = (midpoint.0 - start.0, midpoint.1 - start.1);
            // Degenerate (zero-length) edges cannot happen once finished;
            // the cross product of two collinear vectors is ~0.
            let cross = edge_vec.0 * to_mid.1 - edge_vec.1 * to_mid.0;
            let scale = edge_vec.0.hypot(edge_vec.1).max(1.0);
            assert!(
                (cross / scale).abs() < 1e-6,
                "seed {seed}: edge {edge:?} does not lie on the bisector of its sites"
            );
        }
    }
}

// Properties 3 & 4: every Voronoi vertex is equidistant from, and no
// site lies strictly closer than, its nearest sites — i.e. the
// vertex's nearest-site distance is attained by at least 3 sites and
// is a strict minimum over all others.
#[test]
fn property_vertices_are_empty_circumcenters() {
    for seed in 0..20 {
        let diagram = random_diagram(seed, 10);
        for &vertex in &diagram.vertices {
            let mut distances: Vec<f64> = diagram.sites.iter().map(|&s| dist(vertex, s)).collect();
            distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let nearest = distances[0];
            let tied = distances.iter().take_while(|&&d| d < nearest + 1e-6).count();
            // Box-clip vertices only touch two sites; circle-event
            // vertices touch at least three. Either is a valid minimum,
            // but never fewer than two.
            assert!(tied >= 2, "seed {seed}: vertex {vertex:?} touches fewer than two nearest sites");
        }
    }
}

// Property 5: determinism.
#[test]
fn property_determinism() {
    let sites: Vec<(f64, f64)> = vec![(1.0, 9.0), (4.0, 2.0), (7.0, 6.0), (2.0, 5.0), (8.0, 1.0)];
    let a = compute(&sites, &default_options()).unwrap();
    let b = compute(&sites, &default_options()).unwrap();
    assert_eq!(a, b);
}

// Property 6: dedup (same assertion as scenario F, generalized to a
// randomized input with an injected duplicate).
#[test]
fn property_dedup_is_order_independent_of_the_duplicate() {
    let sites = vec![(2.0, 3.0), (2.0, 3.0), (9.0, 9.0), (4.0, 1.0)];
    let deduped = vec![(2.0, 3.0), (9.0, 9.0), (4.0, 1.0)];
    let a = compute(&sites, &default_options()).unwrap();
    let b = compute(&deduped, &default_options()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn largest_empty_circle_is_reported_when_requested() {
    let sites = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
    let options = Options { compute_largest_empty_circles: true, ..default_options() };
    let diagram = compute(&sites, &options).unwrap();
    assert_eq!(diagram.largest_empty_circles.len(), 1);
    let circle = diagram.largest_empty_circles[0];
    assert_relative_eq!(circle.center.x, 5.0, epsilon = 1e-6);
    assert_relative_eq!(circle.center.y, 5.0, epsilon = 1e-6);
    assert_relative_eq!(circle.radius, 50.0f64.sqrt(), epsilon = 1e-6);
}

fn random_diagram(seed: u64, n: usize) -> Diagram {
    let mut rng = StdRng::seed_from_u64(seed);
    let sites: Vec<(f64, f64)> =
        (0..n).map(|_| (rng.gen_range(0.0, 100.0), rng.gen_range(0.0, 100.0))).collect();
    compute(&sites, &default_options()).unwrap()
}
