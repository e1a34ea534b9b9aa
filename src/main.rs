use planar_voronoi::{compute, Options};

fn main() {
    env_logger::init();

    let sites = vec![(0.7, 0.5), (0.2, 0.2), (0.4, 0.3), (0.8, 0.9)];

    let options = Options {
        compute_largest_empty_circles: true,
        ..Options::default()
    };

    match compute(&sites, &options) {
        Ok(diagram) => {
            println!(
                "{} sites -> {} vertices, {} edges",
                diagram.sites.len(),
                diagram.vertices.len(),
                diagram.edges.len()
            );
            for circle in &diagram.largest_empty_circles {
                println!(
                    "largest empty circle: center=({:.4}, {:.4}) radius={:.4}",
                    circle.center.x, circle.center.y, circle.radius
                );
            }
        }
        Err(err) => eprintln!("failed to compute diagram: {}", err),
    }
}
