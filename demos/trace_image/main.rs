//! Traces a small ASCII bitmap and runs every post-processing step on the
//! outlines it finds.
//!
//! Usage:
//! ```text
//! cargo run --example trace_image            # soft (anti-aliased) tracing
//! cargo run --example trace_image -- hard    # pixel staircase
//! RUST_LOG=autogeom=debug cargo run --example trace_image
//! ```

use autogeom::{
    convex_decomposition, convex_hull, simplify_curves, simplify_vertices, AutogeomError,
    BoundingBox, MarchMode, MarchParams, MarchSquares, Point2, PolylineSet,
};

/// Top row first; `#` is filled.
const IMAGE: [&str; 12] = [
    "............",
    ".##......##.",
    ".##......##.",
    ".##..##..##.",
    ".##..##..##.",
    ".##########.",
    ".##########.",
    "............",
    "....####....",
    "...######...",
    "....####....",
    "............",
];

struct Bitmap<'a> {
    rows: &'a [&'a str],
}

impl Bitmap<'_> {
    fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    /// Value of the pixel nearest to `p`, with `y` pointing up.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample(&self, p: Point2) -> f64 {
        let col = p.x.round() as usize;
        let row = self.height() - 1 - p.y.round() as usize;
        match self.rows[row].as_bytes().get(col) {
            Some(b'#') => 1.0,
            _ => 0.0,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn main() -> Result<(), AutogeomError> {
    // Default: WARN for everything, INFO for autogeom.
    // Override with RUST_LOG env var (e.g. RUST_LOG=autogeom=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("autogeom=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mode = match std::env::args().nth(1).as_deref() {
        Some("hard") => MarchMode::Hard,
        _ => MarchMode::Soft,
    };

    let bitmap = Bitmap { rows: &IMAGE };
    let bb = BoundingBox::new(
        0.0,
        0.0,
        (bitmap.width() - 1) as f64,
        (bitmap.height() - 1) as f64,
    )?;
    let params = MarchParams {
        x_samples: bitmap.width(),
        y_samples: bitmap.height(),
        threshold: 0.5,
        mode,
    };

    let mut set = PolylineSet::new();
    let segments = MarchSquares::new(bb, params)
        .execute(|p| bitmap.sample(p), |v0, v1| set.collect_segment(v0, v1))?;
    println!("{mode:?} trace: {segments} segments, {} polylines", set.len());

    for (i, line) in set.iter().enumerate() {
        println!(
            "\npolyline {i}: {} points, closed = {}, area = {:.2}",
            line.len(),
            line.is_closed(),
            line.signed_area()
        );

        let curves = simplify_curves(line.points(), 0.25)?;
        let vertices = simplify_vertices(line.points(), 0.1)?;
        println!("  simplify_curves(0.25):   {} points", curves.len());
        println!("  simplify_vertices(0.1):  {} points", vertices.len());

        match convex_hull(line.points(), 0.0) {
            Ok(hull) => println!("  convex hull: {}", format_points(&hull)),
            Err(err) => println!("  convex hull: {err}"),
        }

        if line.is_closed() {
            match convex_decomposition(&curves, 0.1) {
                Ok(pieces) => {
                    println!("  convex decomposition: {} pieces", pieces.len());
                    for piece in &pieces {
                        println!("    {}", format_points(piece));
                    }
                }
                Err(err) => println!("  convex decomposition: {err}"),
            }
        }
    }

    Ok(())
}

fn format_points(points: &[Point2]) -> String {
    points
        .iter()
        .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
