//! symsubdiv CLI - inspect Catmull-Clark subdivision of built-in shapes.
//!
//! Usage: symsubdiv <COMMAND> [OPTIONS]
//!
//! Run `symsubdiv --help` for available commands. Set `RUST_LOG=debug` to
//! see per-level details from the library.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};

use symsubdiv::algo::subdivide::{
    BoundaryMode, MapBorderMode, SubdivideOptions, SubdivisionMesh, Topology,
};
use symsubdiv::algo::Progress;
use symsubdiv::mesh::{shapes, SubdividedPointArray, SymbolicPolygonMesh};

#[derive(Parser)]
#[command(name = "symsubdiv")]
#[command(author, version, about = "Symbolic Catmull-Clark subdivision CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a built-in shape
    Info {
        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Subdivide a built-in shape and report every level
    Subdivide {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Number of subdivision levels, at most 8
        #[arg(short, long, default_value = "1")]
        levels: usize,

        /// Boundary handling for point positions
        #[arg(short, long, value_enum, default_value = "crease-edges")]
        boundary_mode: BoundaryArg,

        /// Border handling for texture coordinates
        #[arg(short, long, value_enum, default_value = "not-smooth")]
        map_border_mode: MapBorderArg,

        /// Print the fan-triangulated size of the finest level
        #[arg(long)]
        triangles: bool,
    },
}

#[derive(Args)]
struct ShapeArgs {
    /// Shape to build
    #[arg(short, long, value_enum, default_value = "cube")]
    shape: Shape,

    /// Corner count for polygons, grid resolution for planes
    #[arg(short = 'n', long, default_value = "4")]
    segments: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// Unit quad
    Quad,
    /// Regular polygon with `segments` corners
    Polygon,
    /// `segments` x `segments` grid of quads
    Plane,
    /// Closed unit cube
    Cube,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum BoundaryArg {
    /// Crease boundary edges, let corners slide
    CreaseEdges,
    /// Crease boundary edges and pin corners
    CreaseAll,
}

impl From<BoundaryArg> for BoundaryMode {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::CreaseEdges => BoundaryMode::CreaseEdges,
            BoundaryArg::CreaseAll => BoundaryMode::CreaseAll,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MapBorderArg {
    /// Copy border texture coordinates
    NotSmooth,
    /// Smooth border texture coordinates except at corners
    SmoothInternal,
    /// Smooth all border texture coordinates
    SmoothAll,
}

impl From<MapBorderArg> for MapBorderMode {
    fn from(arg: MapBorderArg) -> Self {
        match arg {
            MapBorderArg::NotSmooth => MapBorderMode::NotSmooth,
            MapBorderArg::SmoothInternal => MapBorderMode::SmoothInternal,
            MapBorderArg::SmoothAll => MapBorderMode::SmoothAll,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { shape } => {
            cmd_info(&shape)?;
        }

        Commands::Subdivide {
            shape,
            levels,
            boundary_mode,
            map_border_mode,
            triangles,
        } => {
            let options = SubdivideOptions::new(levels)
                .with_boundary_mode(boundary_mode.into())
                .with_map_border_mode(map_border_mode.into());
            cmd_subdivide(&shape, &options, triangles)?;
        }
    }

    Ok(())
}

fn build_shape(args: &ShapeArgs) -> symsubdiv::error::Result<SymbolicPolygonMesh> {
    log::info!("Building {} shape", shape_name(args.shape));
    match args.shape {
        Shape::Quad => Ok(shapes::quad()),
        Shape::Polygon => shapes::polygon(args.segments),
        Shape::Plane => shapes::plane(args.segments, args.segments),
        Shape::Cube => Ok(shapes::cube()),
    }
}

fn shape_name(shape: Shape) -> &'static str {
    match shape {
        Shape::Quad => "quad",
        Shape::Polygon => "polygon",
        Shape::Plane => "plane",
        Shape::Cube => "cube",
    }
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            (current * 100) / total
        };

        // Levels are reported in order, so a lower value is a stale update
        if max_percent.fetch_max(percent, Ordering::Relaxed) > percent {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        eprint!(
            "\r[{}{}] {:3}% {}",
            "=".repeat(filled),
            " ".repeat(bar_width - filled),
            percent,
            message
        );
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn print_stats(label: &str, mesh: &SymbolicPolygonMesh) {
    println!(
        "{}: {} points, {} faces, {} texture coordinates",
        label,
        mesh.num_points(),
        mesh.num_faces(),
        mesh.num_tex_coords()
    );
    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "  Bounding box: ({:.4}, {:.4}, {:.4}) to ({:.4}, {:.4}, {:.4})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }
}

fn cmd_info(args: &ShapeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = build_shape(args)?;
    print_stats("Shape", &mesh);

    let mut scratch = SubdividedPointArray::new(mesh.num_points(), 0);
    let topology = Topology::collect(&mesh, &mut scratch)?;

    let boundary_edges = topology.edges().iter().filter(|e| e.is_boundary()).count();
    println!("Edges: {} ({} on the boundary)", topology.num_edges(), boundary_edges);

    let max_arity = topology.faces().iter().map(|f| f.arity()).max().unwrap_or(0);
    if max_arity == 4 && topology.faces().iter().all(|f| f.arity() == 4) {
        println!("Mesh type: Quad mesh");
    } else {
        println!("Mesh type: Polygon mesh (max arity {})", max_arity);
    }

    let boundary_points = topology.points().iter().filter(|p| p.is_boundary()).count();
    if boundary_points == 0 {
        println!("Topology: Closed (no boundary)");
    } else {
        let corners = topology
            .points()
            .iter()
            .filter(|p| p.is_boundary() && !p.has_internal_edge())
            .count();
        println!(
            "Topology: Open ({} boundary points, {} corners)",
            boundary_points, corners
        );
    }

    Ok(())
}

fn cmd_subdivide(
    args: &ShapeArgs,
    options: &SubdivideOptions,
    triangles: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = build_shape(args)?;
    print_stats("Level 0", &mesh);

    let progress = create_progress();
    let start = Instant::now();
    let subdivided = SubdivisionMesh::with_progress(mesh, options, &progress)?;
    let elapsed = start.elapsed();

    for k in 1..=subdivided.subdivision_level() {
        if let Some(level) = subdivided.level(k) {
            print_stats(&format!("Level {}", k), level);
        }
    }
    println!("Subdivided in {:.2?}", elapsed);

    if triangles {
        let tris = subdivided.to_triangle_mesh();
        println!("Triangulated: {} triangles", tris.num_triangles());
    }

    Ok(())
}
