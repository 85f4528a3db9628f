//! dataset-cli - inspect dataset directories, meshes, edge maps and manifests.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dataset_io::prelude::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_DATE: &str = env!("DATASET_IO_BUILD_DATE");

/// Global options parsed ahead of the command.
struct Options {
    level: &'static str,
    color: Option<ColorMode>,
    config: Option<PathBuf>,
    timing: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse global flags
    let mut opts = Options { level: "info", color: None, config: None, timing: false };
    let mut filtered_args: Vec<&str> = Vec::new();
    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => opts.level = "debug",
            "-vv" | "--trace" => opts.level = "trace",
            "-q" | "--quiet" => opts.level = "error",
            "--no-color" => opts.color = Some(ColorMode::Never),
            "--color" => opts.color = Some(ColorMode::Always),
            "--time" => opts.timing = true,
            "--config" => match iter.next() {
                Some(path) => opts.config = Some(PathBuf::from(path)),
                None => {
                    eprintln!("Error: --config needs a file argument");
                    std::process::exit(1);
                }
            },
            _ => filtered_args.push(arg),
        }
    }

    init_tracing(opts.level);

    let config = match &opts.config {
        Some(path) => IngestConfig::load(path),
        None => IngestConfig::load_default(),
    };
    let mut config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(color) = opts.color {
        config.color = color;
    }
    let palette = config.palette();

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let mut timer = Timer::new("dataset-cli");
    let command = filtered_args[0];
    let rest = &filtered_args[1..];
    timer.tic(command);

    let result = match command {
        "glob" | "g" => cmd_glob(rest),
        "mesh" | "m" => cmd_mesh(rest),
        "edgemap" | "e" => cmd_edgemap(rest),
        "catalog" | "c" => cmd_catalog(rest, &config),
        "merge" => cmd_merge(rest),
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("dataset-cli {} ({})", VERSION, BUILD_DATE);
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    timer.toc(command);

    if let Err(e) = result {
        eprintln!("{}", palette.paint(palette.red, format!("Error: {:#}", e)));
        std::process::exit(1);
    }
    if opts.timing {
        eprint!("{}", timer.report(&palette));
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_help() {
    println!("dataset-cli - dataset ingestion toolkit");
    println!();
    println!("USAGE:");
    println!("    dataset-cli [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    g, glob    <dir> <ext> [prefix]   List matching files in key order");
    println!("    m, mesh    <file.obj|file.ply>    Load a mesh and print its size and bounds");
    println!("    e, edgemap <file>                 Decode an edge map and print statistics");
    println!("    c, catalog <root> <manifest.json> [--paths]");
    println!("                                      List catalog entries (or their mesh paths)");
    println!("       merge   <doc.json>...          Merge documents left to right and print");
    println!("    h, help                           Show this help");
    println!("       version                        Show version and build date");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose     Debug output");
    println!("    -vv, --trace      Trace output (very verbose)");
    println!("    -q, --quiet       Errors only");
    println!("    --color           Force colored output");
    println!("    --no-color        Disable colored output");
    println!("    --time            Print command timing");
    println!("    --config <file>   Settings file (default: <config dir>/dataset-io/config.json)");
    println!();
    println!("RUST_LOG overrides the verbosity flags.");
}

fn usage(text: &str) -> anyhow::Error {
    anyhow::anyhow!("missing arguments\nUsage: dataset-cli {}", text)
}

fn cmd_glob(args: &[&str]) -> Result<()> {
    let (dir, ext) = match args {
        [dir, ext, ..] => (*dir, *ext),
        _ => return Err(usage("glob <dir> <ext> [prefix]")),
    };
    let prefix = args.get(2).copied();
    info!("Scanning {}", dir);

    let result = scan(dir, ext, prefix).with_context(|| format!("cannot scan {}", dir))?;
    debug!("{} entries, {:?} order", result.entries.len(), result.order);
    for entry in &result.entries {
        println!("{}", entry.path.display());
    }
    Ok(())
}

fn cmd_mesh(args: &[&str]) -> Result<()> {
    let Some(&path) = args.first() else {
        return Err(usage("mesh <file.obj|file.ply>"));
    };
    info!("Loading mesh: {}", path);

    let start = Instant::now();
    let mesh = load_mesh(path)?;
    debug!("decoded in {:.2?}", start.elapsed());

    println!("Mesh: {}", path);
    println!("  Vertices: {}", mesh.num_vertices());
    println!("  Faces:    {}", mesh.num_faces());
    if let Some((lo, hi)) = mesh.bounds() {
        println!("  Bounds:   [{:.4}, {:.4}, {:.4}] - [{:.4}, {:.4}, {:.4}]", lo.x, lo.y, lo.z, hi.x, hi.y, hi.z);
    }
    Ok(())
}

fn cmd_edgemap(args: &[&str]) -> Result<()> {
    let Some(&path) = args.first() else {
        return Err(usage("edgemap <file>"));
    };
    info!("Decoding edge map: {}", path);

    let raster = decode_edge_map(path)?;
    let total = raster.rows() * raster.cols();
    let edges = raster.count_nonzero();
    println!("Edge map: {}", path);
    println!("  Size:  {}x{}", raster.rows(), raster.cols());
    println!("  Edges: {} / {} pixels", edges, total);
    if total > 0 {
        let mean = raster.as_bytes().iter().map(|&p| p as f64).sum::<f64>() / total as f64;
        println!("  Mean:  {:.2}", mean);
    }
    Ok(())
}

fn cmd_catalog(args: &[&str], config: &IngestConfig) -> Result<()> {
    let (root, manifest) = match args {
        [root, manifest, ..] => (*root, *manifest),
        _ => return Err(usage("catalog <root> <manifest.json> [--paths]")),
    };
    let show_paths = args.iter().skip(2).any(|&a| a == "--paths" || a == "-p");
    let catalog = resolve_catalog(root, manifest, config.manifest_check)?;
    info!("{} entries in {}", catalog.len(), manifest);
    if show_paths {
        for path in catalog.paths(root, &config.mesh_extension) {
            println!("{}", path.display());
        }
    } else {
        for entry in catalog.iter() {
            println!("{}", entry);
        }
    }
    Ok(())
}

fn cmd_merge(args: &[&str]) -> Result<()> {
    if args.is_empty() {
        bail!("missing arguments\nUsage: dataset-cli merge <doc.json>...");
    }
    debug!("merging {} documents", args.len());
    let out = load_layered(args.iter())?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
