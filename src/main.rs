use clap::{Parser, Subcommand};
use clustercut::utils::{logger, report};
use clustercut::{io, ClusterConfig, Geometry, GeometrySettings, Sphere, Structure};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "clustercut")]
#[command(about = "Cut finite atomic clusters out of periodic crystals")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cut the spheres of a JSON job file and write them as XYZ.
    Cut {
        /// Path to the cluster configuration file.
        config: PathBuf,

        /// Output XYZ file.
        #[arg(short, long, default_value = "cluster.xyz")]
        output: PathBuf,
    },
    /// Turn a POSCAR into a cluster configuration file.
    Convert {
        /// POSCAR or CONTCAR to read.
        poscar: PathBuf,

        /// Output JSON file.
        #[arg(short, long, default_value = "cluster.json")]
        output: PathBuf,

        /// Radius of the sphere centred at the origin (Angstrom).
        #[arg(short, long, default_value = "10.0")]
        radius: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = logger::init(logger::level_from_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Cut { config, output } => run_cut(&config, &output),
        Commands::Convert {
            poscar,
            output,
            radius,
        } => run_convert(&poscar, &output, radius),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cut(config_path: &Path, output: &Path) -> clustercut::Result<()> {
    let cfg = ClusterConfig::load(config_path)?;
    let geometry = Geometry::from_settings(&cfg.geometry)?.with_limits(cfg.limits());
    log::info!("\n{}", report::geometry_summary(&geometry));

    if cfg.spheres.is_empty() {
        log::warn!("No spheres defined in {:?}, writing an empty cluster", config_path);
    }

    let mut cluster = Structure {
        lattice: geometry.lattice().rows(),
        atoms: Vec::new(),
        title: format!("cut from {}", config_path.display()),
    };
    for (i, sphere) in cfg.spheres.iter().enumerate() {
        let part = geometry.cut(sphere)?;
        log::info!("Sphere {}: {} atoms", i + 1, part.atoms.len());
        cluster.atoms.extend(part.atoms);
    }

    let out = output.to_string_lossy();
    io::save_structure(&out, &cluster)?;
    println!("{}", report::cluster_summary(&cluster, &out));
    Ok(())
}

fn run_convert(poscar: &Path, output: &Path, radius: f64) -> clustercut::Result<()> {
    let structure = io::load_structure(&poscar.to_string_lossy())?;
    log::info!(
        "Read {} atoms ({}) from {:?}",
        structure.atoms.len(),
        structure.formula(),
        poscar
    );

    let geometry = GeometrySettings::from_structure(&structure)?;
    // Reject unusable cells before writing anything
    Geometry::from_settings(&geometry)?;

    let cfg = ClusterConfig {
        geometry,
        spheres: vec![Sphere::new([0.0; 3], radius)?],
        max_candidates: clustercut::EnumerationLimits::default().max_candidates,
    };
    cfg.save(output)
}
