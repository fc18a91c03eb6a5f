use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use culture_distance::{validate_participants, DistanceMatrix, Framework, Participant};
use culture_grouping::{GroupSize, Partitioner, SearchConfig};
use report::Response;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

mod report;
mod roster;

#[derive(Parser)]
#[command(name = "culture-groups")]
#[command(about = "Partition participants into culturally diverse groups", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a roster into culturally diverse groups
    Partition(PartitionArgs),

    /// Print pairwise cultural distances for a roster
    Matrix(RosterArgs),

    /// Check that every participant can be compared under a framework
    Validate(RosterArgs),
}

impl Commands {
    const fn json(&self) -> bool {
        match self {
            Self::Partition(args) => args.input.json,
            Self::Matrix(args) | Self::Validate(args) => args.json,
        }
    }
}

#[derive(Args)]
struct RosterArgs {
    /// Roster JSON: a list of {"id", "country"} or {"id", "profile"} entries
    #[arg(long)]
    roster: PathBuf,

    /// Catalog JSON mapping country names to profiles
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Framework: lewis|hall|hofstede|combined
    #[arg(long)]
    framework: Framework,

    /// Output JSON (implies --quiet)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PartitionArgs {
    #[command(flatten)]
    input: RosterArgs,

    /// Group size: 3|4|flexible
    #[arg(long)]
    size: GroupSize,

    /// Seed for the reproducible genetic search (omit for greedy construction)
    #[arg(long)]
    seed: Option<String>,

    /// TOML file with search settings; missing keys keep defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = cli.command.json();
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let result = match cli.command {
        Commands::Partition(args) => run_partition(args),
        Commands::Matrix(args) => run_matrix(args),
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        if json_output {
            Response::error(format!("{err:#}")).print()?;
            std::process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}

fn load_participants(args: &RosterArgs) -> Result<Vec<Participant>> {
    let entries = roster::load_roster(&args.roster)?;
    let catalog = args
        .catalog
        .as_deref()
        .map(roster::load_catalog)
        .transpose()?;
    roster::resolve(entries, catalog.as_ref())
}

fn load_config(path: &Path) -> Result<SearchConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid search config in {}", path.display()))
}

/// Split a roster into groups
fn run_partition(args: PartitionArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };
    let partitioner = Partitioner::new(config)?;

    let participants = load_participants(&args.input)?;
    let framework = args.input.framework;
    validate_participants(&participants, framework)?;

    let partition =
        partitioner.partition(&participants, framework, args.size, args.seed.as_deref())?;

    if args.input.json {
        Response::ok(&partition)?.print()?;
    } else {
        print!("{}", report::render_partition(&partition));
    }
    Ok(())
}

/// Print the distance matrix
fn run_matrix(args: RosterArgs) -> Result<()> {
    let participants = load_participants(&args)?;
    validate_participants(&participants, args.framework)?;
    let matrix = DistanceMatrix::build(&participants, args.framework)?;

    if args.json {
        Response::ok(report::matrix_data(&matrix, args.framework))?.print()?;
    } else {
        print!("{}", report::render_matrix(&matrix));
    }
    Ok(())
}

/// Completeness check only
fn run_validate(args: RosterArgs) -> Result<()> {
    let participants = load_participants(&args)?;
    validate_participants(&participants, args.framework)?;

    if args.json {
        Response::ok(json!({
            "participants": participants.len(),
            "framework": args.framework,
        }))?
        .print()?;
    } else {
        println!(
            "{} participants can be compared under {}",
            participants.len(),
            args.framework
        );
    }
    Ok(())
}
