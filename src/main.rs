use clap::{Parser, Subcommand};
use resfork::archive::{load_with_options, ErrorPolicy, LoadOptions, LoadReport};
use resfork::discovery::DATA_FILE_EXTENSION;
use resfork::{ResourceFork, ResourceIndex};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resfork", about = "Inspect resource-fork data files (.ndat)")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Sources {
    /// Data files or directories to search, merged in order
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,
    /// Data file extension, without the dot
    #[arg(long, default_value = DATA_FILE_EXTENSION)]
    ext: String,
    /// Skip files that fail to decode instead of aborting
    #[arg(long)]
    skip_invalid: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List merged resources
    List {
        #[command(flatten)]
        sources: Sources,
        /// Only list this type tag
        #[arg(short, long = "type")]
        type_tag: Option<String>,
        /// Print the merged index as JSON (payloads hex-encoded)
        #[arg(long)]
        json: bool,
    },
    /// Show header and type table of a single data file
    Info {
        input: PathBuf,
    },
    /// Print one resource with a hex preview of its payload
    Show {
        #[command(flatten)]
        sources: Sources,
        #[arg(short, long = "type")]
        type_tag: String,
        #[arg(short, long)]
        id: u16,
        /// Number of payload bytes to preview
        #[arg(short, long, default_value = "256")]
        bytes: usize,
    },
    /// Write every resource payload to <DIR>/<type>/<id>.bin
    Extract {
        #[command(flatten)]
        sources: Sources,
        #[arg(short = 'C', long, default_value = ".")]
        output_dir: PathBuf,
        /// Only extract this type tag
        #[arg(short, long = "type")]
        type_tag: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {

        // ── List ─────────────────────────────────────────────────────────────
        Commands::List { sources, type_tag, json } => {
            let mut resources = load_sources(&sources)?.resources;
            if let Some(tag) = &type_tag {
                resources.types.retain(|t, _| t == tag);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&resources)?);
            } else {
                print_listing(&resources);
            }
        }

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input } => {
            let fork = ResourceFork::open(&input)?;
            let h = fork.header;
            println!("── Resource fork ────────────────────────────────────────");
            println!("  Path           {}", input.display());
            println!("  Data offset    {:#x}", h.data_offset);
            println!("  Data length    {} B", h.data_length);
            println!("  Map offset     {:#x}", h.map_offset);
            println!("  Map length     {} B", h.map_length);
            println!("  Resources      {}", fork.resources.len());
            println!("  Types ({}):", fork.resources.types.len());
            for (tag, items) in &fork.resources.types {
                let bytes: usize = items.values().map(|r| r.data.len()).sum();
                println!("    {:<6} {:>6} item(s) {:>10} B", tag, items.len(), bytes);
            }
        }

        // ── Show ─────────────────────────────────────────────────────────────
        Commands::Show { sources, type_tag, id, bytes } => {
            let resources = load_sources(&sources)?.resources;
            let res = resources
                .get(&type_tag, id)
                .ok_or_else(|| format!("no resource '{type_tag}' #{id}"))?;
            println!("Type     {}", res.type_tag);
            println!("ID       {}", res.id);
            println!("Name     {}", res.name);
            println!("Size     {} B", res.data.len());
            for (i, line) in res.data[..bytes.min(res.data.len())].chunks(16).enumerate() {
                println!("  {:06x}  {}", i * 16, hex::encode(line));
            }
            if res.data.len() > bytes {
                println!("  … {} more byte(s)", res.data.len() - bytes);
            }
        }

        // ── Extract ──────────────────────────────────────────────────────────
        Commands::Extract { sources, output_dir, type_tag } => {
            let resources = load_sources(&sources)?.resources;
            let mut written = 0usize;
            for res in resources.iter() {
                if type_tag.as_deref().is_some_and(|t| t != res.type_tag) {
                    continue;
                }
                let dir = output_dir.join(sanitize_tag(&res.type_tag));
                std::fs::create_dir_all(&dir)?;
                std::fs::write(dir.join(format!("{}.bin", res.id)), &res.data)?;
                written += 1;
            }
            println!("Extracted {} resource(s) to {}", written, output_dir.display());
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_sources(sources: &Sources) -> Result<LoadReport, Box<dyn std::error::Error>> {
    let opts = LoadOptions {
        extension: sources.ext.clone(),
        policy: if sources.skip_invalid { ErrorPolicy::SkipInvalid } else { ErrorPolicy::FailFast },
    };
    let report = load_with_options(&sources.paths, &opts)?;
    for e in &report.skipped {
        eprintln!("warning: {e}");
    }
    if report.loaded.is_empty() && report.skipped.is_empty() {
        eprintln!("warning: no .{} files found under {}", opts.extension, describe(&sources.paths));
    }
    Ok(report)
}

fn print_listing(resources: &ResourceIndex) {
    println!("{:<6} {:>6} {:>10}  Name", "Type", "ID", "Size");
    for res in resources.iter() {
        println!("{:<6} {:>6} {:>10}  {}", res.type_tag, res.id, res.data.len(), res.name);
    }
    println!("{} resource(s) in {} type(s)", resources.len(), resources.types.len());
}

/// Type tags may contain characters that are not valid in a path component.
fn sanitize_tag(tag: &str) -> String {
    tag.chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect()
}

fn describe(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
