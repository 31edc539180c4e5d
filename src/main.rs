use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use dependency_analyser::app::coordinator::DependencyAnalyser;
use dependency_analyser::app::runtime::{AnalyserConfig, AnalysisRuntime, build_runtime};
use dependency_analyser::cli::{self, OutputFormat};
use dependency_analyser::server::http;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "depanalyser")]
#[command(about = "Static dependency analysis for Java source trees")]
#[command(version)]
struct Cli {
    /// Emit JSON instead of text reports
    #[arg(long, global = true)]
    json: bool,

    /// Worker threads for the analysis pool (defaults to one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Delay after each stream event, in milliseconds
    #[arg(long, global = true, default_value_t = 0)]
    throttle_ms: u64,

    /// Compilation unit file extension
    #[arg(long, global = true, default_value = "java")]
    extension: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dependencies of a single source file
    Class { path: PathBuf },
    /// Dependencies of the files directly inside a directory
    Package { path: PathBuf },
    /// Dependencies of every package under a root directory
    Project { path: PathBuf },
    /// Stream one line per file (class name and imports) as files are read
    Stream { path: PathBuf },
    /// Class, then package, then project analysis in sequence
    Chain {
        class: PathBuf,
        package: PathBuf,
        project: PathBuf,
    },
    /// Print the dependency graph of a project as Graphviz DOT
    Graph {
        path: PathBuf,
        /// Build the graph from stream events (imports only)
        #[arg(long)]
        from_stream: bool,
    },
    /// Serve reports and the event stream over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let mut config = AnalyserConfig {
        extension: cli.extension.clone(),
        stream_throttle: Duration::from_millis(cli.throttle_ms),
        ..AnalyserConfig::default()
    };
    if let Some(threads) = cli.threads {
        config = config.with_worker_threads(threads);
    }

    let runtime = build_runtime(&config).context("Failed to start analysis runtime")?;
    let analyser = DependencyAnalyser::new(AnalysisRuntime::for_runtime(&runtime), config);
    let format = OutputFormat::from_json_flag(cli.json);

    match cli.command {
        Commands::Class { path } => cli::print_class_report(&analyser, &path, format)?,
        Commands::Package { path } => cli::print_package_report(&analyser, &path, format)?,
        Commands::Project { path } => cli::print_project_report(&analyser, &path, format)?,
        Commands::Stream { path } => cli::print_stream(&analyser, &path, format)?,
        Commands::Chain {
            class,
            package,
            project,
        } => cli::print_chain(&analyser, &class, &package, &project, format)?,
        Commands::Graph { path, from_stream } => cli::print_graph(&analyser, &path, from_stream)?,
        Commands::Serve { addr } => {
            eprintln!("Listening on http://{addr}");
            runtime.block_on(http::serve(analyser, addr))?;
        }
    }

    Ok(())
}
