use clap::Parser;
use colored::Colorize;
use filesdir_check::config::{Config, ErrorPolicy, RootSelection};
use filesdir_check::report::{ReportFormat, Reporter};
use filesdir_check::{resolve_arguments, Scanner, TreeIndex};
use indicatif::{ProgressBar, ProgressStyle};
use miette::Result;
use std::path::PathBuf;
use tracing::{debug, info};

const DESCRIPTION: &str = "filesdir-check helps locate unused FILESDIR files in Gentoo portage \
trees. The idea is to look for references to each file in the relevant ebuilds and report any \
files that appear to be unreferenced. Note that this is a heuristic check, and that both false \
positives and false negatives can occur.";

const ARGUMENTS_HELP: &str = "Arguments:
  Each of the following is a valid argument:
    category
    package
    category/package";

/// filesdir-check - locate unused FILESDIR files
#[derive(Parser, Debug)]
#[command(name = "filesdir-check")]
#[command(version, about = DESCRIPTION, long_about = None, after_help = ARGUMENTS_HELP)]
struct Cli {
    /// Categories, packages or category/packages to restrict the check to
    #[arg(value_name = "ARGUMENTS")]
    arguments: Vec<String>,

    /// Just check the tree at DIR
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Check all overlays instead of the main tree
    #[arg(short, long)]
    overlays: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of packages to check concurrently (1 = sequential, 0 = one per CPU)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Skip packages whose recipes cannot be read instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Ignore whole-line comments in recipes
    #[arg(long)]
    strip_comments: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    format: OutputFormat,

    /// Output file
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Plain => ReportFormat::Plain,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("filesdir-check v{}", env!("CARGO_PKG_VERSION"));

    // Flag conflicts are reported before touching the filesystem
    let selection = RootSelection::from_flags(cli.directory.clone(), cli.overlays)?;

    let config = load_config(&cli)?;
    let roots = selection.roots(&config)?;
    debug!("Roots: {:?}", roots);

    run(&config, &cli, roots)
}

fn run(config: &Config, cli: &Cli, roots: Vec<PathBuf>) -> Result<()> {
    let index = TreeIndex::new(roots.clone());
    let scopes = resolve_arguments(&index, &cli.arguments)?;

    let mut scanner = Scanner::new(&index, config);
    if cli.progress && !cli.quiet {
        scanner = scanner.with_progress(progress_bar());
    }

    let result = scanner.scan_all(&roots, &scopes)?;

    if !result.failures.is_empty() && !cli.quiet {
        eprintln!(
            "{}: {} packages could not be checked",
            "warning".yellow().bold(),
            result.failures.len()
        );
    }

    let reporter = Reporter::new(cli.format.clone().into(), cli.output.clone());
    reporter.report(&result)?;

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Config::from_default_locations(&cwd)?
    };
    config.apply_env();

    // Override with CLI arguments
    if let Some(jobs) = cli.jobs {
        config.jobs = jobs;
    }
    if cli.keep_going {
        config.on_error = ErrorPolicy::Skip;
    }
    if cli.strip_comments {
        config.strip_comments = true;
    }

    Ok(config)
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
