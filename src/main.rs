use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use nextver::analyzer::TagRepository;
use nextver::cli::{run_version_workflow, VersionWorkflowArgs};
use nextver::config;
use nextver::git::Git2Repository;
use nextver::ui;

#[derive(clap::Parser)]
#[command(
    name = "nextver",
    about = "Infer the next semantic version of a git repository from its tags and commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Path inside the repository")]
    repo: String,

    #[arg(short, long, default_value = "HEAD", help = "Reference to compute the version for")]
    target: String,

    #[arg(long, help = "Version used when no version tags exist")]
    initial_version: Option<String>,

    #[arg(long, help = "Print the full changelog instead of CI variables")]
    changelog: bool,

    #[arg(long, help = "Group changelog entries by commit category")]
    categorized: bool,

    #[arg(long, help = "Print the version info as JSON")]
    json: bool,

    #[arg(long, help = "List recognized version tags, newest first, and exit")]
    list_tags: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if args.version {
        println!("nextver {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("No git repository found at '{}'", args.repo))?;

    if args.list_tags {
        let tags = TagRepository::new(&repo).version_tags();
        return ui::print_tags(&tags);
    }

    let workflow_args = VersionWorkflowArgs {
        target: args.target,
        initial_version: args.initial_version,
        changelog: args.changelog,
        categorized: args.categorized.then_some(true),
    };

    let result = run_version_workflow(&repo, &config, &workflow_args)?;
    ui::display_success(&ui::format_version_summary(&result.info));

    if let Some(changelog) = &result.changelog {
        ui::print_changelog(changelog)
    } else if args.json {
        ui::print_json(&result.info)
    } else {
        ui::print_ci_variables(&result.ci_variables)
    }
}
