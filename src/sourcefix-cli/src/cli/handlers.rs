//! Command execution handlers.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use sourcefix_engine::{FileOutcome, FixConfig, Fixer, RuleSet, RunReport};

use super::args::{Cli, Commands, RunArgs};

/// Exit code when at least one file could not be processed.
const EXIT_FILE_ERRORS: u8 = 2;
/// Exit code for `check` when files would change.
const EXIT_PENDING_CHANGES: u8 = 1;

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` takes precedence over the CLI level when set.
pub fn init_logging(cli: &Cli) {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new(cli.effective_log_level().as_filter_str()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Dispatch the parsed command line.
pub fn dispatch_command(cli: Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let config = FixConfig::discover(cli.config.as_deref(), &cwd)
        .context("failed to load configuration")?;

    match cli.command {
        None => run_fix(config, RunArgs::default(), false),
        Some(Commands::Run(args)) => run_fix(config, args, false),
        Some(Commands::Check(args)) => run_fix(config, args, true),
        Some(Commands::Rules) => list_rules(&config),
    }
}

fn run_fix(mut config: FixConfig, args: RunArgs, check: bool) -> Result<ExitCode> {
    if let Some(root) = args.root {
        config.root = root;
    }
    if let Some(glob) = args.glob {
        config.glob = glob;
    }
    config.recursive |= args.recursive;
    config.dry_run |= args.dry_run || check;
    if !args.rules.is_empty() {
        config.enabled_rules = args.rules;
    }

    let fixer = Fixer::from_config(&config).context("invalid fix configuration")?;
    let report = fixer
        .run(&config.root)
        .with_context(|| format!("cannot fix files under {}", config.root.display()))?;

    print_report(&report);

    let code = if !report.is_success() {
        ExitCode::from(EXIT_FILE_ERRORS)
    } else if check && report.changed_count() > 0 {
        ExitCode::from(EXIT_PENDING_CHANGES)
    } else {
        ExitCode::SUCCESS
    };
    Ok(code)
}

fn print_report(report: &RunReport) {
    let verb = if report.dry_run { "Would fix" } else { "Fixed" };
    for file in report.changed() {
        println!(
            "✓ {verb} {} ({})",
            display_path(&file.path),
            file.hits_summary()
        );
    }
    for file in report.errors() {
        if let FileOutcome::Error(message) = &file.outcome {
            eprintln!("✗ {}: {message}", display_path(&file.path));
        }
    }
    println!("{}", report.summary());
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .display()
        .to_string()
}

fn list_rules(config: &FixConfig) -> Result<ExitCode> {
    let rules = RuleSet::builtin(&config.rules).context("failed to build rules")?;
    for rule in rules.iter() {
        let disabled = config.disabled_rules.iter().any(|name| name == rule.name());
        println!(
            "{:<28} {:<11} {}{}",
            rule.name(),
            rule.kind().label(),
            rule.description(),
            if disabled { " (disabled)" } else { "" }
        );
    }
    Ok(ExitCode::SUCCESS)
}
