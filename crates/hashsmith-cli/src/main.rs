mod config;
mod registry;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use config::{GenerationSettings, Settings, load_settings};
use hashsmith_core::{GenerationError, save_wordlist};
use hashsmith_plan::{
    PlanError, ValidatedPlan, ValidationReport, plan_json_schema_value, validate_plan,
};
use registry::{
    RunContext, RunSummary, init_console_logging, init_run_logging, start_run, write_summary,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid plan: {0}")]
    InvalidPlan(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "hashsmith", version, about = "HashSmith wordlist pattern engine")]
struct Cli {
    /// Path to hashsmith.toml (defaults to ./hashsmith.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the plan's wordlist and record a run.
    Generate(GenerateArgs),
    /// Print the structural upper bound for the plan.
    Estimate(PlanArgs),
    /// Check a plan and print its issues.
    Validate(PlanArgs),
    /// Print the first filtered candidates.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Path to plan.json.
    #[arg(long)]
    plan: PathBuf,
}

#[derive(Args, Debug)]
struct LimitArgs {
    /// Minimum candidate length in characters.
    #[arg(long)]
    min_len: Option<usize>,
    /// Maximum candidate length in characters.
    #[arg(long)]
    max_len: Option<usize>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    plan: PlanArgs,
    /// Wordlist output path.
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    limits: LimitArgs,
    /// Stop after this many candidates.
    #[arg(long)]
    max_count: Option<u64>,
    /// Output directory for runs (overrides [output].run_dir).
    #[arg(long)]
    run_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    plan: PlanArgs,
    #[command(flatten)]
    limits: LimitArgs,
    /// Number of candidates to print.
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args, settings),
        Command::Estimate(args) => run_estimate(args, &settings),
        Command::Validate(args) => run_validate(args, &settings),
        Command::Preview(args) => run_preview(args, &settings),
    }
}

fn run_generate(args: GenerateArgs, settings: Settings) -> Result<(), CliError> {
    let GenerateArgs {
        plan: PlanArgs { plan: plan_path },
        out,
        limits,
        max_count,
        run_dir,
    } = args;

    let validated = load_plan(&plan_path)?;
    let flags = GenerationSettings {
        min_len: limits.min_len,
        max_len: limits.max_len,
        max_count,
        max_estimate: None,
    };
    let effective = effective_limits(&settings, &validated, flags)?;

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        run_dir: run_dir.unwrap_or_else(|| settings.output.run_dir.clone()),
        plan_path: plan_path.clone(),
        plan_name: validated.plan.name.clone(),
        out: out.clone(),
        limits: effective.clone(),
        estimate: validated.estimate,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path, &settings.logging.level)?;

    tracing::info!(event = "run_started", run_id = %run_id, plan = %plan_path.display());
    tracing::info!(event = "config_written", path = %run_paths.config_path.display());
    for issue in &validated.warnings {
        tracing::warn!(event = "plan_warning", code = %issue.code, path = %issue.path, message = %issue.message);
    }
    if let Some(limit) = effective.max_estimate {
        if validated.estimate > u128::from(limit) {
            tracing::warn!(event = "estimate_exceeds_limit", estimate = %validated.estimate, limit);
            eprintln!(
                "warning: estimate {} exceeds max_estimate {limit}",
                validated.estimate
            );
        }
    }

    let timer = Instant::now();
    let lines = save_wordlist(
        &validated.pattern,
        &out,
        effective.length_range(),
        effective.max_count,
    )?;
    let duration_ms = timer.elapsed().as_millis();

    write_summary(
        &run_paths,
        &RunSummary {
            run_id,
            status: "success".to_string(),
            lines,
            estimate: validated.estimate,
            out: out.display().to_string(),
            duration_ms,
        },
    )?;
    tracing::info!(event = "run_finished", status = "success", lines, duration_ms = %duration_ms);

    println!("wrote {lines} candidates to {}", out.display());
    println!("run artifacts: {}", run_paths.root.display());
    Ok(())
}

fn run_estimate(args: PlanArgs, settings: &Settings) -> Result<(), CliError> {
    init_console_logging(&settings.logging.level)?;
    let validated = load_plan(&args.plan)?;
    print_warnings(&validated);
    println!("{}", validated.estimate);
    Ok(())
}

fn run_validate(args: PlanArgs, settings: &Settings) -> Result<(), CliError> {
    init_console_logging(&settings.logging.level)?;
    let validated = load_plan(&args.plan)?;
    print_warnings(&validated);
    println!(
        "plan is valid ({} warning(s), estimate {})",
        validated.warnings.len(),
        validated.estimate
    );
    Ok(())
}

fn run_preview(args: PreviewArgs, settings: &Settings) -> Result<(), CliError> {
    init_console_logging(&settings.logging.level)?;
    let validated = load_plan(&args.plan.plan)?;
    let flags = GenerationSettings {
        min_len: args.limits.min_len,
        max_len: args.limits.max_len,
        ..GenerationSettings::default()
    };
    let effective = effective_limits(settings, &validated, flags)?;

    for candidate in validated
        .pattern
        .generate(effective.length_range())
        .take(args.limit)
    {
        println!("{candidate}");
    }
    Ok(())
}

/// Config, then plan options, then command-line flags.
fn effective_limits(
    settings: &Settings,
    validated: &ValidatedPlan,
    flags: GenerationSettings,
) -> Result<GenerationSettings, CliError> {
    let plan = validated
        .plan
        .options
        .as_ref()
        .map(GenerationSettings::from)
        .unwrap_or_default();
    let effective = settings.generation.clone().overlay(plan).overlay(flags);

    if effective.length_range().is_empty() {
        return Err(CliError::InvalidConfig(format!(
            "min_len {} is greater than max_len {}",
            effective.min_len.unwrap_or(0),
            effective.max_len.unwrap_or(usize::MAX)
        )));
    }
    Ok(effective)
}

fn load_plan(path: &Path) -> Result<ValidatedPlan, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let plan_json: serde_json::Value =
        serde_json::from_str(&contents).map_err(PlanError::from)?;
    let plan_schema = plan_json_schema_value()?;

    validate_plan(&plan_json, &plan_schema).map_err(|report| {
        print_report(&report);
        CliError::InvalidPlan(format!(
            "{} failed validation with {} error(s)",
            path.display(),
            report.errors.len()
        ))
    })
}

fn print_warnings(validated: &ValidatedPlan) {
    print_report(&ValidationReport {
        errors: Vec::new(),
        warnings: validated.warnings.clone(),
    });
}

fn print_report(report: &ValidationReport) {
    for issue in report.errors.iter().chain(&report.warnings) {
        eprintln!("{issue}");
    }
}
