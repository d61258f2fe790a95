use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tk_app::{
    AppError, AppResult, ExportFormat, HeadlessRequest, RunProgressEvent, export_history,
    load_config, run_headless, save_config, summarize,
};
use tk_core::units::to_m3;
use tk_project::SessionConfig;

#[derive(Parser)]
#[command(name = "tk-cli")]
#[command(about = "Tankflow CLI - single-tank level simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a session config file
    Validate {
        /// Path to the config file (.yaml, .yml or .json)
        config_path: PathBuf,
    },
    /// Write the default session config
    Init {
        /// Output path (.yaml, .yml or .json)
        config_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print derived quantities for a config
    Show {
        /// Path to the config file; defaults are used when omitted
        config_path: Option<PathBuf>,
    },
    /// Run a session headless on a simulated clock
    Run {
        /// Path to the config file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of ticks to run
        #[arg(long, default_value_t = 200)]
        ticks: usize,
        /// Wall seconds between ticks (defaults to the configured tick interval)
        #[arg(long)]
        wall_step: Option<f64>,
        /// Open the inlet valve before the first tick
        #[arg(long)]
        inlet_open: bool,
        /// Inlet flow setpoint override
        #[arg(long)]
        inlet_flow: Option<f64>,
        /// Outlet flow setpoint override
        #[arg(long)]
        outlet_flow: Option<f64>,
        /// Tank cross-section override
        #[arg(long)]
        area: Option<f64>,
        /// Export the history window (.csv or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Init { config_path, force } => cmd_init(&config_path, force),
        Commands::Show { config_path } => cmd_show(config_path.as_deref()),
        Commands::Run {
            config,
            ticks,
            wall_step,
            inlet_open,
            inlet_flow,
            outlet_flow,
            area,
            output,
        } => cmd_run(
            config.as_deref(),
            HeadlessRequest {
                ticks,
                wall_step_s: wall_step,
                inlet_open,
                inlet_flow_m3ps: inlet_flow,
                outlet_flow_m3ps: outlet_flow,
                cross_section_area_m2: area,
            },
            output.as_deref(),
        ),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    load_config(Some(config_path))?;
    println!("✓ Config is valid");
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> AppResult<()> {
    if config_path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }
    save_config(config_path, &SessionConfig::default())?;
    println!("✓ Wrote default config to {}", config_path.display());
    Ok(())
}

fn cmd_show(config_path: Option<&Path>) -> AppResult<()> {
    let config = load_config(config_path)?;
    let summary = summarize(&config);

    println!("Session: {}", summary.name);
    println!("  Max volume:       {:.3} m³", summary.max_volume_m3());
    println!(
        "  Max volume span:  {:.3} - {:.3} m³ (area slider)",
        to_m3(summary.max_volume_span.0),
        to_m3(summary.max_volume_span.1)
    );
    println!(
        "  Inlet flow:       {:.2} - {:.2} m³/s (default {:.2})",
        summary.inlet_flow.min, summary.inlet_flow.max, summary.inlet_flow.default
    );
    println!(
        "  Outlet flow:      {:.2} - {:.2} m³/s (default {:.2})",
        summary.outlet_flow.min, summary.outlet_flow.max, summary.outlet_flow.default
    );
    println!("  Tick interval:    {} ms", summary.tick_interval_ms);
    println!("  Max dt per tick:  {} s", summary.max_dt_s);
    println!(
        "  History window:   {} samples (~{:.1} s)",
        summary.history_capacity, summary.history_window_s
    );
    println!("  Overlay timeout:  {} s", summary.overlay_timeout_s);
    Ok(())
}

fn cmd_run(
    config_path: Option<&Path>,
    request: HeadlessRequest,
    output: Option<&Path>,
) -> AppResult<()> {
    let config = load_config(config_path)?;
    let format = output.map(ExportFormat::from_path).transpose()?;

    println!("Running {} ticks of '{}'", request.ticks, config.name);

    let mut last_emit = Instant::now();
    let response = run_headless(
        &config,
        &request,
        Some(&mut |event| {
            let emit_now = event.tick == event.total || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    let session = &response.session;
    println!("✓ Simulated {:.2} s in {} ticks", response.final_time_s, response.ticks_run);
    println!("  Level:   {:.1}%", session.level_pct());
    println!("  Volume:  {:.3} m³", session.volume_m3());
    println!("  Q_in:    {:.2} m³/s", session.inlet_flow_m3ps());
    println!("  Q_out:   {:.2} m³/s", session.outlet_flow_m3ps());
    match response.first_overflow_s {
        Some(t) => println!("  ⚠ Overflow first reached at t = {:.2} s", t),
        None => println!("  No overflow"),
    }
    println!("  Wall time: {:.3} s", response.elapsed_wall_s);

    if let (Some(path), Some(format)) = (output, format) {
        export_history(path, format, response.started_at, session.history())?;
        println!(
            "✓ Exported {} samples to {}",
            session.history().len(),
            path.display()
        );
    }

    Ok(())
}

fn render_cli_progress(event: &RunProgressEvent) {
    let fraction = if event.total > 0 {
        event.tick as f64 / event.total as f64
    } else {
        1.0
    };
    let width = 28usize;
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  tick={}/{}  t={:.2}s  level={:.1}%{}",
        bar,
        fraction * 100.0,
        event.tick,
        event.total,
        event.time_s,
        event.level_pct,
        if event.overflow { "  OVERFLOW" } else { "" }
    );
    let _ = io::stdout().flush();
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}
