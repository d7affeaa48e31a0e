//! longmul CLI - plays the long multiplication walkthrough in a terminal.
//!
//! # Modes
//!
//! ```text
//! longmul 23 45            timed playback, one narrated line per step
//! longmul 23 45 --instant  every step at once, then the grid
//! longmul 23 45 --manual   one step per Enter (also when autoplay is off)
//! longmul 23 45 --json     dump the step timeline and exit
//! ```
//!
//! Timed playback uses a fixed frame cadence: each frame feeds the elapsed
//! time to [`Playback::tick`], which fires every action that came due.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use longmul_engine::{
    Fired, LongmulConfig, Operand, Playback, SpeedFactor, StepTimeline, config_path, text,
};

#[derive(Parser)]
#[command(name = "longmul")]
#[command(about = "Step-by-step long multiplication, digit by digit")]
struct Cli {
    /// Top operand
    #[arg(requires = "multiplier")]
    multiplicand: Option<String>,
    /// Bottom operand
    multiplier: Option<String>,
    /// Playback speed multiplier (e.g. 0.5, 2, 3x)
    #[arg(long)]
    speed: Option<SpeedFactor>,
    /// Pick random operands from the configured range
    #[arg(long, conflicts_with = "multiplicand")]
    random: bool,
    /// Skip the delays and print the whole walkthrough
    #[arg(long, conflicts_with = "manual")]
    instant: bool,
    /// Advance one step per Enter keypress
    #[arg(long)]
    manual: bool,
    /// Print the step timeline as JSON and exit
    #[arg(long)]
    json: bool,
    /// Config file to use instead of ~/.longmul/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than interleave logs with the walkthrough.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.longmul/logs/longmul.log
    if let Some(config_path) = config_path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("longmul.log"));
    }

    // Fallback: ./.longmul/logs/longmul.log
    candidates.push(PathBuf::from(".longmul").join("logs").join("longmul.log"));

    candidates
}

fn load_config(explicit: Option<&PathBuf>) -> Result<LongmulConfig> {
    let loaded = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            LongmulConfig::load_from(path)?
        }
        None => LongmulConfig::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

fn build_playback(cli: &Cli, config: &LongmulConfig) -> Result<Playback> {
    let (multiplicand, multiplier) = match (&cli.multiplicand, &cli.multiplier) {
        (Some(a), Some(b)) => (a.clone(), b.clone()),
        _ => {
            let operands = config.operands();
            (operands.multiplicand, operands.multiplier)
        }
    };
    let multiplicand = Operand::parse(&multiplicand)
        .with_context(|| format!("invalid multiplicand {multiplicand:?}"))?;
    let multiplier = Operand::parse(&multiplier)
        .with_context(|| format!("invalid multiplier {multiplier:?}"))?;

    let mut playback = Playback::from_config(config, multiplicand, multiplier)?;
    if cli.random {
        playback.randomize();
    }
    if let Some(speed) = cli.speed {
        playback.set_speed(speed);
    }
    Ok(playback)
}

fn print_header(out: &mut impl Write, timeline: &StepTimeline) -> io::Result<()> {
    writeln!(
        out,
        "{} x {} ({} steps)",
        timeline.multiplicand(),
        timeline.multiplier(),
        timeline.len()
    )
}

fn print_step(out: &mut impl Write, playback: &Playback, cursor: usize) -> Result<()> {
    let sequencer = playback.sequencer();
    let line = text::narrate(sequencer.timeline(), cursor)?;
    writeln!(
        out,
        "[{cursor:>3}/{}] {:<18} {line}",
        sequencer.total_steps(),
        sequencer.timeline().state_at(cursor).as_str()
    )?;
    Ok(())
}

fn print_grid(out: &mut impl Write, playback: &Playback) -> io::Result<()> {
    let sequencer = playback.sequencer();
    writeln!(out)?;
    writeln!(out, "{}", text::render_grid(sequencer.timeline(), sequencer.view()))
}

fn run_instant(out: &mut impl Write, playback: &mut Playback) -> Result<()> {
    while !playback.is_finished() {
        playback.step();
        print_step(out, playback, playback.sequencer().cursor())?;
    }
    Ok(())
}

fn run_manual(out: &mut impl Write, playback: &mut Playback) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !playback.is_finished() {
        write!(out, "press Enter for the next step ")?;
        out.flush()?;
        if lines.next().transpose()?.is_none() {
            break;
        }
        playback.step();
        print_step(out, playback, playback.sequencer().cursor())?;
        print_grid(out, playback)?;
    }
    Ok(())
}

const FRAME_DURATION: Duration = Duration::from_millis(16);

async fn run_timed(out: &mut impl Write, playback: &mut Playback) -> Result<()> {
    playback.play();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    while !playback.is_finished() {
        frames.tick().await;
        let now = Instant::now();
        let delta = now.duration_since(last_frame);
        last_frame = now;

        for fired in playback.tick(delta) {
            if let Fired::Advanced { cursor, .. } = fired {
                print_step(out, playback, cursor)?;
                out.flush()?;
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(cli.config.as_ref())?;
    let mut playback = build_playback(&cli, &config)?;
    let mut out = io::stdout().lock();

    if cli.json {
        let json = serde_json::to_string_pretty(playback.sequencer().timeline())?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    print_header(&mut out, playback.sequencer().timeline())?;
    if cli.instant {
        run_instant(&mut out, &mut playback)?;
        print_grid(&mut out, &playback)?;
    } else if cli.manual || !config.playback().autoplay {
        run_manual(&mut out, &mut playback)?;
    } else {
        tracing::info!(speed = %playback.speed(), "Starting timed playback");
        run_timed(&mut out, &mut playback).await?;
        print_grid(&mut out, &playback)?;
    }

    Ok(())
}
