//! roadphys-sim — headless scenario runner.
//!
//! Drives one car over a scripted input timeline on flat ground, printing
//! telemetry samples and the final state digest. Two runs with the same
//! arguments must print the same digest; that is the point of the tool.

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use roadphys_core::DeterminismContract;
use roadphys_surface::FlatSurface;
use roadphys_vehicle::{Car, InputSnapshot, Preset, VehicleConfig};

#[derive(Parser, Debug)]
#[command(
    name = "roadphys-sim",
    version,
    about = "Run a scripted driving scenario and print telemetry + state digest"
)]
struct Opts {
    /// Handling preset: stable | balanced | drift
    #[arg(long, default_value = "balanced")]
    preset: String,
    /// JSON config file; takes precedence over --preset
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of simulation ticks
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Fixed timestep (seconds); clamped by the core like any frame dt
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Print a telemetry line every N ticks (0 = digest only)
    #[arg(long, default_value_t = 60)]
    sample: u64,
    /// Disable stability control for the whole run
    #[arg(long)]
    no_esc: bool,
    /// Drift sensitivity override in [0, 1]
    #[arg(long)]
    drift_sensitivity: Option<f32>,
    /// Input phases as "action:start..end" tokens, e.g.
    /// "accel:0..300 left:60..180 brake:300..360"
    #[arg(long, default_value = "accel:0..600")]
    script: String,
    /// Write the effective config as pretty JSON and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug)]
enum Action {
    Accel,
    Brake,
    Left,
    Right,
}

#[derive(Copy, Clone, Debug)]
struct Phase {
    action: Action,
    start: u64,
    end: u64,
}

fn parse_script(s: &str) -> Result<Vec<Phase>> {
    let mut phases = Vec::new();
    for token in s.split_whitespace() {
        let (action, range) = token
            .split_once(':')
            .ok_or_else(|| anyhow!("bad phase {token:?}, expected action:start..end"))?;
        let action = match action {
            "accel" => Action::Accel,
            "brake" => Action::Brake,
            "left" => Action::Left,
            "right" => Action::Right,
            other => bail!("unknown action {other:?} (accel|brake|left|right)"),
        };
        let (start, end) = range
            .split_once("..")
            .ok_or_else(|| anyhow!("bad range in {token:?}, expected start..end"))?;
        let start: u64 = start.parse().with_context(|| format!("bad start in {token:?}"))?;
        let end: u64 = end.parse().with_context(|| format!("bad end in {token:?}"))?;
        if end < start {
            bail!("empty range in {token:?}");
        }
        phases.push(Phase { action, start, end });
    }
    Ok(phases)
}

/// Overlay all phases active at `tick` into one snapshot.
fn input_at(phases: &[Phase], tick: u64) -> InputSnapshot {
    let mut input = InputSnapshot::NEUTRAL;
    for p in phases {
        if (p.start..p.end).contains(&tick) {
            match p.action {
                Action::Accel => input.accelerate = true,
                Action::Brake => input.brake = true,
                Action::Left => input.steer_left = true,
                Action::Right => input.steer_right = true,
            }
        }
    }
    input
}

fn preset_from_str(s: &str) -> Result<Preset> {
    match s {
        "stable" => Ok(Preset::Stable),
        "balanced" => Ok(Preset::Balanced),
        "drift" => Ok(Preset::Drift),
        other => bail!("unknown preset {other:?} (stable|balanced|drift)"),
    }
}

fn load_config(opts: &Opts) -> Result<VehicleConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let s = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parsing {}", path.display()))?
        }
        None => preset_from_str(&opts.preset)?.config(),
    };
    if let Some(s) = opts.drift_sensitivity {
        cfg.set_drift_sensitivity(s);
    }
    if opts.no_esc {
        cfg.stability_enabled = false;
    }
    Ok(cfg)
}

fn main() -> ExitCode {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    let opts = Opts::parse();
    let cfg = load_config(&opts)?;

    if let Some(path) = &opts.write_config {
        fs::write(path, serde_json::to_string_pretty(&cfg)?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let phases = parse_script(&opts.script)?;
    let mut car = Car::new(cfg)?;
    car.set_ready(true);
    let ground = FlatSurface { height: 0.0 };

    let contract = DeterminismContract::default_contract();
    println!(
        "contract: {}  nominal dt {:.4} s  dt ceiling {:.3} s",
        contract.float, contract.fixed_dt, contract.max_dt
    );

    for tick in 0..opts.ticks {
        car.step(input_at(&phases, tick), opts.dt, &ground);
        if opts.sample > 0 && (tick + 1) % opts.sample == 0 {
            let t = car.telemetry();
            println!(
                "tick {:5}  speed {:6.2} m/s  fwd {:6.2} m/s  slip {:+.3} rad  heading {:+.3} rad",
                tick + 1,
                t.speed,
                t.forward_velocity,
                t.slip_angle,
                t.heading
            );
        }
    }

    println!("ticks {}  final digest {:02x?}", opts.ticks, car.state_digest());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn script_phases_overlay() {
        let phases = parse_script("accel:0..300 left:60..180 brake:300..360").unwrap();
        assert!(input_at(&phases, 0).accelerate);
        assert!(!input_at(&phases, 0).steer_left);
        let mid = input_at(&phases, 100);
        assert!(mid.accelerate && mid.steer_left);
        let late = input_at(&phases, 320);
        assert!(!late.accelerate && late.brake);
        assert_eq!(input_at(&phases, 400), InputSnapshot::NEUTRAL);
    }

    #[test] fn malformed_scripts_are_rejected() {
        assert!(parse_script("fly:0..10").is_err());
        assert!(parse_script("accel:10").is_err());
        assert!(parse_script("accel:20..10").is_err());
        assert!(parse_script("accel").is_err());
    }

    #[test] fn preset_names_parse() {
        assert_eq!(preset_from_str("drift").unwrap(), Preset::Drift);
        assert!(preset_from_str("sideways").is_err());
    }
}
