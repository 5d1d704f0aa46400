//! Headless run: step a seeded world and print how the bond network evolves.

use anyhow::Result;
use bondlife::cli::ConfigArgs;
use bondlife_core::BondState;
use bondlife_sim::{SimulationClock, SimulationState};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Run the simulation without a window and report statistics")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Frames to simulate (each runs `substeps` integrator steps)
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Print a row every this many frames
    #[arg(short, long, default_value_t = 60)]
    every: u32,
}

struct Snapshot {
    particles: usize,
    bonds: usize,
    free: usize,
    partial: usize,
    saturated: usize,
    mean_speed: f32,
}

fn snapshot(state: &SimulationState) -> Snapshot {
    let (mut free, mut partial, mut saturated) = (0, 0, 0);
    let mut speed = 0.0;
    for p in state.particles() {
        match state.bond_state(p.id) {
            Some(BondState::Free) => free += 1,
            Some(BondState::Partial) => partial += 1,
            Some(BondState::Saturated) => saturated += 1,
            None => {}
        }
        speed += p.speed();
    }
    let n = state.particle_count();
    Snapshot {
        particles: n,
        bonds: state.bond_count(),
        free,
        partial,
        saturated,
        mean_speed: if n > 0 { speed / n as f32 } else { 0.0 },
    }
}

fn print_row(frame: u64, steps: u64, s: &Snapshot) {
    println!(
        "{:>7} {:>8} {:>6} {:>6} {:>6} {:>8} {:>10} {:>8.3}",
        frame, steps, s.particles, s.bonds, s.free, s.partial, s.saturated, s.mean_speed
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.load()?;
    let every = cli.every.max(1) as u64;

    eprintln!(
        "Simulating {} particles for {} frames ({} kinds, {}, seed {})...",
        config.particle_count,
        cli.frames,
        config.kinds(),
        config.boundary.name(),
        config.seed
    );

    let mut clock = SimulationClock::new(config.substeps);
    let mut state = SimulationState::new(config);
    let mut formed = 0;
    let mut broken = 0;

    println!();
    println!(
        "{:>7} {:>8} {:>6} {:>6} {:>6} {:>8} {:>10} {:>8}",
        "frame", "steps", "N", "bonds", "free", "partial", "saturated", "speed"
    );
    print_row(0, 0, &snapshot(&state));
    for _ in 0..cli.frames {
        let report = clock.tick(&mut state);
        formed += report.bonds_formed;
        broken += report.bonds_broken;
        if clock.frames % every == 0 {
            print_row(clock.frames, state.steps(), &snapshot(&state));
        }
    }

    println!();
    println!("Bonds formed: {}  broken: {}  alive: {}", formed, broken, state.bond_count());
    let census = state.store().census(state.kinds());
    for (k, count) in census.iter().enumerate() {
        println!("  kind {} : {:>5} particles", k + 1, count);
    }

    Ok(())
}
