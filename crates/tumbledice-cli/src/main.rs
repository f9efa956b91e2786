//! Tumbledice CLI
//!
//! Drives the widget's animation core headlessly at a fixed simulated
//! frame rate and prints the results. Because the committed outcome is a
//! deterministic function of the tumble randomness, `--histogram` gives a
//! quick empirical look at the face distribution.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tumbledice::dice3d::{DiceAnimator, Face, FaceLabels, TickOutcome};

/// Headless dice roller
#[derive(Parser)]
#[command(name = "tumbleroll")]
#[command(author, version, about = "Roll the tumbledice animation core without a window")]
struct Cli {
    /// Number of rolls to simulate
    #[arg(short, long, default_value = "1")]
    rolls: u32,

    /// Seed for the random source; identical seeds replay identical rolls
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated animation frame rate
    #[arg(long, default_value = "60.0")]
    fps: f32,

    /// Path to a JSON file with six custom face labels
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// Print the outcome distribution after rolling
    #[arg(long)]
    histogram: bool,
}

fn main() {
    let cli = Cli::parse();

    let labels = match &cli.labels {
        Some(path) => FaceLabels::load_from_file(path),
        None => FaceLabels::default(),
    };

    let mut rng: StdRng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if cli.fps <= 0.0 {
        eprintln!("--fps must be positive");
        std::process::exit(2);
    }
    let dt = 1.0 / cli.fps;

    let mut animator = DiceAnimator::default();
    let mut counts = [0u32; 6];

    for i in 1..=cli.rolls {
        let face = roll_once(&mut animator, &mut rng, dt);
        counts[face.index()] += 1;
        println!(
            "{} {}",
            format!("Roll {}:", i).dimmed(),
            labels.label_for(face).red().bold()
        );
    }

    if cli.histogram {
        print_histogram(&counts, cli.rolls);
    }
}

/// Run one complete roll at a fixed timestep.
fn roll_once(animator: &mut DiceAnimator, rng: &mut impl Rng, dt: f32) -> Face {
    animator.start_roll(rng);
    loop {
        if let TickOutcome::Finished(face) = animator.tick(dt) {
            return face;
        }
    }
}

fn print_histogram(counts: &[u32; 6], total: u32) {
    println!();
    println!("{}", "Outcome distribution".bold());

    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    for (i, &count) in counts.iter().enumerate() {
        let bar = "#".repeat((count * 40 / max) as usize);
        let pct = if total > 0 {
            100.0 * f64::from(count) / f64::from(total)
        } else {
            0.0
        };
        // Pad before coloring so ANSI escapes don't skew the column width.
        println!(
            "{:>2}  {} {:>6} ({:>5.1}%)",
            i + 1,
            format!("{:<40}", bar).red(),
            count,
            pct
        );
    }
}
