//! QA sweep for math-audio-harmonics
//!
//! Times the batch engines against the point-wise references over a range
//! of batch sizes and prints one tab-separated row per size:
//! 1. Spherical harmonics (values plus ∂Y₁¹/∂φ and ∂Y₁¹/∂θ)
//! 2. Gegenbauer polynomials (values plus highest-degree derivative)
//!
//! Usage:
//!     cargo run --bin harmonics-qa --release

use anyhow::{Context, bail};
use clap::Parser;
use math_audio_harmonics::checked_degree;
use math_audio_harmonics::validation::{
    GEGENBAUER_HEADER, HARMONIC_HEADER, run_gegenbauer_trial, run_harmonic_trial,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::ops::RangeInclusive;

#[derive(Parser, Debug)]
#[command(
    name = "harmonics-qa",
    about = "Compare batched spherical harmonics and Gegenbauer polynomials against reference implementations"
)]
struct Cli {
    /// Maximum spherical harmonic degree L
    #[arg(long, default_value_t = 6, allow_negative_numbers = true)]
    max_degree: i64,

    /// Maximum Gegenbauer degree n
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    gegenbauer_degree: i64,

    /// Gegenbauer shape parameter alpha
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    alpha: f64,

    /// Batch sizes 10^a..=10^b for spherical harmonics, as "a..=b"
    #[arg(long, default_value = "3..=6", value_parser = parse_exponents)]
    harmonic_exponents: RangeInclusive<u32>,

    /// Batch sizes 10^a..=10^b for Gegenbauer polynomials, as "a..=b"
    #[arg(long, default_value = "0..=5", value_parser = parse_exponents)]
    gegenbauer_exponents: RangeInclusive<u32>,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_exponents(s: &str) -> Result<RangeInclusive<u32>, String> {
    let (start, end) = s
        .split_once("..=")
        .ok_or_else(|| format!("expected a range like 3..=6, got '{s}'"))?;
    let start: u32 = start.trim().parse().map_err(|e| format!("{e}"))?;
    let end: u32 = end.trim().parse().map_err(|e| format!("{e}"))?;
    if start > end || end > 9 {
        return Err(format!("invalid exponent range {start}..={end}"));
    }
    Ok(start..=end)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let max_degree = checked_degree(cli.max_degree).context("--max-degree")?;
    let gegenbauer_degree = checked_degree(cli.gegenbauer_degree).context("--gegenbauer-degree")?;
    if !cli.alpha.is_finite() {
        bail!("--alpha must be finite, got {}", cli.alpha);
    }

    let mut rng: StdRng = match cli.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => {
            let mut thread_rng = rand::rng();
            StdRng::from_rng(&mut thread_rng)
        }
    };

    println!("# testing spherical harmonics (L = {max_degree})");
    println!("{HARMONIC_HEADER}");
    for exponent in cli.harmonic_exponents.clone() {
        let n_points = 10usize.pow(exponent);
        let trial = run_harmonic_trial(&mut rng, n_points, max_degree)?;
        println!("{}", trial.to_row());
    }

    println!("# gegenbauer (n = {gegenbauer_degree}, alpha = {})", cli.alpha);
    println!("{GEGENBAUER_HEADER}");
    for exponent in cli.gegenbauer_exponents.clone() {
        let n_points = 10usize.pow(exponent);
        let trial = run_gegenbauer_trial(&mut rng, n_points, gegenbauer_degree, cli.alpha);
        println!("{}", trial.to_row());
    }

    log::info!("sweep complete");
    Ok(())
}
