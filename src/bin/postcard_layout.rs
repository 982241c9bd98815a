use clap::Parser;
use holiday_postcard::config::range_types::{CellSpacing, GridResolution};
use holiday_postcard::plugins::environment::hut_rng;
use holiday_postcard::resources::PostcardConfig;
use holiday_postcard::{HeightField, Placement, PostcardResult, resolve_config, scatter_huts};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postcard_layout")]
#[command(about = "Print the hut layout for a seed without opening a window")]
struct Args {
    /// Seed for the ground noise and hut layout (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Candidates per grid side
    #[arg(long)]
    resolution: Option<u32>,

    /// Distance between neighbouring candidates
    #[arg(long)]
    spacing: Option<f32>,

    /// Ground noise frequency (0 keeps the ground flat)
    #[arg(long)]
    ground_frequency: Option<f32>,

    /// Config file providing the remaining scatter settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> PostcardResult<()> {
    let args = Args::parse();

    let (mut config, origin) = resolve_config(args.config.as_deref());
    eprintln!("Config: {origin:?}");
    apply_overrides(&mut config, &args);

    let seed = config.seed.unwrap_or_else(rand::random);
    let ground_frequency = args
        .ground_frequency
        .unwrap_or(config.terrain.ground_noise_frequency.get());
    let heights = HeightField::seeded(seed, ground_frequency);

    let placements = scatter_huts(&heights, &config.scatter, &mut hut_rng(seed));
    print_layout(seed, &config, &placements);
    Ok(())
}

fn apply_overrides(config: &mut PostcardConfig, args: &Args) {
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(resolution) = args.resolution {
        config.scatter.resolution = GridResolution::new(resolution);
    }
    if let Some(spacing) = args.spacing {
        config.scatter.spacing = CellSpacing::new(spacing);
    }
}

fn print_layout(seed: u64, config: &PostcardConfig, placements: &[Placement]) {
    let scatter = &config.scatter;
    let resolution = scatter.resolution.get();
    println!("Seed: {seed}");
    println!(
        "Grid: {resolution}x{resolution} at spacing {} (radius band {:.1}..{:.1})",
        scatter.spacing.get(),
        scatter.min_radius(),
        scatter.max_radius()
    );
    println!("Huts: {} of {} candidates", placements.len(), resolution * resolution);

    for placement in placements {
        println!(
            "  x={:.3} y={:.3} z={:.3} distribution={:.4} scale={:.3}",
            placement.position.x,
            placement.position.y,
            placement.position.z,
            placement.distribution,
            placement.scale
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let args = Args::parse_from(["postcard_layout", "--seed", "9", "--resolution", "10", "--spacing", "3"]);
        let mut config = PostcardConfig::default();

        apply_overrides(&mut config, &args);

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.scatter.resolution.get(), 10);
        assert_eq!(config.scatter.spacing.get(), 3.0);
    }

    #[test]
    fn test_missing_overrides_keep_config() {
        let args = Args::parse_from(["postcard_layout"]);
        let mut config = PostcardConfig::default();

        apply_overrides(&mut config, &args);

        assert_eq!(config.seed, None);
        assert_eq!(config.scatter.resolution.get(), 25);
    }
}
