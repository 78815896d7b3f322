use std::path::PathBuf;

use clap::Parser;
use meander::{Dimension, Mark, PlotLayout, Preset, WalkPlot};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Generate a random walk and show it in a window")]
struct Args {
    /// Load walk and color settings from a TOML preset
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Write the settings in use to a TOML preset and exit
    #[arg(long)]
    save: Option<PathBuf>,

    /// Override the number of steps
    #[arg(long)]
    steps: Option<usize>,

    /// Walk in three dimensions
    #[arg(long)]
    three_d: bool,

    /// Draw a dot per step instead of lines
    #[arg(long)]
    dots: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let preset = match &args.preset {
        Some(path) => Preset::load(path)?,
        None => Preset::default(),
    };
    let mut config = preset.walk_config()?;
    let policy = preset.color_policy()?;
    if let Some(steps) = args.steps {
        config = config.with_step_count(steps);
    }
    if args.three_d {
        config = config.with_dimension(Dimension::Three);
    }

    if let Some(path) = &args.save {
        Preset::from_parts(&config, &policy).save(path)?;
        info!("saved preset to {}", path.display());
        return Ok(());
    }

    let walk = meander::generate(&config)?;
    info!(
        steps = config.step_count,
        seams = walk.jump_seam_indices().len(),
        "generated walk, press R for a new one"
    );

    let mark = if args.dots {
        Mark::Dots { size: 1.0 }
    } else {
        Mark::default()
    };
    let mut plot = WalkPlot::new(&walk, &policy, PlotLayout::new())?.with_mark(mark);

    meander::launch_with(&mut plot, move |plot| {
        let walk = meander::generate(&config)?;
        plot.replace(&walk, &policy)
    })?;
    Ok(())
}
