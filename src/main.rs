use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use smooth_conway::config::{DEFAULT_OUTPUT_PATH, DEFAULT_STEP_DELAY_MS};
use smooth_conway::{App, Config, ModelKind, RunOptions};

#[derive(Parser, Debug)]
#[command(
    name = "smooth-conway",
    version,
    about = "Run SmoothLife or Conway's Game of Life in the terminal and export an SVG animation"
)]
struct Cli {
    /// Model to run: smoothlife or conway.
    #[arg(short, long, default_value = "smoothlife")]
    model: String,

    /// Grid width in cells (prompted when omitted).
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (prompted when omitted).
    #[arg(long)]
    height: Option<usize>,

    /// Seed for the initial grid; a random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many steps even without an end state.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Delay between steps in milliseconds.
    #[arg(long, default_value_t = DEFAULT_STEP_DELAY_MS)]
    delay_ms: u64,

    /// Path of the exported SVG animation.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Do not print a frame per step.
    #[arg(long)]
    no_display: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let kind: ModelKind = cli.model.parse()?;

    let (width, height) = match (cli.width, cli.height) {
        (Some(w), Some(h)) => (w, h),
        (w, h) => prompt_dimensions(w, h)?,
    };

    let sim_config = Config::new(width, height);
    let mut sim = kind
        .build(sim_config)
        .context("failed to set up simulation")?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Seeding {} grid with seed {}", kind, seed);
    sim.initialize(&mut StdRng::seed_from_u64(seed));

    let options = RunOptions {
        step_delay: Duration::from_millis(cli.delay_ms),
        max_steps: cli.max_steps,
        display: !cli.no_display,
    };
    let mut app = App::new(sim, options);

    let stdout = io::stdout();
    let summary = app.run(&mut stdout.lock())?;
    log::info!(
        "Finished after {} steps (end state: {})",
        summary.steps,
        summary.terminal
    );

    app.export(&cli.output)
        .context("animation export failed")?;
    println!(
        "SVG animation generated. Check '{}'.",
        cli.output.display()
    );

    Ok(())
}

/// Ask on stdin for whichever dimensions were not given on the command line.
fn prompt_dimensions(width: Option<usize>, height: Option<usize>) -> Result<(usize, usize)> {
    println!("Enter grid dimensions for the simulation:");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut ask = |label: &str, given: Option<usize>| -> Result<usize> {
        if let Some(v) = given {
            return Ok(v);
        }
        print!("{}: ", label);
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            bail!("no {} given on stdin", label.to_lowercase());
        };
        let line = line?;
        line.trim()
            .parse::<usize>()
            .with_context(|| format!("invalid {} '{}'", label.to_lowercase(), line.trim()))
    };

    let width = ask("Width", width)?;
    let height = ask("Height", height)?;
    Ok((width, height))
}
