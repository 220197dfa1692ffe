use clap::Parser;
use log::{info, LevelFilter};
use motion_meter::{Column, PipelineConfig, Session};

use std::io;

/// Turns a saved project into a measurement table on stdout.
#[derive(Parser)]
struct Args {
    /// Project file (JSON) with the coordinate system and tracked points.
    #[clap(short, long)]
    project: String,

    /// Optional pipeline configuration (JSON).
    #[clap(short, long)]
    config: Option<String>,

    /// Fit `--fit-y` against this column, e.g. `time`.
    #[clap(long)]
    fit_x: Option<String>,

    #[clap(long)]
    fit_y: Option<String>,
}

fn handle_error(err: &anyhow::Error) {
    for (i, e) in err.chain().enumerate() {
        eprintln!("  {}: {}", i + 1, e);
    }
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(err) = run() {
        handle_error(&err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => PipelineConfig::default(),
    };

    let session = Session::from_json(&std::fs::read_to_string(&args.project)?, config)?;

    if !session.coordinate_system().is_calibrated() {
        info!("project is not calibrated, world columns will be empty");
    }

    session.write_csv(io::stdout().lock())?;

    if let (Some(x), Some(y)) = (&args.fit_x, &args.fit_y) {
        let (x, y): (Column, Column) = (x.parse()?, y.parse()?);

        match session.regression(x, y) {
            Some(fit) => eprintln!(
                "{} = {} * {} + {} (R² = {})",
                y, fit.slope, x, fit.intercept, fit.r_squared
            ),
            None => eprintln!("not enough data to fit {} against {}", y, x),
        }
    }

    Ok(())
}
