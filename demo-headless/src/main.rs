use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fire_danger_core::{
    compare, model::fuel_type_histogram, summarize, Celsius, ClimateScenario, FireDangerModel,
    FuelType, KilometersPerHour, LandCoverRaster, Landscape, Millimeters, ParameterTable, Percent,
    RasterSummary, ReclassTable, ScenarioRun,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Land-cover code written for cells without data
const NODATA: i32 = -9999;

/// Fire danger demo over a synthetic land-cover grid
#[derive(Parser, Debug)]
#[command(name = "fire-danger-demo")]
#[command(about = "Gridded McArthur fire danger and rate of spread", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 64)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 64)]
    height: usize,

    /// Seed for the synthetic land cover
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Side length of homogeneous land-cover patches, in cells
    #[arg(long, default_value_t = 8)]
    patch_size: usize,

    /// Fraction of cells written as no-data
    #[arg(long, default_value_t = 0.02)]
    nodata_fraction: f64,

    /// Climate preset the overrides below are applied to
    #[arg(short, long, value_enum, default_value_t = Preset::Reference)]
    preset: Preset,

    /// Temperature in °C
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Relative humidity in %
    #[arg(long)]
    humidity: Option<f64>,

    /// Wind speed in km/h
    #[arg(short, long)]
    wind_speed: Option<f64>,

    /// Keetch-Byram drought index (0-800)
    #[arg(short = 'k', long)]
    drought_index: Option<f64>,

    /// Days since the last rain event
    #[arg(long)]
    days_since_rain: Option<u32>,

    /// Amount of the last rain event in mm
    #[arg(long)]
    last_rain: Option<f64>,

    /// JSON vegetation parameter table replacing the reference table
    #[arg(long)]
    params: Option<PathBuf>,

    /// Second preset to run and compare against the first
    #[arg(short, long, value_enum)]
    compare: Option<Preset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Reference,
    Moderate,
    Severe,
}

impl Preset {
    fn scenario(self) -> ClimateScenario {
        match self {
            Preset::Reference => ClimateScenario::reference(),
            Preset::Moderate => ClimateScenario::moderate(),
            Preset::Severe => ClimateScenario::severe(),
        }
    }
}

impl Args {
    fn scenario(&self) -> ClimateScenario {
        let mut scenario = self.preset.scenario();
        if let Some(temperature) = self.temperature {
            scenario.temperature = Celsius::new(temperature);
        }
        if let Some(humidity) = self.humidity {
            scenario.humidity = Percent::new(humidity);
        }
        if let Some(wind_speed) = self.wind_speed {
            scenario.wind_speed = KilometersPerHour::new(wind_speed);
        }
        if let Some(drought_index) = self.drought_index {
            scenario.drought_index = drought_index;
        }
        if let Some(days) = self.days_since_rain {
            scenario.days_since_rain = days;
        }
        if let Some(last_rain) = self.last_rain {
            scenario.last_rain = Millimeters::new(last_rain);
        }
        scenario
    }
}

/// Patchy land cover: every `patch_size` block shares one code drawn from 1-21
fn synthetic_land_cover(args: &Args) -> Result<LandCoverRaster> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let patch = args.patch_size.max(1);
    let patches_x = args.width.div_ceil(patch);
    let patches_y = args.height.div_ceil(patch);

    let patch_codes: Vec<i32> = (0..patches_x * patches_y)
        .map(|_| rng.random_range(1..=21))
        .collect();

    let mut codes = Vec::with_capacity(args.width * args.height);
    for row in 0..args.height {
        for col in 0..args.width {
            let code = if rng.random_bool(args.nodata_fraction.clamp(0.0, 1.0)) {
                NODATA
            } else {
                patch_codes[(row / patch) * patches_x + col / patch]
            };
            codes.push(code);
        }
    }

    LandCoverRaster::new(args.width, args.height, codes, Some(NODATA))
        .context("building synthetic land cover")
}

fn load_parameters(path: Option<&PathBuf>) -> Result<ParameterTable> {
    let Some(path) = path else {
        return Ok(ParameterTable::reference());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading parameter table {}", path.display()))?;
    let table = serde_json::from_str(&text)
        .with_context(|| format!("parsing parameter table {}", path.display()))?;
    info!("Loaded vegetation parameters from {}", path.display());
    Ok(table)
}

fn format_option(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

fn print_summary(title: &str, summary: &RasterSummary) {
    println!("{title}");
    println!("  Fuel type  | Cells |  Min    |  Max    |  Mean");
    println!("  -----------|-------|---------|---------|---------");
    for fuel_type in FuelType::ALL {
        let stats = summary.fuel_type(fuel_type);
        if stats.cells == 0 {
            continue;
        }
        println!(
            "  {:<10} | {:5} | {:>7} | {:>7} | {:>7}",
            fuel_type.label(),
            stats.cells,
            format_option(stats.min),
            format_option(stats.max),
            format_option(stats.mean)
        );
    }
    println!(
        "  Missing: {} of {} cells\n",
        summary.overall.missing, summary.overall.cells
    );
}

fn report_run(run: &ScenarioRun, landscape: &Landscape) -> Result<()> {
    println!("=== Scenario: {} ===\n", run.scenario);

    let danger = &run.danger_aggregates;
    println!("Drought factor: {:.3}", danger.drought_factor);
    println!("Forest danger index: {:.3}", danger.forest_index);
    println!("Grassland maximum: {}", format_option(danger.grassland_max));
    println!("Arable index: {}", format_option(danger.arable_index));

    let spread = &run.spread_aggregates;
    println!("Forest spread multiplier: {}", format_option(spread.forest_multiplier));
    println!("Grass spread rate: {}", format_option(spread.grass_rate));
    println!("Heath spread rate: {}\n", format_option(spread.heath_rate));

    print_summary("Danger index", &summarize(&run.danger, landscape.fuel())?);
    print_summary("Rate of spread", &summarize(&run.spread, landscape.fuel())?);

    let mut ratings = BTreeMap::new();
    for rating in run.ratings().cells().iter().flatten() {
        *ratings.entry(*rating).or_insert(0_usize) += 1;
    }
    println!("Danger ratings:");
    for (rating, count) in &ratings {
        println!("  {:<12} {count}", rating.label());
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Fire Danger Demo ===\n");

    let land_cover = synthetic_land_cover(&args)?;
    let model = FireDangerModel::new(
        ReclassTable::reference(),
        load_parameters(args.params.as_ref())?,
    );
    let landscape = model.prepare(&land_cover);

    println!("Grid: {}x{} cells (seed {})", args.width, args.height, args.seed);
    let histogram = fuel_type_histogram(landscape.fuel());
    for fuel_type in FuelType::ALL {
        println!(
            "  {:<10} {}",
            fuel_type.label(),
            histogram.get(&fuel_type).copied().unwrap_or(0)
        );
    }
    println!();

    let mut scenarios = vec![args.scenario()];
    if let Some(preset) = args.compare {
        scenarios.push(preset.scenario());
    }
    let runs = model
        .run_all(&landscape, &scenarios)
        .context("running climate scenarios")?;

    for run in &runs {
        report_run(run, &landscape)?;
    }

    if let [baseline, alternative] = runs.as_slice() {
        let comparison = compare(baseline, alternative)?;
        println!("=== Comparison (second − first) ===\n");
        let danger = comparison.danger_statistics;
        println!(
            "Danger difference: min {} max {} mean {}",
            format_option(danger.min),
            format_option(danger.max),
            format_option(danger.mean)
        );
        let spread = comparison.spread_statistics;
        println!(
            "Spread difference: min {} max {} mean {}",
            format_option(spread.min),
            format_option(spread.max),
            format_option(spread.mean)
        );
    }

    Ok(())
}
