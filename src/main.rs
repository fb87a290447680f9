use anyhow::{anyhow, Context, Result};
use cd_allocation::io::{loader, reporting, synthetic};
use cd_allocation::{RunContext, RunParams, TierTable};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Assign stores to distribution centers and report the cost per center.
#[derive(Parser, Debug)]
#[command(about = "Greedy capacity-constrained store-to-CD allocation with tiered costing")]
struct Args {
    /// Store table (id_loja, latitude, longitude)
    #[arg(long, required_unless_present = "synthetic_stores")]
    stores: Option<PathBuf>,

    /// Facility table (deposito, latitude, longitude, existente, capacidade)
    #[arg(long)]
    facilities: PathBuf,

    /// Tier table; the built-in Minimo/Pequeno/Medio/Grande table when absent
    #[arg(long)]
    tiers: Option<PathBuf>,

    /// JSON file with run parameters; flags below override it
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long)]
    cost_per_km: Option<f64>,

    #[arg(long)]
    avg_product_cost: Option<f64>,

    #[arg(long)]
    pieces_per_store_per_day: Option<f64>,

    #[arg(long)]
    opportunity_cost_rate: Option<f64>,

    #[arg(long)]
    payback_years: Option<f64>,

    #[arg(long)]
    vehicle_capacity: Option<u32>,

    /// Generate this many stores around --center instead of reading --stores
    #[arg(long, conflicts_with = "stores")]
    synthetic_stores: Option<usize>,

    /// Cluster center for synthetic stores as LAT,LON
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [-23.55, -46.63])]
    center: Vec<f64>,

    /// Draw synthetic stores uniformly inside LAT_MIN,LAT_MAX,LON_MIN,LON_MAX instead of around --center
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    bbox: Option<Vec<f64>>,

    /// Spread of synthetic stores, in degrees
    #[arg(long, default_value_t = 1.5)]
    spread: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Where to write the per-facility summary
    #[arg(long, default_value = "resultado_otimizacao.csv")]
    output: String,

    /// Where to write the per-store allocation
    #[arg(long)]
    allocation_output: Option<String>,
}

impl Args {
    fn run_params(&self) -> Result<RunParams> {
        let mut params = match &self.params {
            Some(path) => RunParams::from_json_file(path)
                .with_context(|| format!("reading parameters from {}", path.display()))?,
            None => RunParams::default(),
        };

        if let Some(v) = self.cost_per_km {
            params.cost_per_km = v;
        }
        if let Some(v) = self.avg_product_cost {
            params.avg_product_cost = v;
        }
        if let Some(v) = self.pieces_per_store_per_day {
            params.pieces_per_store_per_day = v;
        }
        if let Some(v) = self.opportunity_cost_rate {
            params.opportunity_cost_rate = v;
        }
        if let Some(v) = self.payback_years {
            params.payback_years = v;
        }
        if let Some(v) = self.vehicle_capacity {
            params.vehicle_capacity = v;
        }
        Ok(params)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // 1. CONFIGURATION
    let params = args.run_params()?;
    params.validate().context("invalid run parameters")?;
    info!(?params, "run parameters");

    let tiers = match &args.tiers {
        Some(path) => loader::load_tiers(path)
            .with_context(|| format!("loading tiers from {}", path.display()))?,
        None => TierTable::default(),
    };

    // 2. INPUTS
    let stores = match (&args.stores, args.synthetic_stores) {
        (Some(path), _) => loader::load_stores(path)
            .with_context(|| format!("loading stores from {}", path.display()))?,
        (None, Some(count)) => match args.bbox.as_deref() {
            Some(&[lat_min, lat_max, lon_min, lon_max]) => {
                info!(count, bbox = ?args.bbox, seed = args.seed, "generating uniform synthetic stores");
                synthetic::generate_uniform_stores(
                    count,
                    (lat_min, lat_max),
                    (lon_min, lon_max),
                    args.seed,
                )
                .context("generating synthetic stores")?
            }
            Some(other) => {
                return Err(anyhow!(
                    "--bbox expects LAT_MIN,LAT_MAX,LON_MIN,LON_MAX, got {other:?}"
                ))
            }
            None => {
                let center = match args.center.as_slice() {
                    [lat, lon] => (*lat, *lon),
                    other => return Err(anyhow!("--center expects LAT,LON, got {other:?}")),
                };
                info!(count, ?center, spread = args.spread, seed = args.seed, "generating synthetic stores");
                synthetic::generate_clustered_stores(count, center, args.spread, args.seed)
                    .context("generating synthetic stores")?
            }
        },
        (None, None) => return Err(anyhow!("either --stores or --synthetic-stores is required")),
    };

    let facilities = loader::load_facilities(&args.facilities)
        .with_context(|| format!("loading facilities from {}", args.facilities.display()))?;

    // 3. RUN
    let context = RunContext::new(stores, facilities, tiers, params);
    let report = context.run().context("allocation run failed")?;

    // 4. EXPORT
    reporting::export_summary(&args.output, &report.summaries)
        .with_context(|| format!("writing {}", args.output))?;
    println!("Summary written to ./{}", args.output);

    if let Some(path) = &args.allocation_output {
        reporting::export_allocation(path, &report.assignments)
            .with_context(|| format!("writing {path}"))?;
        println!("Allocation written to ./{path}");
    }

    // 5. COST ANALYSIS
    println!();
    print!("{}", reporting::render_cost_analysis(&report));

    Ok(())
}
