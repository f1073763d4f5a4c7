mod cli;
mod logging;

use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;
use strata_core::preview::{material_map, save_png};
use strata_core::{
    Fertilizer, LayeredRockData, NutrientLedger, NutrientType, StrataConfig, SurfaceResolver,
};
use strata_storage::FarmlandStore;
use strata_storage::models::BlockPos;

use crate::cli::{CliArgs, Command, DecorateArgs, PreviewArgs, SimulateArgs};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // The global subscriber needs the config's level, so loading logs through
    // a temporary one built from the command line.
    let mut config = tracing::subscriber::with_default(
        logging::subscriber(args.log_level.as_deref()),
        || StrataConfig::load_or_create(&args.config),
    )
    .with_context(|| format!("loading config from {}", args.config.display()))?;
    args.apply_overrides(&mut config);
    logging::init_logging(Some(&config.log_level));

    match &args.command {
        Command::Preview(preview) => run_preview(&config, preview),
        Command::Simulate(sim) => run_simulate(&config, sim),
        Command::Decorate(decorate) => run_decorate(&config, decorate),
    }
}

fn run_preview(config: &StrataConfig, args: &PreviewArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let resolver = SurfaceResolver::new(&config.surface);
    let rocks = LayeredRockData::default();

    let map = material_map(&resolver, &rocks, &config.preview);
    tracing::info!(
        state = config.preview.state.name(),
        size = config.preview.size,
        "Resolved preview in {:.2} ms",
        start.elapsed().as_secs_f32() * 1000.0
    );

    save_png(&map, &args.out)?;
    println!("Saved {}", args.out.display());
    Ok(())
}

fn run_simulate(config: &StrataConfig, args: &SimulateArgs) -> anyhow::Result<()> {
    let mut ledger = config.farmland.new_ledger();
    let nutrient = NutrientType::from(args.nutrient);

    if let Some(values) = &args.fertilizer {
        let &[n, p, k] = values.as_slice() else {
            bail!("--fertilizer takes exactly three values (N,P,K), got {}", values.len());
        };
        let fertilizer = Fertilizer::new(n, p, k);
        ledger.apply_fertilizer(&fertilizer);
        let [pn, pp, pk] = fertilizer.particle_counts();
        println!("fertilized: {} (particles N{} P{} K{})", ledger, pn, pp, pk);
    }

    for tick in 1..=args.ticks {
        let consumed =
            ledger.consume_and_resupply(nutrient, args.demand, config.farmland.resupply_fraction);
        println!("tick {:>3}: consumed {:.4} -> {}", tick, consumed, ledger);
        if consumed == 0.0 {
            tracing::warn!(?nutrient, tick, "soil exhausted");
            break;
        }
    }

    if let Some(uri) = &args.mongo_uri {
        persist(uri, BlockPos::new(args.x, args.y, args.z), &ledger)?;
    }
    Ok(())
}

fn persist(uri: &str, pos: BlockPos, ledger: &NutrientLedger) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    rt.block_on(async {
        let store = FarmlandStore::init(uri, "strata_db", "farmland").await?;
        store.save(pos, ledger).await?;
        anyhow::Ok(())
    })?;
    println!("Saved farmland at {:?}", pos);
    Ok(())
}

fn run_decorate(config: &StrataConfig, args: &DecorateArgs) -> anyhow::Result<()> {
    if config.tall_plants.is_empty() {
        tracing::warn!("no tall_plants configured");
        return Ok(());
    }

    for (index, plant) in config.tall_plants.iter().enumerate() {
        // separate stream per plant kind
        let seed = args.seed.wrapping_add(index as u64);
        for attempt in plant.attempts(seed, [args.x, args.y, args.z]) {
            let column = plant.column(attempt.height);
            println!(
                "plant {} at ({}, {}, {}) height {}: {:?}",
                index,
                attempt.x,
                attempt.y,
                attempt.z,
                attempt.height,
                column.iter().map(|m| m.0).collect::<Vec<_>>()
            );
        }
    }
    Ok(())
}
