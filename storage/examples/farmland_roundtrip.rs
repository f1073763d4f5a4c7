use strata_core::nutrients::LEGACY_RESUPPLY_FRACTION;
use strata_core::{Fertilizer, NutrientLedger, NutrientType};
use strata_storage::FarmlandStore;
use strata_storage::models::BlockPos;

#[tokio::main]
async fn main() -> mongodb::error::Result<()> {
    // Fertilize a fresh plot and grow one crop on it
    let mut ledger = NutrientLedger::default();
    ledger.apply_fertilizer(&Fertilizer::new(0.6, 0.3, 0.3));
    for _ in 0..8 {
        ledger.consume_and_resupply(NutrientType::Nitrogen, 0.05, LEGACY_RESUPPLY_FRACTION);
    }

    // Init storage
    let store = FarmlandStore::init("mongodb://localhost:27017", "strata_db", "farmland").await?;
    let pos = BlockPos::new(0, 64, 0);

    // Insert & read back
    store.save(pos, &ledger).await?;
    if let Some(found) = store.load(pos).await? {
        println!("Round-trip success: {}", found);
    } else {
        println!("Farmland not found!");
    }

    // Clean up
    store.delete(pos).await?;

    Ok(())
}
