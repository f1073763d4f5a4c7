// storage holds the MongoDB schema & async CRUD for farmland soil

pub mod models;

use crate::models::{BlockPos, FarmlandDoc};
use bson::{Document, doc};
use futures_util::stream::TryStreamExt;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use strata_core::{NutrientLedger, NutrientRecord};

// Encode the nutrient levels as a { n, p, k } document
pub fn nutrients_to_document(ledger: &NutrientLedger) -> bson::ser::Result<Document> {
    bson::to_document(&ledger.to_record())
}

// Decode a { n, p, k } document; missing keys read as zero, values are clamped
pub fn ledger_from_document(doc: Document) -> bson::de::Result<NutrientLedger> {
    let record: NutrientRecord = bson::from_document(doc)?;
    Ok(NutrientLedger::from_record(&record))
}

fn pos_filter(pos: BlockPos) -> Document {
    doc! { "pos.x": pos.x, "pos.y": pos.y, "pos.z": pos.z }
}

// One document per block position
fn position_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "pos.x": 1, "pos.y": 1, "pos.z": 1 })
        .options(Some(IndexOptions::builder().unique(true).build()))
        .build()
}

pub struct FarmlandStore {
    col: Collection<FarmlandDoc>,
}

impl FarmlandStore {
    // Initialize the MongoDB collection
    pub async fn init(uri: &str, db_name: &str, col_name: &str) -> mongodb::error::Result<Self> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("StrataStorage".to_string());
        let client = Client::with_options(opts)?;
        let col = client.database(db_name).collection(col_name);

        col.create_index(position_index()).await?;
        tracing::debug!(db = db_name, collection = col_name, "farmland store ready");

        Ok(Self { col })
    }

    // Write the ledger for a position, replacing whatever was stored there.
    pub async fn save(&self, pos: BlockPos, ledger: &NutrientLedger) -> mongodb::error::Result<()> {
        self.col
            .replace_one(pos_filter(pos), FarmlandDoc::new(pos, ledger))
            .upsert(true)
            .await?;
        tracing::debug!(?pos, %ledger, "saved farmland");
        Ok(())
    }

    pub async fn load(&self, pos: BlockPos) -> mongodb::error::Result<Option<NutrientLedger>> {
        let found = self.col.find_one(pos_filter(pos)).await?;
        Ok(found.map(|doc| doc.ledger()))
    }

    pub async fn list_positions(&self) -> mongodb::error::Result<Vec<BlockPos>> {
        let mut cursor = self.col.find(doc! {}).await?;
        let mut positions = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            positions.push(doc.pos);
        }
        Ok(positions)
    }

    // Farmland destroyed, its soil goes with it
    pub async fn delete(&self, pos: BlockPos) -> mongodb::error::Result<()> {
        self.col.delete_one(pos_filter(pos)).await?;
        Ok(())
    }
}
