use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strata_core::{NutrientLedger, NutrientRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

// One farmland location and its soil
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmlandDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub pos: BlockPos,
    // Stored as { n, p, k }
    pub nutrients: NutrientRecord,
    #[serde(default = "default_modifier")]
    pub resupply_modifier: f32,
}

fn default_modifier() -> f32 {
    1.0
}

impl FarmlandDoc {
    pub fn new(pos: BlockPos, ledger: &NutrientLedger) -> Self {
        Self {
            id: None,
            pos,
            nutrients: ledger.to_record(),
            resupply_modifier: ledger.resupply_modifier(),
        }
    }

    pub fn ledger(&self) -> NutrientLedger {
        NutrientLedger::from_record(&self.nutrients).with_resupply_modifier(self.resupply_modifier)
    }
}
