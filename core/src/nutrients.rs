//! Soil nutrient bookkeeping for a single farmland location.
//!
//! A [`NutrientLedger`] is a plain value owned by its location. It is not
//! synchronised; the owner's scheduler serialises updates to one location.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resupply fraction crops used before the fraction became an explicit
/// argument. Kept for fixtures and demos.
pub const LEGACY_RESUPPLY_FRACTION: f32 = 1.0 / 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutrientType {
    Nitrogen,
    Phosphorous,
    Potassium,
}

impl NutrientType {
    pub const VALUES: [NutrientType; 3] = [
        NutrientType::Nitrogen,
        NutrientType::Phosphorous,
        NutrientType::Potassium,
    ];

    // Key used in persisted records
    pub fn key(self) -> &'static str {
        match self {
            NutrientType::Nitrogen => "n",
            NutrientType::Phosphorous => "p",
            NutrientType::Potassium => "k",
        }
    }
}

// NaN inputs count as zero
fn or_zero(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value }
}

// Clamp into [0, 1]; NaN reads as empty.
fn clamp_level(value: f32) -> f32 {
    or_zero(value).clamp(0.0, 1.0)
}

/// Fixed nutrient deltas applied by one use of a fertilizer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fertilizer {
    pub nitrogen: f32,
    pub phosphorus: f32,
    pub potassium: f32,
}

impl Fertilizer {
    pub fn new(nitrogen: f32, phosphorus: f32, potassium: f32) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
        }
    }

    pub fn amount(&self, nutrient: NutrientType) -> f32 {
        match nutrient {
            NutrientType::Nitrogen => self.nitrogen,
            NutrientType::Phosphorous => self.phosphorus,
            NutrientType::Potassium => self.potassium,
        }
    }

    // How many feedback particles a renderer should emit per channel, N/P/K order.
    // Any positive delta shows at least one, at most five.
    pub fn particle_counts(&self) -> [u32; 3] {
        NutrientType::VALUES.map(|nutrient| {
            let amount = self.amount(nutrient);
            if amount > 0.0 {
                (amount * 10.0).clamp(1.0, 5.0) as u32
            } else {
                0
            }
        })
    }
}

/// Persisted form of a ledger, keyed "n", "p", "k".
/// Missing keys load as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientRecord {
    #[serde(rename = "n")]
    pub nitrogen: f32,
    #[serde(rename = "p")]
    pub phosphorous: f32,
    #[serde(rename = "k")]
    pub potassium: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientLedger {
    nitrogen: f32,
    phosphorous: f32,
    potassium: f32,
    resupply_modifier: f32,
}

impl Default for NutrientLedger {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl NutrientLedger {
    /// Ledger with every channel at `initial` (clamped).
    pub fn new(initial: f32) -> Self {
        let level = clamp_level(initial);
        Self {
            nitrogen: level,
            phosphorous: level,
            potassium: level,
            resupply_modifier: 1.0,
        }
    }

    pub fn with_levels(nitrogen: f32, phosphorous: f32, potassium: f32) -> Self {
        let mut ledger = Self::default();
        ledger.set(NutrientType::Nitrogen, nitrogen);
        ledger.set(NutrientType::Phosphorous, phosphorous);
        ledger.set(NutrientType::Potassium, potassium);
        ledger
    }

    // Scales every resupply, e.g. by soil quality. Negative values act as zero.
    pub fn with_resupply_modifier(mut self, modifier: f32) -> Self {
        self.set_resupply_modifier(modifier);
        self
    }

    pub fn set_resupply_modifier(&mut self, modifier: f32) {
        self.resupply_modifier = if modifier.is_nan() { 0.0 } else { modifier.max(0.0) };
    }

    pub fn resupply_modifier(&self) -> f32 {
        self.resupply_modifier
    }

    pub fn get(&self, nutrient: NutrientType) -> f32 {
        match nutrient {
            NutrientType::Nitrogen => self.nitrogen,
            NutrientType::Phosphorous => self.phosphorous,
            NutrientType::Potassium => self.potassium,
        }
    }

    pub fn set(&mut self, nutrient: NutrientType, value: f32) {
        let value = clamp_level(value);
        match nutrient {
            NutrientType::Nitrogen => self.nitrogen = value,
            NutrientType::Phosphorous => self.phosphorous = value,
            NutrientType::Potassium => self.potassium = value,
        }
    }

    // A NaN delta leaves the channel as it was
    pub fn add(&mut self, nutrient: NutrientType, delta: f32) {
        self.set(nutrient, self.get(nutrient) + or_zero(delta));
    }

    /// Consume up to `amount` of `nutrient` and feed a share of what was taken
    /// into both other channels.
    ///
    /// Each other channel gains `consumed * resupply_fraction * resupply_modifier`.
    /// Returns the amount actually consumed, never more than was present.
    pub fn consume_and_resupply(
        &mut self,
        nutrient: NutrientType,
        amount: f32,
        resupply_fraction: f32,
    ) -> f32 {
        let start = self.get(nutrient);
        // a negative or NaN request takes nothing
        let consumed = start.min(or_zero(amount)).max(0.0);

        self.set(nutrient, start - consumed);
        let resupply = consumed * or_zero(resupply_fraction) * self.resupply_modifier;
        for other in NutrientType::VALUES {
            if other != nutrient {
                self.add(other, resupply);
            }
        }

        consumed
    }

    /// Add each fertilizer channel independently. Fertilizing never cross-feeds.
    pub fn apply_fertilizer(&mut self, fertilizer: &Fertilizer) {
        for nutrient in NutrientType::VALUES {
            self.add(nutrient, fertilizer.amount(nutrient));
        }
    }

    pub fn is_saturated(&self) -> bool {
        NutrientType::VALUES.iter().all(|&n| self.get(n) == 1.0)
    }

    pub fn to_record(&self) -> NutrientRecord {
        NutrientRecord {
            nitrogen: self.nitrogen,
            phosphorous: self.phosphorous,
            potassium: self.potassium,
        }
    }

    // Load levels through `set`; the resupply modifier belongs to the location,
    // not the record, and is left unchanged.
    pub fn load_record(&mut self, record: &NutrientRecord) {
        self.set(NutrientType::Nitrogen, record.nitrogen);
        self.set(NutrientType::Phosphorous, record.phosphorous);
        self.set(NutrientType::Potassium, record.potassium);
    }

    pub fn from_record(record: &NutrientRecord) -> Self {
        let mut ledger = Self::default();
        ledger.load_record(record);
        ledger
    }
}

impl fmt::Display for NutrientLedger {
    // Percentages with two decimals, e.g. "N: 50.00%, P: 20.00%, K: 90.00%"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N: {:.2}%, P: {:.2}%, K: {:.2}%",
            self.nitrogen * 100.0,
            self.phosphorous * 100.0,
            self.potassium * 100.0
        )
    }
}
