use serde::{Deserialize, Serialize};

/// Per-column climate values computed by the host.
///
/// Values are never validated or clamped here; surface states compare them
/// against thresholds and fall through to their default branch otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Climate {
    /// Average temperature in degrees Celsius.
    pub temperature: f32,
    /// Annual rainfall in millimetres.
    pub rainfall: f32,
    pub salty: bool,
}

impl Climate {
    pub fn new(temperature: f32, rainfall: f32, salty: bool) -> Self {
        Self {
            temperature,
            rainfall,
            salty,
        }
    }
}
