use serde::{Deserialize, Serialize};

/// Opaque identifier of a terrain material (block or fluid) in the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u32);

/// Material variants derived from one rock type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rock {
    pub raw: MaterialId,
    pub cobble: MaterialId,
    pub gravel: MaterialId,
    pub sand: MaterialId,
    pub sandstone: MaterialId,
}

impl Rock {
    pub fn raw(&self) -> MaterialId {
        self.raw
    }

    pub fn cobble(&self) -> MaterialId {
        self.cobble
    }

    pub fn gravel(&self) -> MaterialId {
        self.gravel
    }

    pub fn sand(&self) -> MaterialId {
        self.sand
    }

    pub fn sandstone(&self) -> MaterialId {
        self.sandstone
    }
}

/// Rock classification supplied by the host world generator.
///
/// Surface states only read from it; the data is owned elsewhere.
pub trait RockData {
    /// Rock occupying the voxel at (x, y, z).
    fn rock(&self, x: i32, y: i32, z: i32) -> &Rock;

    /// Upper rock layer of the column at (x, z).
    fn top_rock(&self, x: i32, z: i32) -> &Rock;

    /// Lower rock layer of the column at (x, z).
    fn bottom_rock(&self, x: i32, z: i32) -> &Rock;
}

// Two horizontal rock layers split at a fixed height, the same for every column.
// Enough for previews and tests; real worlds plug in their own `RockData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredRockData {
    pub top: Rock,
    pub bottom: Rock,
    // First y that belongs to the top layer
    pub boundary_y: i32,
}

impl RockData for LayeredRockData {
    fn rock(&self, _x: i32, y: i32, _z: i32) -> &Rock {
        if y >= self.boundary_y {
            &self.top
        } else {
            &self.bottom
        }
    }

    fn top_rock(&self, _x: i32, _z: i32) -> &Rock {
        &self.top
    }

    fn bottom_rock(&self, _x: i32, _z: i32) -> &Rock {
        &self.bottom
    }
}

impl Default for LayeredRockData {
    // Granite over basalt, split at sea level
    fn default() -> Self {
        Self {
            top: Rock {
                raw: MaterialId(100),
                cobble: MaterialId(101),
                gravel: MaterialId(102),
                sand: MaterialId(103),
                sandstone: MaterialId(104),
            },
            bottom: Rock {
                raw: MaterialId(200),
                cobble: MaterialId(201),
                gravel: MaterialId(202),
                sand: MaterialId(203),
                sandstone: MaterialId(204),
            },
            boundary_y: 63,
        }
    }
}
