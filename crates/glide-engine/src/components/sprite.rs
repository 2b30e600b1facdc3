use serde::{Deserialize, Serialize};

/// Identifies which texture atlas a frame belongs to.
/// Opaque to the core; the host resolves it to drawable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AtlasId(pub u32);

/// Reference to a single drawable cell in an atlas.
/// Shared freely by value; carries no decoded image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub atlas: AtlasId,
    pub col: u32,
    pub row: u32,
}

impl SpriteFrame {
    pub fn new(atlas: AtlasId, col: u32, row: u32) -> Self {
        Self { atlas, col, row }
    }
}
