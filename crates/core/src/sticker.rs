//! Sticker module - transient feedback entities
//!
//! Stickers carry no rules. They stay pooled while their presentation plays
//! and leave on the first tick it reports idle, so a headless sticker lives
//! for exactly one tick.

/// Banner text such as the intro countdown or the game-over reason
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageSticker {
    text: String,
}

impl MessageSticker {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Points earned by one bust group, anchored at the group's first tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreSticker {
    pub row: i32,
    pub col: i32,
    pub score: u64,
    /// Tiles destroyed by the group
    pub count: usize,
}
