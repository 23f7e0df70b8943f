use serde::{Deserialize, Serialize};

/// One step of the resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionRule {
    /// The video under the pointer most recently.
    Hovered,
    /// First video inside the card container last interacted with.
    FocusedContainer,
    /// First video that is currently playing.
    Playing,
    /// Visible video whose centre is closest to the viewport centre.
    Centered,
    /// First candidate with a source, in document order.
    First,
}

/// Ordered list of rules; the first rule that yields a candidate wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionPolicy {
    pub order: Vec<ResolutionRule>,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            order: vec![
                ResolutionRule::Hovered,
                ResolutionRule::FocusedContainer,
                ResolutionRule::Playing,
                ResolutionRule::Centered,
                ResolutionRule::First,
            ],
        }
    }
}

impl ResolutionPolicy {
    pub fn new(order: Vec<ResolutionRule>) -> Self {
        Self { order }
    }
}
