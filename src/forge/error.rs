//! Forge error taxonomy
//!
//! Validation rejections only. A failed enhancement roll is not an error,
//! and neither is an unaffordable attempt; both are `UpgradeOutcome`
//! variants.

use thiserror::Error;

use crate::items::item::Rarity;

/// Validation errors raised by crafting and fusion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    #[error("crafting needs between {min} and {max} materials, got {got}")]
    MaterialCount { got: usize, min: usize, max: usize },

    #[error("'{0}' has no usable attributes and cannot be fused")]
    MissingAttributes(String),

    #[error("'{a}' and '{b}' occupy different slots and cannot be fused")]
    SlotMismatch { a: String, b: String },

    #[error("'{0}' is not a catalyst stone")]
    InvalidCatalyst(String),

    #[error("catalyst is {catalyst:?} grade but the inputs require {required:?} or above")]
    CatalystTooWeak { catalyst: Rarity, required: Rarity },
}
