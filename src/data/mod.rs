//! External forge data

pub mod loader;
pub mod vocab;

pub use loader::{export_default_data, ForgeData};
pub use vocab::{default_name_vocab, ArmorNouns, NameVocab, RarityWords};
