//! RON data loader
//!
//! Loads forge data from external RON files, with fallback to hardcoded
//! defaults.

use std::fs;
use std::path::Path;

use super::vocab::{default_name_vocab, NameVocab};

/// Manages external forge data
#[derive(Debug, Clone)]
pub struct ForgeData {
    /// Name vocabularies for the stat generator
    pub vocab: NameVocab,
}

impl ForgeData {
    /// Create a new ForgeData, loading from files or using defaults
    pub fn new() -> Self {
        Self {
            vocab: Self::load_vocab(Path::new("assets/data")),
        }
    }

    /// Load vocabulary from RON file
    fn load_vocab(base_path: &Path) -> NameVocab {
        let path = base_path.join("vocab.ron");
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match ron::from_str(&content) {
                    Ok(vocab) => return vocab,
                    Err(e) => log::warn!("Failed to parse vocab.ron: {}", e),
                },
                Err(e) => log::warn!("Failed to read vocab.ron: {}", e),
            }
        }
        default_name_vocab()
    }
}

impl Default for ForgeData {
    fn default() -> Self {
        Self {
            vocab: default_name_vocab(),
        }
    }
}

/// Export all default data to RON files for easy editing
pub fn export_default_data() -> Result<(), String> {
    let base_path = Path::new("assets/data");

    if !base_path.exists() {
        fs::create_dir_all(base_path)
            .map_err(|e| format!("Failed to create assets/data directory: {}", e))?;
    }

    let vocab = default_name_vocab();
    let vocab_ron = ron::ser::to_string_pretty(&vocab, ron::ser::PrettyConfig::default())
        .map_err(|e| format!("Failed to serialize vocab: {}", e))?;
    fs::write(base_path.join("vocab.ron"), vocab_ron)
        .map_err(|e| format!("Failed to write vocab.ron: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_default_data() {
        let result = export_default_data();
        assert!(result.is_ok(), "Failed to export: {:?}", result.err());
        assert!(Path::new("assets/data/vocab.ron").exists());
    }

    #[test]
    fn test_load_default_data() {
        let _ = export_default_data();
        let data = ForgeData::new();
        assert!(!data.vocab.weapon_nouns.is_empty());
    }
}
