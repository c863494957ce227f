//! Damage presentation catalog: maps each damage level to the label, styling,
//! and recommendations the results view renders.
//!
//! The compiled-in entries are the product copy. Deployments can replace
//! individual entries through a TOML file, so wording changes never require a
//! rebuild.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::DamageLevel;

/// Presentation data for one damage level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DamagePresentation {
    pub label: String,
    /// Badge color as a `#RRGGBB` hex string.
    pub color: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub recommendations: [String; 4],
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("catalog file '{path}' overrides unrecognized damage level '{level}'")]
    UnknownLevel { path: PathBuf, level: String },
}

/// Lookup table from damage level to presentation. `lookup` never fails: any
/// level without its own entry renders with the `unknown` presentation.
#[derive(Debug, Clone)]
pub struct PresentationCatalog {
    entries: HashMap<DamageLevel, DamagePresentation>,
    unknown: DamagePresentation,
}

impl PresentationCatalog {
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            DamageLevel::Minor,
            entry(
                "Minor Damage",
                "#45B7D1",
                "🛠",
                "Minor Damage Detected",
                "The vehicle shows signs of minor cosmetic damage that can typically be repaired with basic bodywork and paint touch-up.",
                [
                    "Schedule a professional inspection to assess repair costs",
                    "Consider cosmetic touch-up services",
                    "Document the damage with photos for insurance",
                    "Check for any underlying issues beneath the surface damage",
                ],
            ),
        );
        entries.insert(
            DamageLevel::Moderate,
            entry(
                "Moderate Damage",
                "#FFA07A",
                "🔧",
                "Moderate Damage Detected",
                "The vehicle has moderate structural damage that may require panel replacement and professional repair services.",
                [
                    "Contact your insurance provider immediately",
                    "Get multiple repair quotes from certified body shops",
                    "Consider rental reimbursement if vehicle is undrivable",
                    "Document all communications with repair facilities",
                ],
            ),
        );
        entries.insert(
            DamageLevel::Severe,
            entry(
                "Severe Damage",
                "#FF6B6B",
                "⚠",
                "Severe Damage Detected",
                "The vehicle has significant structural damage that will require extensive repairs and should be inspected by a professional mechanic.",
                [
                    "Do not drive the vehicle until inspected by a professional",
                    "Contact your insurance provider for total loss assessment",
                    "Consider salvage value if repairs exceed vehicle worth",
                    "Consult with multiple repair specialists for comprehensive estimates",
                ],
            ),
        );
        entries.insert(
            DamageLevel::ModelError,
            entry(
                "Edge Analysis",
                "#9F7AEA",
                "🧠",
                "Edge-Based Assessment",
                "AI model unavailable. Analysis performed using edge detection methods. Results may be less accurate.",
                [
                    "Results are based on basic image analysis",
                    "Consider professional inspection for accurate assessment",
                    "AI model may be temporarily unavailable",
                    "Try uploading a different image with better lighting",
                ],
            ),
        );
        let unknown = entry(
            "Unknown",
            "#A0AEC0",
            "❓",
            "Unable to Determine",
            "Could not determine the damage level from the provided image. Please try with a clearer image of the damaged area.",
            [
                "Try uploading a clearer image of the damage",
                "Ensure the damaged area is well-lit and in focus",
                "Include multiple angles if possible",
                "Consider professional assessment if unsure",
            ],
        );
        entries.insert(DamageLevel::Unknown, unknown.clone());

        Self { entries, unknown }
    }

    pub fn lookup(&self, level: DamageLevel) -> &DamagePresentation {
        self.entries.get(&level).unwrap_or(&self.unknown)
    }

    /// Replaces entries with the ones defined in `path`. Each top-level table
    /// must be keyed by a wire-name damage level and carry a complete entry.
    pub fn with_overrides_file(mut self, path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: HashMap<String, DamagePresentation> =
            toml::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        for (key, presentation) in overrides {
            let Some(level) = strict_level(&key) else {
                return Err(CatalogError::UnknownLevel {
                    path: path.to_path_buf(),
                    level: key,
                });
            };
            if level == DamageLevel::Unknown {
                self.unknown = presentation.clone();
            }
            self.entries.insert(level, presentation);
        }
        Ok(self)
    }
}

// Deliberately not `DamageLevel::from`: lenient parsing would turn a typo in
// an override file into a silent replacement of the `unknown` entry.
fn strict_level(key: &str) -> Option<DamageLevel> {
    match key {
        "minor" => Some(DamageLevel::Minor),
        "moderate" => Some(DamageLevel::Moderate),
        "severe" => Some(DamageLevel::Severe),
        "model_error" => Some(DamageLevel::ModelError),
        "unknown" => Some(DamageLevel::Unknown),
        _ => None,
    }
}

fn entry(
    label: &str,
    color: &str,
    icon: &str,
    title: &str,
    description: &str,
    recommendations: [&str; 4],
) -> DamagePresentation {
    DamagePresentation {
        label: label.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        recommendations: recommendations.map(str::to_string),
    }
}

/// Loads the catalog for the app: compiled-in defaults, then overrides from
/// `explicit` if given, else the `ASSESS_CATALOG` env var, else a
/// `catalog.toml` sitting beside the binary.
pub fn load_catalog(explicit: Option<&Path>) -> Result<PresentationCatalog, CatalogError> {
    let catalog = PresentationCatalog::builtin();
    match resolve_catalog_path(explicit) {
        Some(path) => catalog.with_overrides_file(&path),
        None => Ok(catalog),
    }
}

fn resolve_catalog_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(value) = std::env::var("ASSESS_CATALOG") {
        if !value.trim().is_empty() {
            return Some(PathBuf::from(value));
        }
    }
    let beside_binary = std::env::current_exe().ok()?.parent()?.join("catalog.toml");
    beside_binary.exists().then_some(beside_binary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_level() {
        let catalog = PresentationCatalog::builtin();
        assert_eq!(catalog.lookup(DamageLevel::Minor).label, "Minor Damage");
        assert_eq!(
            catalog.lookup(DamageLevel::Moderate).label,
            "Moderate Damage"
        );
        assert_eq!(catalog.lookup(DamageLevel::Severe).label, "Severe Damage");
        assert_eq!(
            catalog.lookup(DamageLevel::ModelError).label,
            "Edge Analysis"
        );
        assert_eq!(catalog.lookup(DamageLevel::Unknown).label, "Unknown");
    }

    #[test]
    fn severe_entry_carries_the_four_product_recommendations() {
        let catalog = PresentationCatalog::builtin();
        let severe = catalog.lookup(DamageLevel::Severe);
        assert_eq!(severe.color, "#FF6B6B");
        assert_eq!(
            severe.recommendations,
            [
                "Do not drive the vehicle until inspected by a professional".to_string(),
                "Contact your insurance provider for total loss assessment".to_string(),
                "Consider salvage value if repairs exceed vehicle worth".to_string(),
                "Consult with multiple repair specialists for comprehensive estimates".to_string(),
            ]
        );
    }

    #[test]
    fn overrides_file_replaces_named_entries_only() {
        let dir = std::env::temp_dir().join("catalog_override_replaces");
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("catalog.toml");
        fs::write(
            &path,
            r##"
[severe]
label = "Totaled"
color = "#000000"
icon = "!"
title = "Write-Off"
description = "Beyond economical repair."
recommendations = ["a", "b", "c", "d"]
"##,
        )
        .expect("write override");

        let catalog = PresentationCatalog::builtin()
            .with_overrides_file(&path)
            .expect("override");
        assert_eq!(catalog.lookup(DamageLevel::Severe).label, "Totaled");
        assert_eq!(catalog.lookup(DamageLevel::Minor).label, "Minor Damage");
    }

    #[test]
    fn overrides_file_with_unrecognized_level_is_a_typed_error() {
        let dir = std::env::temp_dir().join("catalog_override_unknown_level");
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("catalog.toml");
        fs::write(
            &path,
            r##"
[sever]
label = "x"
color = "#000000"
icon = "!"
title = "x"
description = "x"
recommendations = ["a", "b", "c", "d"]
"##,
        )
        .expect("write override");

        let err = PresentationCatalog::builtin()
            .with_overrides_file(&path)
            .expect_err("must reject typo'd level");
        assert!(matches!(err, CatalogError::UnknownLevel { level, .. } if level == "sever"));
    }

    #[test]
    fn missing_overrides_file_is_a_read_error() {
        let err = PresentationCatalog::builtin()
            .with_overrides_file(Path::new("/definitely/not/here/catalog.toml"))
            .expect_err("must fail");
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn unknown_fallback_tracks_an_overridden_unknown_entry() {
        let dir = std::env::temp_dir().join("catalog_override_unknown_entry");
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("catalog.toml");
        fs::write(
            &path,
            r##"
[unknown]
label = "Indeterminate"
color = "#111111"
icon = "?"
title = "Indeterminate"
description = "No call."
recommendations = ["a", "b", "c", "d"]
"##,
        )
        .expect("write override");

        let catalog = PresentationCatalog::builtin()
            .with_overrides_file(&path)
            .expect("override");
        assert_eq!(catalog.lookup(DamageLevel::Unknown).label, "Indeterminate");
    }
}
