use anyhow::{bail, Context, Result};
use culture_distance::{CulturalProfile, Participant};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// One roster line: an id plus a country, an inline profile, or both
///
/// An inline profile wins over the catalog entry for its country.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterEntry {
    pub id: String,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub profile: Option<CulturalProfile>,
}

/// Country name to published profile
pub type Catalog = BTreeMap<String, CulturalProfile>;

pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid roster JSON in {}", path.display()))
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid catalog JSON in {}", path.display()))
}

/// Turn roster entries into participants, looking countries up in `catalog`
///
/// Fails on the first duplicate id, unknown country, entry with nothing to
/// resolve, or score outside [0, 1].
pub fn resolve(entries: Vec<RosterEntry>, catalog: Option<&Catalog>) -> Result<Vec<Participant>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut participants = Vec::with_capacity(entries.len());

    for entry in entries {
        if !seen.insert(entry.id.clone()) {
            bail!("Duplicate participant id '{}' in roster", entry.id);
        }

        let profile = match (entry.profile, entry.country.as_deref()) {
            (Some(profile), _) => profile,
            (None, Some(country)) => catalog
                .and_then(|catalog| catalog.get(country))
                .cloned()
                .with_context(|| {
                    format!("Participant '{}': unknown country '{country}'", entry.id)
                })?,
            (None, None) => bail!("Participant '{}' has neither a country nor a profile", entry.id),
        };

        profile
            .check_scores()
            .with_context(|| format!("Participant '{}' has invalid scores", entry.id))?;
        participants.push(Participant::new(entry.id, profile));
    }

    log::debug!("Resolved {} participants from roster", participants.len());
    Ok(participants)
}
