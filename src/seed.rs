//! Seed data loading from a `pdvs.json` document.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::coverage::normalize;
use crate::models::Partner;
use crate::store::PartnerStore;

/// Accepted seed layouts: a bare array or `{"pdvs": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedDocument {
    List(Vec<Value>),
    Wrapped { pdvs: Vec<Value> },
}

/// Outcome of seeding a store
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Parse partners from seed JSON, skipping entries that are not partner documents
pub fn parse_partners(content: &str) -> Result<(Vec<Partner>, usize)> {
    let document: SeedDocument =
        serde_json::from_str(content).context("Seed file is neither a partner list nor {\"pdvs\": [...]}")?;

    let entries = match document {
        SeedDocument::List(entries) => entries,
        SeedDocument::Wrapped { pdvs } => pdvs,
    };

    let mut partners = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Partner>(entry) {
            Ok(partner) => partners.push(partner),
            Err(e) => {
                warn!("Skipping seed entry {}: {}", i, e);
                skipped += 1;
            }
        }
    }

    Ok((partners, skipped))
}

/// Load partners from a seed file
pub fn load_partners<P: AsRef<Path>>(path: P) -> Result<(Vec<Partner>, usize)> {
    let path = path.as_ref();
    info!("Loading seed data from {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    parse_partners(&content)
}

/// Insert partners into a store. Partners with unusable coverage or a taken id are skipped.
pub fn seed_store(store: &dyn PartnerStore, partners: Vec<Partner>) -> SeedReport {
    let mut report = SeedReport::default();

    for partner in partners {
        if let Err(e) = normalize(&partner.coverage_area) {
            warn!("Skipping partner {}: {}", partner.id, e);
            report.skipped += 1;
            continue;
        }

        match store.insert(partner) {
            Ok(_) => report.inserted += 1,
            Err(e) => {
                warn!("Skipping seed partner: {}", e);
                report.skipped += 1;
            }
        }
    }

    info!(
        "Seeded {} partners ({} skipped)",
        report.inserted, report.skipped
    );
    report
}

/// Load a seed file straight into a store
pub fn seed_from_file<P: AsRef<Path>>(store: &dyn PartnerStore, path: P) -> Result<SeedReport> {
    let (partners, unparsed) = load_partners(path)?;
    let mut report = seed_store(store, partners);
    report.skipped += unparsed;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::io::Write;

    fn partner_json(id: &str, coverage_type: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "tradingName": "Bar {id}",
                "ownerName": "Maria",
                "document": "{id}/0001",
                "coverageArea": {{"type": "{coverage_type}", "coordinates": [[[[0, 0], [0, 2], [2, 2], [2, 0], [0, 0]]]]}},
                "address": {{"type": "Point", "coordinates": [1, 1]}}
            }}"#
        )
    }

    #[test]
    fn test_parse_bare_list() {
        let content = format!("[{}, {}]", partner_json("1", "MultiPolygon"), partner_json("2", "MultiPolygon"));
        let (partners, skipped) = parse_partners(&content).unwrap();
        assert_eq!(partners.len(), 2);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_parse_wrapped_document() {
        let content = format!(r#"{{"pdvs": [{}]}}"#, partner_json("1", "MultiPolygon"));
        let (partners, _) = parse_partners(&content).unwrap();
        assert_eq!(partners[0].id, "1");
    }

    #[test]
    fn test_parse_skips_non_partner_entries() {
        let content = format!(r#"[{}, {{"id": "2"}}]"#, partner_json("1", "MultiPolygon"));
        let (partners, skipped) = parse_partners(&content).unwrap();
        assert_eq!(partners.len(), 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_parse_rejects_unknown_layout() {
        assert!(parse_partners(r#"{"partners": []}"#).is_err());
        assert!(parse_partners("not json").is_err());
    }

    #[test]
    fn test_seed_skips_bad_coverage_and_duplicates() {
        let content = format!(
            "[{}, {}, {}]",
            partner_json("1", "MultiPolygon"),
            partner_json("1", "MultiPolygon"),
            partner_json("2", "Circle")
        );
        let (partners, _) = parse_partners(&content).unwrap();

        let store = MemoryStore::new();
        let report = seed_store(&store, partners);
        assert_eq!(report, SeedReport { inserted: 1, skipped: 2 });
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_seed_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pdvs": [{}, {{}}]}}"#, partner_json("7", "MultiPolygon")).unwrap();

        let store = MemoryStore::new();
        let report = seed_from_file(&store, file.path()).unwrap();
        assert_eq!(report, SeedReport { inserted: 1, skipped: 1 });
        assert!(store.find_by_id("7").is_ok());
    }

    #[test]
    fn test_bundled_seed_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/pdvs.json");
        let store = MemoryStore::new();
        let report = seed_from_file(&store, path).unwrap();
        assert_eq!(report, SeedReport { inserted: 2, skipped: 0 });

        let partner = store.find_by_id("2").unwrap();
        let address = geo::Point::new(partner.address.lon(), partner.address.lat());
        assert_eq!(crate::coverage::check_point(&partner.coverage_area, address), Ok(true));
    }

    #[test]
    fn test_missing_seed_file() {
        let store = MemoryStore::new();
        assert!(seed_from_file(&store, "/definitely/not/here/pdvs.json").is_err());
    }
}
