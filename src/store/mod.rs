//! Partner persistence.
//!
//! The HTTP layer talks to storage only through [`PartnerStore`]; the
//! coverage code never sees it.

use hashbrown::HashMap;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::models::Partner;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Partner {0} not found")]
    NotFound(String),

    #[error("Partner {0} already exists")]
    AlreadyExists(String),
}

/// Storage collaborator for partner documents
pub trait PartnerStore: Send + Sync {
    /// Fetch a snapshot of one partner
    fn find_by_id(&self, id: &str) -> Result<Partner, StoreError>;

    /// List partners in insertion order
    fn list(&self, skip: usize, limit: usize) -> Vec<Partner>;

    fn insert(&self, partner: Partner) -> Result<Partner, StoreError>;

    /// Replace an existing partner. The stored id is always `id`.
    fn update(&self, id: &str, partner: Partner) -> Result<Partner, StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;

    fn count(&self) -> usize;
}

#[derive(Default)]
struct Inner {
    partners: Vec<Partner>,
    by_id: HashMap<String, usize>,
}

impl Inner {
    fn reindex(&mut self) {
        self.by_id = self
            .partners
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
    }
}

/// In-memory partner store
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PartnerStore for MemoryStore {
    fn find_by_id(&self, id: &str) -> Result<Partner, StoreError> {
        let inner = self.inner.read();
        inner
            .by_id
            .get(id)
            .map(|&i| inner.partners[i].clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self, skip: usize, limit: usize) -> Vec<Partner> {
        self.inner
            .read()
            .partners
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    fn insert(&self, partner: Partner) -> Result<Partner, StoreError> {
        let mut inner = self.inner.write();
        if inner.by_id.contains_key(&partner.id) {
            return Err(StoreError::AlreadyExists(partner.id));
        }

        debug!("Inserting partner {}", partner.id);
        let position = inner.partners.len();
        inner.by_id.insert(partner.id.clone(), position);
        inner.partners.push(partner.clone());
        Ok(partner)
    }

    fn update(&self, id: &str, mut partner: Partner) -> Result<Partner, StoreError> {
        let mut inner = self.inner.write();
        let position = *inner
            .by_id
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        debug!("Updating partner {}", id);
        partner.id = id.to_string();
        inner.partners[position] = partner.clone();
        Ok(partner)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let position = inner
            .by_id
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        debug!("Deleting partner {}", id);
        inner.partners.remove(position);
        inner.reindex();
        Ok(())
    }

    fn count(&self) -> usize {
        self.inner.read().partners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddressPoint, CoverageArea};

    fn partner(id: &str) -> Partner {
        Partner {
            id: id.to_string(),
            trading_name: format!("Adega {}", id),
            owner_name: "Zé".to_string(),
            document: format!("{}/0001", id),
            coverage_area: CoverageArea::polygon(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]),
            address: AddressPoint::new(0.5, 0.5),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let store = MemoryStore::new();
        store.insert(partner("1")).unwrap();
        assert_eq!(store.find_by_id("1").unwrap().trading_name, "Adega 1");
        assert_eq!(
            store.find_by_id("2"),
            Err(StoreError::NotFound("2".into()))
        );
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let store = MemoryStore::new();
        store.insert(partner("1")).unwrap();
        assert_eq!(
            store.insert(partner("1")),
            Err(StoreError::AlreadyExists("1".into()))
        );
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_list_pagination_keeps_insertion_order() {
        let store = MemoryStore::new();
        for id in ["3", "1", "2", "10"] {
            store.insert(partner(id)).unwrap();
        }
        let ids: Vec<String> = store.list(1, 2).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(store.list(10, 5).is_empty());
    }

    #[test]
    fn test_update_keeps_path_id() {
        let store = MemoryStore::new();
        store.insert(partner("1")).unwrap();

        let mut changed = partner("99");
        changed.trading_name = "Renamed".to_string();
        let updated = store.update("1", changed).unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(store.find_by_id("1").unwrap().trading_name, "Renamed");
        assert!(store.find_by_id("99").is_err());
        assert!(store.update("7", partner("7")).is_err());
    }

    #[test]
    fn test_delete_reindexes() {
        let store = MemoryStore::new();
        for id in ["1", "2", "3"] {
            store.insert(partner(id)).unwrap();
        }
        store.delete("1").unwrap();
        assert_eq!(store.find_by_id("3").unwrap().id, "3");
        assert_eq!(store.count(), 2);
        assert_eq!(store.delete("1"), Err(StoreError::NotFound("1".into())));
    }
}
