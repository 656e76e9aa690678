//! In-memory [`PartStore`] implementation for tests and embedding.
//!
//! Uses a `BTreeMap` keyed by id behind `std::sync::RwLock`, so iteration is
//! already in id order. Ids come from a monotonic counter and are never
//! handed out twice.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{NewPart, Part, PartUpdate};

use super::PartStore;

struct Inner {
    parts: BTreeMap<i64, Part>,
    next_id: i64,
}

/// In-memory part store.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                parts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> Error {
    Error::Internal(anyhow!("in-memory store lock poisoned"))
}

fn sku_taken(parts: &BTreeMap<i64, Part>, sku: &str, except: Option<i64>) -> bool {
    parts
        .values()
        .any(|p| p.sku == sku && Some(p.id) != except)
}

fn duplicate_sku(sku: &str) -> Error {
    Error::validation(format!("Part with SKU '{}' already exists.", sku))
}

#[async_trait]
impl PartStore for InMemoryStore {
    async fn insert(&self, part: NewPart) -> Result<Part> {
        part.validate()?;
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        if sku_taken(&inner.parts, &part.sku, None) {
            return Err(duplicate_sku(&part.sku));
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let stored = Part::from_new(id, part);
        inner.parts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> Result<Option<Part>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.parts.get(&id).cloned())
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Part>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .parts
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, update: PartUpdate) -> Result<Option<Part>> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        let mut part = match inner.parts.get(&id) {
            Some(p) => p.clone(),
            None => return Ok(None),
        };

        update.validate()?;
        part.apply(update);
        if sku_taken(&inner.parts, &part.sku, Some(id)) {
            return Err(duplicate_sku(&part.sku));
        }

        inner.parts.insert(id, part.clone());
        Ok(Some(part))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        match inner.parts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(id)),
        }
    }

    async fn descriptions(&self) -> Result<Vec<Option<String>>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .parts
            .values()
            .map(|p| p.description.clone())
            .collect())
    }
}
