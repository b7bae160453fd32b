//! # Cart Store
//!
//! Contract between the catalog and whatever holds the shopper's cart. The
//! catalog only adds and removes lines; pricing and checkout live elsewhere.
//! A [`ScratchCartStore`] keeps lines locally until the cart is promoted to a
//! durable store, at which point [`merge_cart_lines`] reconciles both sides.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::{CartError, CartResult},
    types::catalog_item::ItemId,
};

/// One item in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog item.
    pub item_id:    ItemId,
    /// Quantity, at least one.
    pub quantity:   u32,
    /// Last time the line was written.
    pub updated_at: DateTime<Utc>,
}

impl CartLine {
    #[must_use]
    pub fn new(item_id: ItemId, quantity: u32, updated_at: DateTime<Utc>) -> Self {
        Self { item_id, quantity, updated_at }
    }
}

/// Storage for cart lines, keyed by item id.
pub trait CartStore {
    /// All lines, in insertion order.
    ///
    /// # Errors
    /// Returns `CartError::StoreUnavailable` if the store cannot be read.
    fn lines(&self) -> CartResult<Vec<CartLine>>;

    /// Inserts the line or overwrites the line with the same item id.
    ///
    /// # Errors
    /// Returns `CartError::InvalidQuantity` for a zero quantity.
    fn upsert(&self, line: CartLine) -> CartResult<()>;

    /// Removes the line for `item_id`.
    ///
    /// # Errors
    /// Returns `CartError::ItemNotInCart` if there is no such line.
    fn remove(&self, item_id: &ItemId) -> CartResult<()>;

    /// Removes every line.
    ///
    /// # Errors
    /// Returns `CartError::StoreUnavailable` if the store cannot be written.
    fn clear(&self) -> CartResult<()>;
}

// ============================================================================
// SCRATCH STORE
// ============================================================================

/// In-memory cart used before a durable store is available.
#[derive(Debug, Clone, Default)]
pub struct ScratchCartStore {
    lines: Arc<Mutex<Vec<CartLine>>>,
}

impl ScratchCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the scratch lines into `remote`, then empties the scratch cart.
    ///
    /// Returns the merged lines as written to `remote`. Remote lines are only
    /// ever overwritten, never removed, and the scratch cart is emptied only
    /// after every write succeeded, so a failed promotion can be retried.
    ///
    /// # Errors
    /// Returns error if either store fails.
    pub fn promote_into<S: CartStore + ?Sized>(&self, remote: &S) -> CartResult<Vec<CartLine>> {
        let remote_lines = remote.lines()?;
        let merged = merge_cart_lines(&self.lines()?, &remote_lines);
        for line in merged.iter().filter(|line| !remote_lines.contains(line)) {
            remote.upsert(line.clone())?;
        }
        self.clear()?;
        debug!(lines = merged.len(), "cart_promoted");
        Ok(merged)
    }
}

impl CartStore for ScratchCartStore {
    fn lines(&self) -> CartResult<Vec<CartLine>> {
        let lines = self.lines.lock().map_err(|_| lock_error())?;
        Ok(lines.clone())
    }

    fn upsert(&self, line: CartLine) -> CartResult<()> {
        if line.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let mut lines = self.lines.lock().map_err(|_| lock_error())?;
        if let Some(existing) = lines.iter_mut().find(|l| l.item_id == line.item_id) {
            *existing = line;
        } else {
            lines.push(line);
        }
        Ok(())
    }

    fn remove(&self, item_id: &ItemId) -> CartResult<()> {
        let mut lines = self.lines.lock().map_err(|_| lock_error())?;
        let pos = lines
            .iter()
            .position(|l| &l.item_id == item_id)
            .ok_or_else(|| CartError::ItemNotInCart(item_id.to_string()))?;
        lines.remove(pos);
        Ok(())
    }

    fn clear(&self) -> CartResult<()> {
        let mut lines = self.lines.lock().map_err(|_| lock_error())?;
        lines.clear();
        Ok(())
    }
}

fn lock_error() -> CartError {
    CartError::StoreUnavailable("cart lock poisoned".to_string())
}

/// Merges two carts by item id.
///
/// Remote order is kept; local-only lines are appended in local order. When
/// both sides hold the same item the more recently updated line wins, and the
/// remote line wins a tie.
#[must_use]
pub fn merge_cart_lines(local: &[CartLine], remote: &[CartLine]) -> Vec<CartLine> {
    let mut merged = remote.to_vec();
    for line in local {
        if let Some(existing) = merged.iter_mut().find(|l| l.item_id == line.item_id) {
            if line.updated_at > existing.updated_at {
                *existing = line.clone();
            }
        } else {
            merged.push(line.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests;
