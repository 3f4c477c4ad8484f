//! Counted stock keyed by a catalog enum.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Error returned when removing stock that is not there.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("insufficient stock for {0}")]
    InsufficientStock(String),
}

/// Quantity per key. Absent keys count as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory<K> {
    stock: BTreeMap<K, u32>,
}

impl<K: Copy + Ord> Inventory<K> {
    pub fn new() -> Self {
        Self {
            stock: BTreeMap::new(),
        }
    }

    /// Overwrite the stock for `key`.
    pub fn put(&mut self, key: K, quantity: u32) {
        self.stock.insert(key, quantity);
    }

    pub fn add(&mut self, key: K) {
        *self.stock.entry(key).or_insert(0) += 1;
    }

    /// Remove one unit of `key`. Stock is untouched on failure.
    pub fn deduct(&mut self, key: K) -> Result<(), InventoryError>
    where
        K: fmt::Display,
    {
        match self.stock.get_mut(&key) {
            Some(quantity) if *quantity > 0 => {
                *quantity -= 1;
                Ok(())
            }
            _ => Err(InventoryError::InsufficientStock(key.to_string())),
        }
    }

    pub fn has_item(&self, key: K) -> bool {
        self.quantity(key) > 0
    }

    pub fn quantity(&self, key: K) -> u32 {
        self.stock.get(&key).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.stock.clear();
    }
}

impl<K: Copy + Ord> Default for Inventory<K> {
    fn default() -> Self {
        Self::new()
    }
}
