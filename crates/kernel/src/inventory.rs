use liminal_assets::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const INVENTORY_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory full ({0} items)")]
    Full(usize),
    #[error("inventory empty")]
    Empty,
    #[error("item not held")]
    NotHeld,
}

/// Ordered item list, oldest first. Never holds more than its capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: VecDeque<ItemId>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append at the tail. Returns the new length.
    pub fn push(&mut self, item: ItemId) -> Result<usize, InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full(self.capacity));
        }
        self.items.push_back(item);
        Ok(self.items.len())
    }

    pub fn drop_oldest(&mut self) -> Result<ItemId, InventoryError> {
        self.items.pop_front().ok_or(InventoryError::Empty)
    }

    /// Remove the oldest copy of `item`.
    pub fn remove_first(&mut self, item: ItemId) -> Result<ItemId, InventoryError> {
        let index = self
            .items
            .iter()
            .position(|held| *held == item)
            .ok_or(InventoryError::NotHeld)?;
        self.items.remove(index).ok_or(InventoryError::NotHeld)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ItemId = ItemId(0);
    const B: ItemId = ItemId(1);
    const C: ItemId = ItemId(2);

    #[test]
    fn push_until_full() {
        let mut inv = Inventory::new();
        for n in 1..=INVENTORY_CAPACITY {
            assert_eq!(inv.push(A), Ok(n));
        }
        assert!(inv.is_full());
        let before: Vec<ItemId> = inv.iter().collect();
        assert_eq!(inv.push(B), Err(InventoryError::Full(5)));
        assert_eq!(inv.len(), 5);
        assert_eq!(inv.iter().collect::<Vec<_>>(), before);
    }

    #[test]
    fn drop_is_fifo() {
        let mut inv = Inventory::new();
        for item in [A, B, C] {
            inv.push(item).expect("room");
        }
        assert_eq!(inv.drop_oldest(), Ok(A));
        assert_eq!(inv.drop_oldest(), Ok(B));
        assert_eq!(inv.drop_oldest(), Ok(C));
        assert_eq!(inv.drop_oldest(), Err(InventoryError::Empty));
    }

    #[test]
    fn remove_first_takes_the_oldest_copy() {
        let mut inv = Inventory::new();
        for item in [B, A, B, C] {
            inv.push(item).expect("room");
        }
        assert_eq!(inv.remove_first(B), Ok(B));
        assert_eq!(inv.iter().collect::<Vec<_>>(), vec![A, B, C]);
        assert_eq!(inv.remove_first(ItemId(9)), Err(InventoryError::NotHeld));
    }
}
