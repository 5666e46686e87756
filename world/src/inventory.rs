use bayou_core::{InventoryEntry, ItemKind};

/// Ordered multiset of stackable items; no entry ever holds zero units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    /// Adds units to an existing stack or appends a new one.
    pub(crate) fn add(&mut self, item: ItemKind, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.entries.iter_mut().find(|entry| entry.item == item) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.entries.push(InventoryEntry { item, quantity }),
        }
    }

    /// Reports whether at least `min_quantity` units are held.
    pub(crate) fn has(&self, item: ItemKind, min_quantity: u32) -> bool {
        self.count(item) >= min_quantity
    }

    pub(crate) fn count(&self, item: ItemKind) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.item == item)
            .map_or(0, |entry| entry.quantity)
    }

    /// Removes one unit; returns `false` without mutating when none is held.
    pub(crate) fn consume(&mut self, item: ItemKind) -> bool {
        if !self.has(item, 1) {
            return false;
        }
        if let Some(position) = self.entries.iter().position(|entry| entry.item == item) {
            if self.entries[position].quantity > 1 {
                self.entries[position].quantity -= 1;
            } else {
                let _ = self.entries.remove(position);
            }
        }
        true
    }

    pub(crate) fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }
}
