//! The per-unit type table.

use ingot_core::Interner;
use ingot_manifest::{TypeIndex, TypeManifest};

use crate::descriptor::TypeDescriptor;

/// A raw slot in the type table.
///
/// Slots are dense from zero and strictly internal; anything that leaves the
/// table refers to a slot through its shifted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableSlot(u32);

impl TableSlot {
    /// Slot 0 belongs to the unit summary and is reserved at construction.
    pub const SUMMARY: TableSlot = TableSlot(0);

    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// The index this slot is visible under outside the table.
    pub fn shifted_index(self) -> TypeIndex {
        TypeIndex::user(self.0)
    }
}

/// Append-only collection of type descriptors for one compilation unit.
///
/// Self- and mutually-referential types are built in two steps: [`reserve`]
/// hands out a slot, and with it the index other descriptors may already
/// refer to, before the descriptor exists; [`commit`] fills the slot once
/// construction finishes. Committed slots are never rewritten.
///
/// [`reserve`]: TypeTable::reserve
/// [`commit`]: TypeTable::commit
#[derive(Debug)]
pub struct TypeTable {
    slots: Vec<TypeDescriptor>,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = TypeTable { slots: Vec::new() };
        let summary = table.reserve();
        debug_assert_eq!(summary, TableSlot::SUMMARY);
        table
    }

    /// Appends a placeholder and returns its slot.
    pub fn reserve(&mut self) -> TableSlot {
        let slot = TableSlot(self.slots.len() as u32);
        self.slots.push(TypeDescriptor::Placeholder);
        slot
    }

    /// Replaces the placeholder at `slot` with the finished descriptor.
    pub fn commit(&mut self, slot: TableSlot, descriptor: TypeDescriptor) {
        let entry = &mut self.slots[slot.0 as usize];
        debug_assert!(entry.is_placeholder(), "slot {} committed twice", slot.0);
        *entry = descriptor;
    }

    pub fn get(&self, slot: TableSlot) -> &TypeDescriptor {
        &self.slots[slot.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.slots.iter()
    }

    /// Classes committed so far. Instances and functions do not count.
    pub fn class_count(&self) -> u32 {
        self.slots
            .iter()
            .filter(|descriptor| matches!(descriptor, TypeDescriptor::Class(_)))
            .count() as u32
    }

    /// Serializes every slot, in slot order, into a manifest.
    pub fn serialize_all(&self, interner: &Interner) -> TypeManifest {
        let records = self
            .slots
            .iter()
            .map(|descriptor| descriptor.serialize(interner))
            .collect();
        TypeManifest::new(records)
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        TypeTable::new()
    }
}
