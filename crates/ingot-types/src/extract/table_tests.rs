use super::*;

use ingot_core::Interner;
use ingot_manifest::{TypeIndex, TypeRecord};

use crate::descriptor::{ClassInstanceType, ClassType, TypeDescriptor, TypeSummary};

#[test]
fn summary_slot_is_reserved_at_construction() {
    let table = TypeTable::new();
    assert_eq!(table.len(), 1);
    assert!(table.get(TableSlot::SUMMARY).is_placeholder());
    assert_eq!(TableSlot::SUMMARY.shifted_index(), TypeIndex::user(0));
    assert_eq!(TableSlot::SUMMARY.shifted_index().as_i32(), 50);
}

#[test]
fn reserve_hands_out_dense_slots() {
    let mut table = TypeTable::new();
    let first = table.reserve();
    let second = table.reserve();

    assert_eq!(first.as_u32(), 1);
    assert_eq!(second.as_u32(), 2);
    assert_eq!(first.shifted_index(), TypeIndex::user(1));
    assert!(table.get(first).is_placeholder());
    assert!(table.get(second).is_placeholder());
}

#[test]
fn commit_fills_the_reserved_slot() {
    let mut table = TypeTable::new();
    let slot = table.reserve();
    table.commit(slot, TypeDescriptor::Class(ClassType::default()));

    assert!(matches!(table.get(slot), TypeDescriptor::Class(_)));
    assert!(table.get(TableSlot::SUMMARY).is_placeholder());
}

#[test]
fn class_count_ignores_instances() {
    let mut table = TypeTable::new();
    let class = table.reserve();
    table.commit(class, TypeDescriptor::Class(ClassType::default()));

    let instance = table.reserve();
    table.commit(
        instance,
        TypeDescriptor::ClassInstance(ClassInstanceType {
            class_index: class.shifted_index(),
        }),
    );
    assert_eq!(table.class_count(), 1);

    let second = table.reserve();
    table.commit(second, TypeDescriptor::Class(ClassType::default()));
    assert_eq!(table.class_count(), 2);
}

#[test]
fn serialize_all_keeps_slot_order() {
    let mut table = TypeTable::new();
    let class = table.reserve();
    table.commit(class, TypeDescriptor::Class(ClassType::default()));
    table.commit(
        TableSlot::SUMMARY,
        TypeDescriptor::Summary(TypeSummary {
            class_count: table.class_count(),
            redirects: Vec::new(),
        }),
    );

    let interner = Interner::new();
    let manifest = table.serialize_all(&interner);
    assert_eq!(manifest.record_count(), 2);

    let records = manifest.decode().unwrap();
    let TypeRecord::Summary(summary) = &records[0] else {
        panic!("slot 0 should hold the summary");
    };
    assert_eq!(summary.class_count, 1);
    assert!(matches!(records[1], TypeRecord::Class(_)));
}
