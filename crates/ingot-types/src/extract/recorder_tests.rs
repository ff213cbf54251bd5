use super::*;

use ingot_manifest::{PrimitiveType, TypeIndex};

use crate::decl::NodeId;

#[test]
fn registers_and_recalls_declaration_indices() {
    let mut recorder = TypeRecorder::new();
    let node = NodeId::from_raw(3);

    assert_eq!(recorder.index_for(node), None);
    recorder.register(node, TypeIndex::user(1));
    assert_eq!(recorder.index_for(node), Some(TypeIndex::user(1)));
}

#[test]
fn binding_rewrites_keep_first_insertion_order() {
    let mut recorder = TypeRecorder::new();
    let a = NodeId::from_raw(0);
    let b = NodeId::from_raw(1);

    recorder.bind(a, TypeIndex::primitive(PrimitiveType::Number), false);
    recorder.bind(b, TypeIndex::user(2), true);
    recorder.bind(a, TypeIndex::user(3), true);

    let sites: Vec<NodeId> = recorder.bindings().keys().copied().collect();
    assert_eq!(sites, [a, b]);

    let rebound = recorder.binding_for(a).unwrap();
    assert_eq!(rebound.type_index, TypeIndex::user(3));
    assert!(rebound.user_defined);
}

#[test]
fn unresolved_bindings_are_recorded() {
    let mut recorder = TypeRecorder::new();
    let site = NodeId::from_raw(9);
    recorder.bind(site, TypeIndex::UNRESOLVED, true);

    let binding = recorder.binding_for(site).unwrap();
    assert!(binding.type_index.is_unresolved());
    assert!(binding.user_defined);
}

#[test]
fn redirects_keep_registration_order() {
    let mut recorder = TypeRecorder::new();
    recorder.add_anonymous_redirect("#1#./unit");
    recorder.add_anonymous_redirect(String::from("#2#./unit"));

    assert_eq!(recorder.anonymous_redirects(), ["#1#./unit", "#2#./unit"]);
}
