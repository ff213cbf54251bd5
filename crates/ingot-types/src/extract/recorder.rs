//! Bookkeeping that survives across declarations during extraction.

use indexmap::IndexMap;
use ingot_manifest::TypeIndex;
use std::collections::HashMap;

use crate::decl::NodeId;

/// The type recorded for one binding site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableType {
    pub type_index: TypeIndex,
    /// False when the binding came straight from a primitive annotation.
    pub user_defined: bool,
}

/// Maps declarations and binding sites to the indices resolution assigned.
///
/// The declaration memo is what makes get-or-create terminate on recursive
/// shapes: a declaration is registered the moment its slot is reserved, so
/// any re-entrant resolution sees the index instead of recursing.
#[derive(Debug, Default)]
pub struct TypeRecorder {
    decl_types: HashMap<NodeId, TypeIndex>,
    variables: IndexMap<NodeId, VariableType>,
    anonymous_redirects: Vec<String>,
}

impl TypeRecorder {
    pub fn new() -> Self {
        TypeRecorder::default()
    }

    /// Memoizes the index resolved for a declaration node.
    pub fn register(&mut self, node: NodeId, index: TypeIndex) {
        self.decl_types.insert(node, index);
    }

    /// The memoized index for a declaration node, if resolution reached it.
    pub fn index_for(&self, node: NodeId) -> Option<TypeIndex> {
        self.decl_types.get(&node).copied()
    }

    /// Records the type observed at a binding site. A later write for the
    /// same site replaces the earlier one.
    pub fn bind(&mut self, site: NodeId, index: TypeIndex, user_defined: bool) {
        self.variables.insert(
            site,
            VariableType {
                type_index: index,
                user_defined,
            },
        );
    }

    pub fn binding_for(&self, site: NodeId) -> Option<VariableType> {
        self.variables.get(&site).copied()
    }

    pub fn bindings(&self) -> &IndexMap<NodeId, VariableType> {
        &self.variables
    }

    pub fn into_bindings(self) -> IndexMap<NodeId, VariableType> {
        self.variables
    }

    /// Queues a redirect string for an anonymous exported type. Order is
    /// preserved into the unit summary.
    pub fn add_anonymous_redirect(&mut self, redirect: impl Into<String>) {
        self.anonymous_redirects.push(redirect.into());
    }

    pub fn anonymous_redirects(&self) -> &[String] {
        &self.anonymous_redirects
    }
}
