//! Declaration model for a single compilation unit.
//!
//! The front end hands type extraction a flat list of top-level declarations
//! plus the variable statements that reference them, serialized as JSON. This
//! module owns that wire shape and the identifier indexes built on top of it.
//!
//! Node ids are assigned here, in declaration order, when a [`Program`] is
//! constructed. They identify binding sites (variables, parameters, class
//! members) across the extraction pass and in its output.

use indexmap::IndexMap;
use ingot_core::Span;
use ingot_manifest::PrimitiveType;
use serde::{Deserialize, Deserializer};

/// Identifies a syntax node that can carry a type binding.
///
/// Ids are dense and unique within one [`Program`]. The `Default` value is
/// [`NodeId::INVALID`] so that freshly deserialized declarations are visibly
/// unassigned until [`Program::new`] walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    pub fn from_raw(index: u32) -> Self {
        NodeId(index)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::INVALID
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Index of a top-level declaration within its [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(u32);

impl DeclId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
    Class(ClassDecl),
    Function(FunctionDecl),
    Interface(InterfaceDecl),
    Import(ImportDecl),
}

impl Decl {
    /// The name this declaration is looked up under, if it has one.
    ///
    /// Imports answer with their local alias, which is the identifier the
    /// rest of the unit refers to.
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Class(class) => Some(&class.name),
            Decl::Function(function) => function.name.as_deref(),
            Decl::Interface(interface) => Some(&interface.name),
            Decl::Import(import) => Some(&import.local),
        }
    }

    pub fn node(&self) -> NodeId {
        match self {
            Decl::Class(class) => class.node,
            Decl::Function(function) => function.node,
            Decl::Interface(interface) => interface.node,
            Decl::Import(import) => import.node,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Class(class) => class.span,
            Decl::Function(function) => function.span,
            Decl::Interface(interface) => interface.span,
            Decl::Import(import) => import.span,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassDecl {
    #[serde(skip)]
    pub node: NodeId,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Names of extended and implemented types, in source order.
    #[serde(default)]
    pub heritage: Vec<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub span: Span,
}

/// A class body member.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Property(PropertyDecl),
    Method(FunctionDecl),
}

/// A function declaration or a method member.
///
/// Constructors arrive without a name; extraction synthesizes one.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionDecl {
    #[serde(skip)]
    pub node: NodeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub return_type: Option<TypeAnnotation>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParamDecl {
    #[serde(skip)]
    pub node: NodeId,
    pub name: String,
    #[serde(default)]
    pub annotation: Option<TypeAnnotation>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDecl {
    #[serde(skip)]
    pub node: NodeId,
    pub name: PropertyName,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub annotation: Option<TypeAnnotation>,
    #[serde(default)]
    pub initializer: Option<Initializer>,
    #[serde(default)]
    pub span: Span,
}

/// How a class member is named in source.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyName {
    Ident { text: String },
    StringLit { text: String },
    NumberLit { text: String },
    Computed,
    Private { text: String },
}

/// A type annotation as written in source.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeAnnotation {
    Primitive {
        #[serde(deserialize_with = "deserialize_primitive")]
        primitive: PrimitiveType,
    },
    Named {
        name: String,
    },
}

/// The shape of an initializer expression, reduced to what extraction
/// distinguishes.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Initializer {
    /// `new Callee(...)`.
    New { callee: String },
    /// `{ ... }`.
    ObjectLiteral,
    /// Anything else.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Export,
    Declare,
    Abstract,
    Static,
    Public,
    Private,
    Protected,
    Readonly,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceDecl {
    #[serde(skip)]
    pub node: NodeId,
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

/// `import { imported as local } from "module"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportDecl {
    #[serde(skip)]
    pub node: NodeId,
    /// Identifier the importing unit uses.
    pub local: String,
    /// Name the symbol is exported under in its defining module.
    pub imported: String,
    /// Module specifier as written.
    pub module: String,
    #[serde(default)]
    pub span: Span,
}

/// A variable statement that may carry a type annotation or an initializer
/// extraction cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct VarDecl {
    #[serde(skip)]
    pub node: NodeId,
    pub name: String,
    #[serde(default)]
    pub annotation: Option<TypeAnnotation>,
    #[serde(default)]
    pub initializer: Option<Initializer>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Deserialize)]
struct RawProgram {
    #[serde(default)]
    decls: Vec<Decl>,
    #[serde(default)]
    vars: Vec<VarDecl>,
}

/// One compilation unit's declarations, with node ids assigned and a
/// name-to-declaration index built.
///
/// The name index keeps the last declaration under each name, so a
/// redeclaration shadows earlier ones the way later writes win in scope
/// resolution.
#[derive(Debug, Clone)]
pub struct Program {
    decls: Vec<Decl>,
    vars: Vec<VarDecl>,
    by_name: IndexMap<String, DeclId>,
}

impl Program {
    pub fn new(decls: Vec<Decl>, vars: Vec<VarDecl>) -> Self {
        let mut program = Program {
            decls,
            vars,
            by_name: IndexMap::new(),
        };
        program.assign_node_ids();
        program.index_names();
        program
    }

    /// Parses the front end's JSON form of a unit.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawProgram = serde_json::from_str(json)?;
        Ok(Program::new(raw.decls, raw.vars))
    }

    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    pub fn vars(&self) -> &[VarDecl] {
        &self.vars
    }

    /// Looks up the declaration a name resolves to, if any.
    pub fn decl_for(&self, name: &str) -> Option<DeclId> {
        self.by_name.get(name).copied()
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.0 as usize]
    }

    fn assign_node_ids(&mut self) {
        let mut next = 0u32;
        for decl in &mut self.decls {
            match decl {
                Decl::Class(class) => {
                    class.node = next_node(&mut next);
                    for member in &mut class.members {
                        match member {
                            Member::Property(property) => {
                                property.node = next_node(&mut next);
                            }
                            Member::Method(method) => assign_function_ids(method, &mut next),
                        }
                    }
                }
                Decl::Function(function) => assign_function_ids(function, &mut next),
                Decl::Interface(interface) => interface.node = next_node(&mut next),
                Decl::Import(import) => import.node = next_node(&mut next),
            }
        }
        for var in &mut self.vars {
            var.node = next_node(&mut next);
        }
    }

    fn index_names(&mut self) {
        for (i, decl) in self.decls.iter().enumerate() {
            if let Some(name) = decl.name() {
                self.by_name.insert(name.to_owned(), DeclId(i as u32));
            }
        }
    }
}

fn assign_function_ids(function: &mut FunctionDecl, next: &mut u32) {
    function.node = next_node(next);
    for param in &mut function.params {
        param.node = next_node(next);
    }
}

fn next_node(next: &mut u32) -> NodeId {
    let id = NodeId(*next);
    *next += 1;
    id
}

/// Maps an annotation keyword to its primitive type, if it names one.
pub fn parse_primitive(keyword: &str) -> Option<PrimitiveType> {
    let primitive = match keyword {
        "any" => PrimitiveType::Any,
        "number" => PrimitiveType::Number,
        "boolean" => PrimitiveType::Boolean,
        "string" => PrimitiveType::String,
        "symbol" => PrimitiveType::Symbol,
        "null" => PrimitiveType::Null,
        "undefined" => PrimitiveType::Undefined,
        _ => return None,
    };
    Some(primitive)
}

fn deserialize_primitive<'de, D>(deserializer: D) -> Result<PrimitiveType, D::Error>
where
    D: Deserializer<'de>,
{
    let keyword = String::deserialize(deserializer)?;
    parse_primitive(&keyword).ok_or_else(|| {
        serde::de::Error::custom(format_args!("unknown primitive type keyword `{keyword}`"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE_JSON: &str = indoc! {r#"
        {
          "decls": [
            {
              "kind": "class",
              "name": "Circle",
              "modifiers": ["export"],
              "heritage": ["Shape"],
              "members": [
                {
                  "kind": "property",
                  "name": { "kind": "ident", "text": "radius" },
                  "annotation": { "kind": "primitive", "primitive": "number" },
                  "span": { "start": 40, "end": 54 }
                },
                {
                  "kind": "method",
                  "name": "area",
                  "params": [],
                  "return_type": { "kind": "primitive", "primitive": "number" }
                }
              ],
              "span": { "start": 0, "end": 90 }
            },
            { "kind": "import", "local": "Shape", "imported": "Shape", "module": "./shape" }
          ],
          "vars": [
            {
              "name": "unit",
              "initializer": { "kind": "new", "callee": "Circle" },
              "span": { "start": 92, "end": 115 }
            }
          ]
        }
    "#};

    #[test]
    fn parses_sample_unit() {
        let program = Program::parse(SAMPLE_JSON).unwrap();
        assert_eq!(program.decls().len(), 2);
        assert_eq!(program.vars().len(), 1);

        let Decl::Class(class) = program.decl(program.decl_for("Circle").unwrap()) else {
            panic!("Circle should be a class");
        };
        assert_eq!(class.heritage, ["Shape"]);
        assert_eq!(class.members.len(), 2);
        assert!(class.modifiers.contains(&Modifier::Export));

        let Decl::Import(import) = program.decl(program.decl_for("Shape").unwrap()) else {
            panic!("Shape should be an import");
        };
        assert_eq!(import.module, "./shape");
    }

    #[test]
    fn assigns_dense_node_ids() {
        let program = Program::parse(SAMPLE_JSON).unwrap();
        let Decl::Class(class) = &program.decls()[0] else {
            panic!("first decl should be a class");
        };

        // Class, property, method, import, then the variable.
        assert_eq!(class.node.as_u32(), 0);
        let Member::Property(property) = &class.members[0] else {
            panic!("first member should be a property");
        };
        assert_eq!(property.node.as_u32(), 1);
        let Member::Method(method) = &class.members[1] else {
            panic!("second member should be a method");
        };
        assert_eq!(method.node.as_u32(), 2);
        assert_eq!(program.decls()[1].node().as_u32(), 3);
        assert_eq!(program.vars()[0].node.as_u32(), 4);
        assert_ne!(program.vars()[0].node, NodeId::INVALID);
    }

    #[test]
    fn name_index_keeps_last_declaration() {
        let json = indoc! {r#"
            {
              "decls": [
                { "kind": "class", "name": "Dup" },
                { "kind": "function", "name": "Dup" }
              ]
            }
        "#};
        let program = Program::parse(json).unwrap();
        let id = program.decl_for("Dup").unwrap();
        assert!(matches!(program.decl(id), Decl::Function(_)));
    }

    #[test]
    fn rejects_unknown_primitive_keyword() {
        let json = indoc! {r#"
            {
              "vars": [
                { "name": "x", "annotation": { "kind": "primitive", "primitive": "bigint" } }
              ]
            }
        "#};
        let err = Program::parse(json).unwrap_err();
        assert!(err.to_string().contains("bigint"));
    }

    #[test]
    fn primitive_keywords_round_trip() {
        for keyword in ["any", "number", "boolean", "string", "symbol", "null", "undefined"] {
            let primitive = parse_primitive(keyword).unwrap();
            assert_eq!(primitive.name(), keyword);
        }
        assert_eq!(parse_primitive("void"), None);
    }
}
