//! The extraction pass over one compilation unit.

use indexmap::IndexMap;
use ingot_core::{Interner, Span, Symbol};
use ingot_manifest::{AccessFlag, TypeIndex, TypeManifest};

use crate::decl::{
    ClassDecl, Decl, FunctionDecl, ImportDecl, Initializer, Member, Modifier, NodeId, Program,
    PropertyDecl, PropertyName, TypeAnnotation, VarDecl,
};
use crate::descriptor::{
    ClassInstanceType, ClassType, ExternalType, FieldInfo, FunctionType, TypeDescriptor,
    TypeSummary,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{ExtractError, ExtractResult};

use super::recorder::{TypeRecorder, VariableType};
use super::table::{TableSlot, TypeTable};

/// Everything extraction produces for one unit: the serialized manifest,
/// the per-site bindings, and whatever the pass had to say along the way.
#[derive(Debug)]
pub struct UnitTypes {
    pub manifest: TypeManifest,
    pub variables: IndexMap<NodeId, VariableType>,
    pub diagnostics: Diagnostics,
}

/// Walks one unit's declarations and fills its type table.
///
/// An extractor is single-unit state: table, memo, interner, and diagnostics
/// all start empty and are consumed by [`finish`](TypeExtractor::finish).
/// Units never share an extractor.
pub struct TypeExtractor<'p> {
    program: &'p Program,
    table: TypeTable,
    recorder: TypeRecorder,
    interner: Interner,
    diagnostics: Diagnostics,
}

impl<'p> TypeExtractor<'p> {
    pub fn new(program: &'p Program) -> Self {
        TypeExtractor {
            program,
            table: TypeTable::new(),
            recorder: TypeRecorder::new(),
            interner: Interner::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Resolves every class and function declaration, then records the types
    /// observed at variable sites. Imports materialize lazily, when
    /// something refers to them.
    pub fn extract(&mut self) -> ExtractResult<()> {
        for decl in self.program.decls() {
            if matches!(decl, Decl::Class(_) | Decl::Function(_)) {
                self.decl_index(decl)?;
            }
        }
        for var in self.program.vars() {
            self.record_var(var)?;
        }
        Ok(())
    }

    /// Finalizes the summary slot and serializes the table.
    pub fn finish(mut self) -> UnitTypes {
        let mut redirects = Vec::with_capacity(self.recorder.anonymous_redirects().len());
        for redirect in self.recorder.anonymous_redirects() {
            redirects.push(self.interner.intern(redirect));
        }
        let summary = TypeSummary {
            class_count: self.table.class_count(),
            redirects,
        };
        self.table
            .commit(TableSlot::SUMMARY, TypeDescriptor::Summary(summary));

        let manifest = self.table.serialize_all(&self.interner);
        UnitTypes {
            manifest,
            variables: self.recorder.into_bindings(),
            diagnostics: self.diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn binding_for(&self, site: NodeId) -> Option<VariableType> {
        self.recorder.binding_for(site)
    }

    /// Resolves `name` against the unit's declarations.
    ///
    /// A miss is a warning and yields the unresolved sentinel. When a
    /// binding site is given it is always recorded, even for misses; a
    /// `new` expression additionally allocates a fresh instance and binds
    /// the site to that instance rather than to the class itself.
    pub fn resolve_named_type(
        &mut self,
        name: &str,
        new_expression: bool,
        binding: Option<NodeId>,
        use_span: Span,
    ) -> ExtractResult<TypeIndex> {
        let index = match self.program.decl_for(name) {
            Some(id) => {
                let decl = self.program.decl(id);
                self.decl_index(decl)?
            }
            None => {
                self.diagnostics
                    .report(DiagnosticKind::UnresolvedTypeName, use_span)
                    .message(name)
                    .emit();
                TypeIndex::UNRESOLVED
            }
        };

        if let Some(site) = binding {
            if new_expression && index.is_user_defined() {
                let instance = self.instantiate(index);
                self.recorder.bind(site, instance, true);
                return Ok(instance);
            }
            self.recorder.bind(site, index, true);
        }

        Ok(index)
    }

    /// Resolves an annotation as written: primitives map straight to their
    /// fixed indices, named annotations go through declaration lookup, and
    /// a missing annotation warns and stays unresolved.
    pub fn resolve_annotated_type(
        &mut self,
        annotation: Option<&TypeAnnotation>,
        binding: Option<NodeId>,
        span: Span,
        subject: Option<&str>,
    ) -> ExtractResult<TypeIndex> {
        let Some(annotation) = annotation else {
            let report = self
                .diagnostics
                .report(DiagnosticKind::MissingTypeAnnotation, span);
            match subject {
                Some(subject) => report.message(subject).emit(),
                None => report.emit(),
            }
            if let Some(site) = binding {
                self.recorder.bind(site, TypeIndex::UNRESOLVED, true);
            }
            return Ok(TypeIndex::UNRESOLVED);
        };

        match annotation {
            TypeAnnotation::Primitive { primitive } => {
                let index = TypeIndex::primitive(*primitive);
                if let Some(site) = binding {
                    self.recorder.bind(site, index, false);
                }
                Ok(index)
            }
            TypeAnnotation::Named { name } => self.resolve_named_type(name, false, binding, span),
        }
    }

    /// Allocates an external-type record reached through `#name#path`.
    /// Externals have no recursive structure, so the slot commits at once.
    pub fn record_external(&mut self, import_name: &str, module_path: &str) -> TypeIndex {
        let redirect = self
            .interner
            .intern_owned(format!("#{import_name}#{module_path}"));
        let slot = self.table.reserve();
        self.table
            .commit(slot, TypeDescriptor::External(ExternalType { redirect }));
        slot.shifted_index()
    }

    /// Queues a redirect for an anonymous exported type. The summary keeps
    /// these in registration order.
    pub fn add_anonymous_redirect(&mut self, redirect: impl Into<String>) {
        self.recorder.add_anonymous_redirect(redirect);
    }

    /// Notes an object-literal initializer without inventing a shape for it.
    pub fn flag_object_literal(&mut self, subject: &str, span: Span) {
        self.diagnostics
            .report(DiagnosticKind::ObjectLiteralNotSupported, span)
            .message(subject)
            .emit();
    }

    /// Get-or-create for a declaration's type.
    fn decl_index(&mut self, decl: &'p Decl) -> ExtractResult<TypeIndex> {
        if let Some(index) = self.recorder.index_for(decl.node()) {
            return Ok(index);
        }
        match decl {
            Decl::Class(class) => self.class_index(class),
            Decl::Function(function) => self.function_index(function),
            Decl::Import(import) => Ok(self.external_index(import)),
            Decl::Interface(interface) => {
                self.diagnostics
                    .report(DiagnosticKind::UnsupportedDeclaration, interface.span)
                    .message("interface")
                    .emit();
                Ok(TypeIndex::UNRESOLVED)
            }
        }
    }

    /// Builds a class descriptor.
    ///
    /// The slot is reserved and memoized before any member resolves, so
    /// self-referential and mutually recursive classes terminate: re-entrant
    /// resolution finds the index of the still-placeholder slot.
    fn class_index(&mut self, class: &'p ClassDecl) -> ExtractResult<TypeIndex> {
        let slot = self.table.reserve();
        let index = slot.shifted_index();
        self.recorder.register(class.node, index);

        let mut descriptor = ClassType {
            is_abstract: class.modifiers.contains(&Modifier::Abstract),
            ..ClassType::default()
        };

        for heritage in &class.heritage {
            let heritage_index = self.resolve_named_type(heritage, false, None, class.span)?;
            descriptor.heritages.push(heritage_index);
        }

        for member in &class.members {
            match member {
                Member::Method(method) => {
                    let method_index = self.function_index(method)?;
                    if is_static(&method.modifiers) {
                        descriptor.static_methods.push(method_index);
                    } else {
                        descriptor.methods.push(method_index);
                    }
                }
                Member::Property(property) => {
                    let name = self.member_name(property)?;
                    let info = FieldInfo {
                        type_index: self.property_type(property)?,
                        access: access_from(&property.modifiers),
                        readonly: property.modifiers.contains(&Modifier::Readonly),
                    };
                    if is_static(&property.modifiers) {
                        descriptor.static_fields.insert(name, info);
                    } else {
                        descriptor.fields.insert(name, info);
                    }
                }
            }
        }

        self.table.commit(slot, TypeDescriptor::Class(descriptor));
        Ok(index)
    }

    /// Builds a function descriptor. Every call makes a fresh one; methods
    /// are never unified, even when their signatures match.
    fn function_index(&mut self, function: &'p FunctionDecl) -> ExtractResult<TypeIndex> {
        let slot = self.table.reserve();
        let index = slot.shifted_index();
        self.recorder.register(function.node, index);

        let name = match &function.name {
            Some(name) => self.interner.intern(name),
            // Constructors come through nameless.
            None => self.interner.intern("constructor"),
        };
        let mut descriptor = FunctionType::new(name);
        descriptor.access = access_from(&function.modifiers);
        descriptor.is_static = is_static(&function.modifiers);

        for param in &function.params {
            let param_index = self.resolve_annotated_type(
                param.annotation.as_ref(),
                Some(param.node),
                param.span,
                Some(&param.name),
            )?;
            descriptor.params.push(param_index);
        }

        let return_index =
            self.resolve_annotated_type(function.return_type.as_ref(), None, function.span, None)?;
        if !return_index.is_unresolved() {
            descriptor.return_type = return_index;
        }

        self.table.commit(slot, TypeDescriptor::Function(descriptor));
        Ok(index)
    }

    fn external_index(&mut self, import: &'p ImportDecl) -> TypeIndex {
        let index = self.record_external(&import.imported, &import.module);
        self.recorder.register(import.node, index);
        index
    }

    /// Allocates a fresh instance record. Instances are never memoized;
    /// every `new` gets its own.
    fn instantiate(&mut self, class_index: TypeIndex) -> TypeIndex {
        let slot = self.table.reserve();
        self.table.commit(
            slot,
            TypeDescriptor::ClassInstance(ClassInstanceType { class_index }),
        );
        slot.shifted_index()
    }

    fn member_name(&mut self, property: &PropertyDecl) -> ExtractResult<Symbol> {
        match &property.name {
            PropertyName::Ident { text }
            | PropertyName::StringLit { text }
            | PropertyName::NumberLit { text } => Ok(self.interner.intern(text)),
            // Computed keys collapse to one well-known name.
            PropertyName::Computed => Ok(self.interner.intern("#computed")),
            PropertyName::Private { .. } => Err(ExtractError::InvalidPropertyName {
                span: property.span,
            }),
        }
    }

    fn property_type(&mut self, property: &PropertyDecl) -> ExtractResult<TypeIndex> {
        // A `new` initializer defines the member as holding an instance of
        // the constructed class, annotation or not.
        if let Some(Initializer::New { callee }) = &property.initializer {
            return self.resolve_named_type(callee, true, Some(property.node), property.span);
        }
        self.resolve_annotated_type(
            property.annotation.as_ref(),
            Some(property.node),
            property.span,
            None,
        )
    }

    fn record_var(&mut self, var: &'p VarDecl) -> ExtractResult<()> {
        if let Some(Initializer::New { callee }) = &var.initializer {
            self.resolve_named_type(callee, true, Some(var.node), var.span)?;
            return Ok(());
        }
        if var.annotation.is_none() && matches!(var.initializer, Some(Initializer::ObjectLiteral)) {
            self.flag_object_literal(&var.name, var.span);
            self.recorder.bind(var.node, TypeIndex::UNRESOLVED, true);
            return Ok(());
        }
        self.resolve_annotated_type(
            var.annotation.as_ref(),
            Some(var.node),
            var.span,
            Some(&var.name),
        )?;
        Ok(())
    }
}

/// Runs the whole pass over one unit.
pub fn extract_program(program: &Program) -> ExtractResult<UnitTypes> {
    let mut extractor = TypeExtractor::new(program);
    extractor.extract()?;
    Ok(extractor.finish())
}

fn access_from(modifiers: &[Modifier]) -> AccessFlag {
    if modifiers.contains(&Modifier::Private) {
        AccessFlag::Private
    } else if modifiers.contains(&Modifier::Protected) {
        AccessFlag::Protected
    } else {
        AccessFlag::Public
    }
}

fn is_static(modifiers: &[Modifier]) -> bool {
    modifiers.contains(&Modifier::Static)
}
