//! Human-readable manifest dump for debugging and tests.

use std::fmt::Write as _;

use crate::index::TypeIndex;
use crate::manifest::TypeManifest;
use crate::reader::{ClassRecord, FunctionRecord, SummaryRecord, TypeRecord, decode_record};

/// Generate a human-readable listing of every record in the manifest.
///
/// Malformed records are reported inline instead of failing the dump.
pub fn dump_manifest(manifest: &TypeManifest) -> String {
    let mut out = String::new();
    let w = width_for_count(manifest.record_count());

    writeln!(out, "[records] count={}", manifest.record_count()).unwrap();
    for (slot, record) in manifest.iter().enumerate() {
        match decode_record(record) {
            Ok(decoded) => dump_record(&mut out, slot, w, &decoded),
            Err(err) => writeln!(out, "T{slot:0w$} <malformed: {err}>").unwrap(),
        }
    }

    out
}

fn dump_record(out: &mut String, slot: usize, w: usize, record: &TypeRecord<'_>) {
    match record {
        TypeRecord::Summary(summary) => dump_summary(out, slot, w, summary),
        TypeRecord::Class(class) => dump_class(out, slot, w, class),
        TypeRecord::ClassInstance(instance) => {
            writeln!(
                out,
                "T{slot:0w$} ({}) class_instance of {}",
                shifted(slot),
                fmt_index(instance.class_index)
            )
            .unwrap();
        }
        TypeRecord::Function(function) => dump_function(out, slot, w, function),
        TypeRecord::ObjectLiteral => {
            writeln!(out, "T{slot:0w$} ({}) object_literal (stub)", shifted(slot)).unwrap();
        }
        TypeRecord::External(external) => {
            writeln!(
                out,
                "T{slot:0w$} ({}) external {:?}",
                shifted(slot),
                external.redirect
            )
            .unwrap();
        }
    }
}

fn dump_summary(out: &mut String, slot: usize, w: usize, summary: &SummaryRecord<'_>) {
    writeln!(out, "T{slot:0w$} counter classes={}", summary.class_count).unwrap();
    for redirect in &summary.redirects {
        writeln!(out, "    redirect {redirect:?}").unwrap();
    }
}

fn dump_class(out: &mut String, slot: usize, w: usize, class: &ClassRecord<'_>) {
    let flags = if class.is_abstract { " abstract" } else { "" };
    writeln!(out, "T{slot:0w$} ({}) class{flags}", shifted(slot)).unwrap();

    for heritage in &class.heritages {
        writeln!(out, "    extends {}", fmt_index(*heritage)).unwrap();
    }
    for field in &class.static_fields {
        writeln!(
            out,
            "    static field {}: {} {}{}",
            field.name,
            fmt_index(field.type_index),
            field.access.name(),
            if field.readonly { " readonly" } else { "" }
        )
        .unwrap();
    }
    for method in &class.static_methods {
        writeln!(out, "    static method {}", fmt_index(*method)).unwrap();
    }
    for field in &class.fields {
        writeln!(
            out,
            "    field {}: {} {}{}",
            field.name,
            fmt_index(field.type_index),
            field.access.name(),
            if field.readonly { " readonly" } else { "" }
        )
        .unwrap();
    }
    for method in &class.methods {
        writeln!(out, "    method {}", fmt_index(*method)).unwrap();
    }
}

fn dump_function(out: &mut String, slot: usize, w: usize, function: &FunctionRecord<'_>) {
    let params: Vec<String> = function.params.iter().map(|p| fmt_index(*p)).collect();
    writeln!(
        out,
        "T{slot:0w$} ({}) function {}({}) -> {} {}{}",
        shifted(slot),
        function.name,
        params.join(", "),
        fmt_index(function.return_type),
        function.access.name(),
        if function.is_static { " static" } else { "" }
    )
    .unwrap();
}

/// Render an index the way readers think about it: primitives by keyword,
/// user types as `#N`, the sentinel as `?`.
fn fmt_index(index: TypeIndex) -> String {
    if index.is_unresolved() {
        return "?".to_owned();
    }
    if let Some(primitive) = index.as_primitive() {
        return primitive.name().to_owned();
    }
    format!("#{}", index.as_i32())
}

/// The shifted index a record at this slot is referenced by.
fn shifted(slot: usize) -> String {
    format!("#{}", TypeIndex::user(slot as u32).as_i32())
}

fn width_for_count(count: usize) -> usize {
    let mut width = 1;
    let mut limit = 10;
    while count > limit {
        width += 1;
        limit *= 10;
    }
    width
}
