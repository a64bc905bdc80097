//! FILENAME: table-model/src/normalize.rs
//! PURPOSE: The Column Model — one-shot spec preparation.
//! CONTEXT: Before the engine derives anything from a spec it normalizes it:
//! column labels get invisible break opportunities, each column's value type
//! is inferred from a bounded row sample, and columns without a renderer get
//! a default one picked from that type. The pass runs at most once per spec
//! instance, guarded by the `prepared` marker, and is idempotent.

use crate::column::{ColumnSpec, ColumnType, RenderFn, TableSpec};
use crate::strings::insert_breaks_at_camel_case;
use crate::value::CellValue;

/// Upper bound on the number of rows sampled for type inference. A column
/// whose first finite-integer values hide a later float outside the sample
/// keeps the `Int` inference — sampling is approximate by contract.
pub const TYPE_SAMPLE_ROWS: usize = 50;

/// Normalizes a spec in place. Safe to call repeatedly; only the first call
/// per spec instance does any work.
pub fn normalize(spec: &mut TableSpec) {
    if spec.prepared {
        return;
    }

    let row_count = spec.row_count;
    for col in &mut spec.columns {
        col.name = insert_breaks_at_camel_case(&col.name);

        let inferred = match col.inferred_type {
            Some(ty) => ty,
            None => {
                let ty = infer_column_type(col, row_count);
                col.inferred_type = Some(ty);
                ty
            }
        };

        if col.render.is_none() {
            col.render = Some(default_renderer(inferred));
        }
    }

    spec.prepared = true;
}

/// Samples up to the first `TYPE_SAMPLE_ROWS` values of a column:
/// all finite integers -> `Int`; any finite non-integer -> `Float`;
/// any non-finite or non-numeric value -> `Text`, ending the sample early.
fn infer_column_type(col: &ColumnSpec, row_count: usize) -> ColumnType {
    let mut inferred = ColumnType::Int;
    for row in 0..row_count.min(TYPE_SAMPLE_ROWS) {
        let value = (col.value)(row);
        if value.is_finite_number() {
            if !value.is_finite_integer() {
                inferred = ColumnType::Float;
            }
        } else {
            return ColumnType::Text;
        }
    }
    inferred
}

/// Fixed type-to-renderer mapping for columns without a host renderer.
fn default_renderer(ty: ColumnType) -> RenderFn {
    match ty {
        ColumnType::Int => Box::new(|v: &CellValue| v.display()),
        ColumnType::Float => Box::new(|v: &CellValue| match v.as_number() {
            Some(n) if n.is_finite() => format!("{:.2}", n),
            _ => String::new(),
        }),
        ColumnType::Text => Box::new(|v: &CellValue| v.display()),
    }
}
