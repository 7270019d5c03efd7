// Fixed module preamble: record struct types and intrinsic declarations.

use charcot_type::{RecordKind, INTRINSICS};

/// `%Patient = type { ... }` and friends, one field per line with its name
/// as a trailing comment.
pub fn record_types() -> String {
    let mut out = String::from("; clinical record types\n");
    for kind in RecordKind::ALL {
        let fields = kind.fields();
        let width = fields
            .iter()
            .map(|f| f.ty.to_string().len() + 1)
            .max()
            .unwrap_or(0);
        out.push_str(&format!("%{} = type {{\n", kind.name()));
        for (i, field) in fields.iter().enumerate() {
            let sep = if i + 1 < fields.len() { "," } else { "" };
            let ty = format!("{}{}", field.ty, sep);
            out.push_str(&format!("  {ty:<width$} ; {}\n", field.name));
        }
        out.push_str("}\n\n");
    }
    out
}

/// One `declare` per runtime intrinsic.
pub fn intrinsic_declarations() -> String {
    let mut out = String::from("; runtime intrinsics\n");
    for intrinsic in INTRINSICS {
        out.push_str(&intrinsic.declaration());
        out.push('\n');
    }
    out
}
