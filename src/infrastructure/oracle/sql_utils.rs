//! Helpers for building Oracle SQL text.

/// Double-quotes an identifier, doubling any embedded quote.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `SELECT * FROM "schema"."table"`, or unqualified when no schema is set.
pub fn select_all_sql(schema: Option<&str>, table: &str) -> String {
    match schema {
        Some(s) if !s.is_empty() => {
            format!("SELECT * FROM {}.{}", quote_ident(s), quote_ident(table))
        }
        _ => format!("SELECT * FROM {}", quote_ident(table)),
    }
}
