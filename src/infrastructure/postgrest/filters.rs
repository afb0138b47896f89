//! Builders for PostgREST query-string filters (`eq.`, `ilike.`, `in.()`, `or=()`).

// Characters that would split or close a list/logic group if left bare.
const RESERVED: [char; 5] = [',', '(', ')', '"', '\\'];

pub fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

/// `ilike.*term*`, a case-insensitive substring match.
pub fn ilike_contains(term: &str) -> String {
    format!("ilike.{}", contains_pattern(term))
}

pub fn in_list<S: AsRef<str>>(values: &[S]) -> String {
    let items = values
        .iter()
        .map(|value| quote(value.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({})", items)
}

/// Value for an `or` parameter: `(cond1,cond2,...)`.
pub fn or_group<S: AsRef<str>>(conditions: &[S]) -> String {
    let items = conditions
        .iter()
        .map(|condition| condition.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    format!("({})", items)
}

/// A `column.ilike.*term*` condition for use inside [`or_group`].
pub fn ilike_condition(column: &str, term: &str) -> String {
    format!("{}.ilike.{}", column, quote(&contains_pattern(term)))
}

/// Double-quotes a value when it contains list delimiters.
pub fn quote(value: &str) -> String {
    if !value.contains(RESERVED) {
        return value.to_string();
    }

    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

fn contains_pattern(term: &str) -> String {
    format!("*{}*", term)
}
