//! Inline style declarations (`style="name: value; ..."`).

/// Parse an inline style attribute into ordered declarations.
///
/// Empty and malformed fragments (no colon) are dropped. Names are
/// trimmed but keep their case; values are trimmed.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Serialize declarations back into attribute form.
pub fn serialize_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Set one property in an inline style string, leaving the others alone.
pub fn set_property(style: &str, name: &str, value: &str) -> String {
    let mut decls = parse_declarations(style);
    match decls
        .iter_mut()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
    {
        Some(slot) => slot.1 = value.to_string(),
        None => decls.push((name.to_string(), value.to_string())),
    }
    serialize_declarations(&decls)
}

/// Look up one property in an inline style string.
pub fn get_property(style: &str, name: &str) -> Option<String> {
    parse_declarations(style)
        .into_iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}
