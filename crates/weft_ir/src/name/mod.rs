//! Identifier validation for rule and grammar names.

/// Check the identifier grammar `[A-Za-z_][A-Za-z0-9_]*` over the whole
/// string. Grammar names, rule names and symbol references all share it.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
