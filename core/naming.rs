//! Display-name transforms applied to raw path segments.
//!
//! The raw segment is always what ends up in a rendered URL path; these
//! transforms only shape the *accessor* names exposed on builder structures
//! (camelCase keys for the runtime map, snake_case identifiers for emitted
//! Rust). The two representations intentionally diverge.

/// Convert a kebab/snake/space separated name to camelCase.
///
/// The first word keeps its original casing, matching how directory names
/// like `hyphened-route` become `hyphenedRoute`.
pub fn camel_case(name: &str) -> String {
    let mut words = name.split(['-', '_', ' ']).filter(|w| !w.is_empty());
    let mut out = String::with_capacity(name.len());
    if let Some(first) = words.next() {
        out.push_str(first);
    }
    for word in words {
        out.push_str(&capitalize(word));
    }
    out
}

/// Convert a name to PascalCase, splitting on `-`, `_` and spaces.
pub fn pascal_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect()
}

/// Convert a kebab-case or camelCase name to snake_case.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch == '-' || ch == ' ' || ch == '_' {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower && !out.ends_with('_') {
                out.push('_');
            }
            for low in ch.to_lowercase() {
                out.push(low);
            }
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Make a snake_case name usable as a Rust identifier in emitted code.
///
/// Keywords get a raw-identifier prefix where the language allows it and a
/// trailing underscore where it does not. `path` is reserved for the
/// own-path accessor on generated structs.
pub fn sanitize_ident(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }
    if name == "path" {
        return "path_".to_string();
    }
    if matches!(name, "self" | "Self" | "super" | "crate" | "extern") {
        return format!("{name}_");
    }
    if is_keyword(name) {
        return format!("r#{name}");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{name}");
    }
    name.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async" | "await" | "break" | "const" | "continue" | "dyn" | "else" | "enum"
            | "false" | "fn" | "for" | "gen" | "if" | "impl" | "in" | "let" | "loop" | "match"
            | "mod" | "move" | "mut" | "pub" | "ref" | "return" | "static" | "struct" | "trait"
            | "true" | "type" | "unsafe" | "use" | "where" | "while"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_keeps_first_word_verbatim() {
        assert_eq!(camel_case("hyphened-route"), "hyphenedRoute");
        assert_eq!(camel_case("user-id"), "userId");
        assert_eq!(camel_case("userId"), "userId");
        assert_eq!(camel_case("plain"), "plain");
    }

    #[test]
    fn pascal_case_capitalizes_every_word() {
        assert_eq!(pascal_case("hyphened-route"), "HyphenedRoute");
        assert_eq!(pascal_case("users"), "Users");
        assert_eq!(pascal_case("userId"), "UserId");
    }

    #[test]
    fn snake_case_splits_camel_humps_and_kebabs() {
        assert_eq!(snake_case("userId"), "user_id");
        assert_eq!(snake_case("hyphened-route"), "hyphened_route");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case("HTMLBody"), "htmlbody");
    }

    #[test]
    fn sanitize_escapes_keywords_and_reserved_names() {
        assert_eq!(sanitize_ident("type"), "r#type");
        assert_eq!(sanitize_ident("self"), "self_");
        assert_eq!(sanitize_ident("path"), "path_");
        assert_eq!(sanitize_ident("2fa"), "_2fa");
        assert_eq!(sanitize_ident("users"), "users");
    }
}
