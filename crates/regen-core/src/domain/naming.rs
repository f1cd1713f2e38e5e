//! Name transformations shared by schema augmentation and templates.
//!
//! These are deliberately literal. Generated files have been committed with
//! names produced by exactly these rules, so "smarter" casing (acronym
//! detection, unicode word segmentation) would rename symbols on the next
//! run. In particular [`derive_boundary_words`] turns `HTTPServer` into
//! `h_t_t_p_server`, not `http_server`.

/// Uppercase the first character of `word`, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// `snake_name` → `SnakeName`.
///
/// Splits on `_` only; every segment gets its first letter uppercased.
pub fn to_identifier(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// `"access-policy rule"` → `"AccessPolicyRule"`.
///
/// Dashes count as spaces and every token is capitalized, the first one
/// included, so the result is PascalCase despite the name.
pub fn to_camel_words(s: &str) -> String {
    s.replace('-', " ").split_whitespace().map(capitalize).collect()
}

/// `"Access Policy"` → `"access_policy"`.
pub fn to_snake(s: &str) -> String {
    s.replace('-', " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

/// Derive an external name from a mixed-case model name.
///
/// Repeatedly cuts the input just before the first uppercase letter that is
/// not at the start of the remainder, lowercases the cut word and joins the
/// words with `_`:
///
/// | Input        | Output           |
/// |--------------|------------------|
/// | `Id`         | `id`             |
/// | `modelName`  | `model_name`     |
/// | `HTTPServer` | `h_t_t_p_server` |
pub fn derive_boundary_words(s: &str) -> String {
    let mut words = Vec::new();
    let mut rest = s;

    while let Some(first) = rest.chars().next() {
        let head = first.len_utf8();
        let cut = rest[head..]
            .char_indices()
            .find(|(_, c)| c.is_uppercase())
            .map_or(rest.len(), |(offset, _)| head + offset);

        words.push(rest[..cut].to_lowercase());
        rest = &rest[cut..];
    }

    words.join("_")
}

/// Join schema path segments into a dotted path.
pub fn build_path(segments: &[String]) -> String {
    segments.join(".")
}
