//! Small text helpers shared by the attribute formatter and the listing
//! generators.
//!
//! The conventions here follow the shop's listing texts: bulleted blocks
//! with `;` between items and a closing `.`, and Portuguese conjunction
//! lists ("a, b e c").

/// Prefix of every rendered bullet line: an em quad followed by a bullet.
pub const BULLET: &str = "\u{2001}\u{2022} ";

/// Suffix marking a deliberately unfinished enumeration in a cell ("; ...").
pub const OPEN_LIST_SUFFIX: &str = "; ...";

/// Renders `items` as a bulleted block.
///
/// Each item sits on its own line prefixed with [`BULLET`]; non-final items
/// end with `;` and the final item ends with `.`. An empty slice renders as
/// the empty string.
pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    match items.split_last() {
        None => String::new(),
        Some((last, rest)) => {
            let mut out = String::new();
            for item in rest {
                out.push_str(BULLET);
                out.push_str(item.as_ref());
                out.push_str(";\n");
            }
            out.push_str(BULLET);
            out.push_str(last.as_ref());
            out.push('.');
            out
        }
    }
}

/// Joins `items` into a natural-language conjunction list: `"a, b e c"`.
///
/// Matches the long conjunction style of the pt-BR locale (no comma before
/// the final "e").
pub fn conjunction_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(|s| s.as_ref()).collect();
            format!("{} e {}", head.join(", "), last.as_ref())
        }
    }
}

/// Lowercases the first character of `text`, leaving the rest untouched.
pub fn uncapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Returns `text` without `suffix` if it ends with it, unchanged otherwise.
pub fn remove_suffix<'a>(text: &'a str, suffix: &str) -> &'a str {
    text.strip_suffix(suffix).unwrap_or(text)
}

/// Returns at most the first `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Splits a semicolon-delimited cell value into its parts.
///
/// A trailing [`OPEN_LIST_SUFFIX`] continuation marker is dropped first;
/// parts are trimmed and empty parts are discarded.
pub fn parse_csv(text: &str) -> Vec<String> {
    remove_suffix(text, OPEN_LIST_SUFFIX)
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_bullet_list_empty() {
        assert_eq!(bullet_list::<&str>(&[]), "");
    }

    #[test]
    fn test_bullet_list_single_item() {
        assert_eq!(bullet_list(&["apples"]), "\u{2001}\u{2022} apples.");
    }

    #[test]
    fn test_bullet_list_terminators() {
        assert_eq!(
            bullet_list(&["apples", "oranges"]),
            "\u{2001}\u{2022} apples;\n\u{2001}\u{2022} oranges."
        );
    }

    #[test]
    fn test_conjunction_list() {
        assert_eq!(conjunction_list::<&str>(&[]), "");
        assert_eq!(conjunction_list(&["a"]), "a");
        assert_eq!(conjunction_list(&["a", "b"]), "a e b");
        assert_eq!(conjunction_list(&["a", "b", "c"]), "a, b e c");
    }

    #[test]
    fn test_uncapitalize() {
        assert_eq!(uncapitalize("Maçã"), "maçã");
        assert_eq!(uncapitalize("maçã"), "maçã");
        assert_eq!(uncapitalize(""), "");
    }

    #[test]
    fn test_remove_suffix() {
        assert_eq!(remove_suffix("Ana;Bia; ...", "; ..."), "Ana;Bia");
        assert_eq!(remove_suffix("Ana;Bia", "; ..."), "Ana;Bia");
        assert_eq!(remove_suffix("", "; ..."), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("abc", 4), "abc");
        // Counts characters, not bytes.
        assert_eq!(truncate_chars("maçã", 3), "maç");
    }

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv("Ana;Bia; ..."), vec!["Ana", "Bia"]);
        assert_eq!(parse_csv("Ana; Bia"), vec!["Ana", "Bia"]);
        assert_eq!(parse_csv("Ana"), vec!["Ana"]);
        assert_eq!(parse_csv(""), Vec::<String>::new());
        assert_eq!(parse_csv(";;"), Vec::<String>::new());
    }
}
