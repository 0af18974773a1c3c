//! Icon names.

use std::path::Path;

/// Convert an icon name to kebab-case.
///
/// Parentheses are dropped. Lowercase input passes through; otherwise words
/// are capitalized and joined, and a `-` goes in front of every uppercase
/// letter that follows another character: `Arrow Left` and `ArrowLeft`
/// both become `arrow-left`. Existing separators are left alone.
pub fn kebab_case(name: &str) -> String {
    let name: String = name.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let name = name.trim();

    if !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase()) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for word in name.split_whitespace() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            push_kebab(&mut out, first.to_uppercase());
            for c in chars {
                push_kebab(&mut out, std::iter::once(c));
            }
        }
    }
    out
}

fn push_kebab(out: &mut String, chars: impl Iterator<Item = char>) {
    for c in chars {
        if c.is_uppercase() && !out.is_empty() {
            out.push('-');
        }
        out.extend(c.to_lowercase());
    }
}

/// Icon name for a source file: its kebab-cased stem.
pub fn icon_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(kebab_case(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("home"), "home");
        assert_eq!(kebab_case("ArrowLeft"), "arrow-left");
        assert_eq!(kebab_case("arrow left"), "arrow-left");
        assert_eq!(kebab_case("  Arrow  Left "), "arrow-left");
        assert_eq!(kebab_case("ArrowLeft (2)"), "arrow-left2");
        assert_eq!(kebab_case("chevron-down"), "chevron-down");
        assert_eq!(kebab_case("user_circle"), "user_circle");
        assert_eq!(kebab_case("HTTP"), "h-t-t-p");
    }

    #[test]
    fn test_icon_name_from_path() {
        assert_eq!(
            icon_name_from_path(Path::new("icons/solid/ChevronDown.svg")),
            Some("chevron-down".to_string())
        );
        assert_eq!(icon_name_from_path(Path::new("")), None);
    }
}
