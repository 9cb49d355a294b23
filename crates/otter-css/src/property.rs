//! Property name normalization.
//!
//! Style descriptions spell properties the way script code does
//! (`backgroundColor`, `WebkitBackdropFilter`); CSS wants
//! `background-color` and `-webkit-backdrop-filter`.

/// Convert a camelCase property key to its CSS spelling.
///
/// A capitalized first letter marks a vendor prefix and becomes a leading
/// dash (`WebkitBackdropFilter` → `-webkit-backdrop-filter`). That check runs
/// on the original first character, before the camelCase pass, so the
/// prefix dash never doubles up. Every remaining ASCII uppercase letter
/// becomes `-` plus its lowercase form.
///
/// Already kebab-cased lowercase names, including custom properties such as
/// `--accent`, pass through unchanged.
#[must_use]
pub fn process_property(property: &str) -> String {
    let mut processed = String::with_capacity(property.len() + 4);
    let mut chars = property.chars();

    if let Some(first) = chars.next() {
        if first.is_uppercase() {
            processed.push('-');
            processed.extend(first.to_lowercase());
        } else {
            processed.push(first);
        }
    }

    for c in chars {
        if c.is_ascii_uppercase() {
            processed.push('-');
            processed.push(c.to_ascii_lowercase());
        } else {
            processed.push(c);
        }
    }

    processed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(process_property("backgroundColor"), "background-color");
        assert_eq!(process_property("borderTopLeftRadius"), "border-top-left-radius");
    }

    #[test]
    fn test_vendor_prefix() {
        assert_eq!(
            process_property("WebkitBackdropFilter"),
            "-webkit-backdrop-filter"
        );
        assert_eq!(process_property("MozAppearance"), "-moz-appearance");
    }

    #[test]
    fn test_plain_names_unchanged() {
        assert_eq!(process_property("width"), "width");
        assert_eq!(process_property("--accent-color"), "--accent-color");
        assert_eq!(process_property(""), "");
    }

    #[test]
    fn test_idempotent_on_kebab_case() {
        for property in ["background-color", "-webkit-backdrop-filter", "z-index"] {
            let once = process_property(property);
            assert_eq!(process_property(&once), once);
            assert_eq!(once, property);
        }
        let once = process_property("backgroundColor");
        assert_eq!(process_property(&once), once);
    }
}
