//! Deterministic uid derivation and identifier rules.
//!
//! Content types live under the `api::` namespace as `api::{slug}.{slug}`;
//! components are `{category-slug}.{name-slug}`. Uids are derived once at
//! creation time and never change afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("identifier pattern is valid"));

/// Names that would collide with generated API namespaces.
const RESERVED_ENTITY_NAMES: &[&str] = &["admin", "api", "plugins", "error"];

/// Attribute names injected by the generated storage layer.
const RESERVED_ATTRIBUTE_NAMES: &[&str] = &[
    "id",
    "created_at",
    "updated_at",
    "published_at",
    "created_by",
    "updated_by",
];

/// Lowercase a human-readable name into a uid-safe slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Derive the uid of a content type from its display name.
pub fn content_type_uid(display_name: &str) -> String {
    let slug = slugify(display_name);
    format!("api::{slug}.{slug}")
}

/// Derive the uid of a component from its category and display name.
pub fn component_uid(category: &str, display_name: &str) -> String {
    format!("{}.{}", slugify(category), slugify(display_name))
}

/// Check identifier syntax: non-empty, leading letter, then letters, digits,
/// underscores or dashes.
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER_RE.is_match(value)
}

pub fn is_reserved_entity_name(slug: &str) -> bool {
    RESERVED_ENTITY_NAMES.contains(&slug)
}

pub fn is_reserved_attribute_name(name: &str) -> bool {
    RESERVED_ATTRIBUTE_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Article"), "article");
        assert_eq!(slugify("Blog  Post!"), "blog-post");
        assert_eq!(slugify("hero_banner"), "hero-banner");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn content_type_uid_shape() {
        assert_eq!(content_type_uid("Article"), "api::article.article");
        assert_eq!(content_type_uid("Blog Post"), "api::blog-post.blog-post");
    }

    #[test]
    fn component_uid_shape() {
        assert_eq!(component_uid("layout", "Hero"), "layout.hero");
        assert_eq!(component_uid("Page Sections", "Call To Action"), "page-sections.call-to-action");
    }

    #[test]
    fn identifier_syntax() {
        assert!(is_valid_identifier("title"));
        assert!(is_valid_identifier("cover_image"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("9lives"));
        assert!(!is_valid_identifier("with space"));
    }

    #[test]
    fn reserved_names() {
        assert!(is_reserved_entity_name("admin"));
        assert!(!is_reserved_entity_name("article"));
        assert!(is_reserved_attribute_name("id"));
        assert!(!is_reserved_attribute_name("title"));
    }
}
