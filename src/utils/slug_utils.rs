use slug::slugify;

/// Slug of an article: `"{id}-{slugified title}"`.
///
/// Non-ASCII text is transliterated before slugifying. The id prefix keeps
/// slugs of different articles apart even when their titles collapse to the
/// same (possibly empty) body.
pub fn derive_slug(id: i64, title: &str) -> String {
    format!("{}-{}", id, slugify(title))
}
