//! Segment normalization.
//!
//! Every segment of an identifier is a slug: lowercase ASCII letters and
//! digits, with single hyphens between words. Organisation and division
//! names are run through [`slugify`] before they are stored, and raw
//! segments are only accepted when they are already in slug form.

/// Normalizes free text into a slug.
///
/// ASCII letters are lowercased and digits kept. Runs of whitespace,
/// hyphens and underscores become a single hyphen. Anything else
/// (punctuation, non-ASCII characters) is dropped. Leading and trailing
/// hyphens are never emitted, so the result is stable under a second pass.
///
/// ```
/// use uk_election_ids::slugify;
///
/// assert_eq!(slugify("Newcastle upon Tyne"), "newcastle-upon-tyne");
/// assert_eq!(slugify("St. Helens"), "st-helens");
/// assert_eq!(slugify(&slugify("Bath & North East Somerset")), slugify("Bath & North East Somerset"));
/// ```
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        }
    }

    slug
}

/// Returns true if `segment` is a non-empty slug that [`slugify`] leaves
/// unchanged.
#[must_use]
pub fn is_valid_token(segment: &str) -> bool {
    !segment.is_empty() && slugify(segment) == segment
}
