//! Title to spec id conversion

/// Convert a title to a spec id
///
/// Lowercases, drops anything outside `[a-z0-9]`, whitespace and `-`, and
/// turns each run of whitespace or hyphens into one hyphen.
/// Leading and trailing hyphens are removed.
///
/// ```
/// use specsmith_doc::slugify;
///
/// assert_eq!(slugify("User Auth System"), "user-auth-system");
/// assert_eq!(slugify("  Fix Upload Bug!  "), "fix-upload-bug");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    slug
}
