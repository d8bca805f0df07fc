//! Repository reference normalization

use crate::types::RepositoryField;

/// Canonicalize a manifest `repository` field.
///
/// Plain strings pass through unchanged. For the `{ url }` form, a
/// `git://github.com` prefix becomes `https://github.com` and a trailing
/// `.git` is dropped.
pub fn normalize_repository(repository: Option<&RepositoryField>) -> Option<String> {
    match repository? {
        RepositoryField::Text(text) => Some(text.clone()),
        RepositoryField::Typed { url } => {
            let url = url.as_deref()?.replacen("git://github.com", "https://github.com", 1);
            Some(url.strip_suffix(".git").map(String::from).unwrap_or(url))
        }
        RepositoryField::Other(_) => None,
    }
}
