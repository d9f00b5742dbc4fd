//! Document identifier resolution.

/// Path prefix that marks a navigation path as a document view.
pub const DOCUMENT_VIEW_PREFIX: &str = "/document/";

/// Resolves the document identifier from a navigation path.
///
/// The identifier is the final path segment, and only paths under the
/// document-view prefix resolve at all. `None` is a normal condition, not
/// an error: it means the current view is not a document view and the live
/// preview feature is simply disabled for it.
pub fn resolve_document_id(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(DOCUMENT_VIEW_PREFIX)?;

    match rest.rsplit('/').next() {
        Some(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}
