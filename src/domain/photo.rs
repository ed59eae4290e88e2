//! Photo records returned by the image catalog

/// One search result from the image catalog
///
/// Immutable once fetched; a new search supersedes the whole result set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoResult {
    /// Opaque catalog identifier
    pub id: String,
    /// Full-resolution image URL, used as the editing background
    pub full_url: String,
    /// Thumbnail URL for the result grid
    pub thumb_url: String,
    /// Human-readable description (catalog tags)
    pub description: String,
}
