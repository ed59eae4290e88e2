//! Screen and search state types

use crate::domain::PhotoResult;
use crate::scene::Scene;

/// Which screen the frontend should show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Searching,
    Editing,
}

/// State behind the search screen
///
/// Survives a round trip through the editor so the user comes back to the
/// same results.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    /// Current query text
    pub query: String,
    /// Result sequence from the most recent applied search
    pub results: Vec<PhotoResult>,
    /// True while a search is in flight
    pub loading: bool,
}

/// State behind the edit screen
pub struct EditState {
    /// The photo being edited
    pub photo: PhotoResult,
    /// The live scene; disposed when the user navigates back
    pub scene: Scene,
}

/// A flattened raster ready to hand to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    /// Suggested download file name
    pub file_name: String,
    /// PNG-encoded raster at the canvas's pixel dimensions
    pub bytes: Vec<u8>,
}

/// File name offered for exported rasters
pub const EXPORT_FILE_NAME: &str = "edited-image.png";

/// Topics used for the automatic first search, so the initial screen is
/// never empty
pub const DEFAULT_TOPICS: &[&str] = &[
    "nature",
    "technology",
    "travel",
    "abstract",
    "animals",
    "cars",
    "mountains",
    "food",
    "space",
    "architecture",
];
