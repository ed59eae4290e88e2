//! Result grid view model
//!
//! Pure presentation logic over a search result sequence and a loading
//! flag. The embedding frontend renders whichever variant comes back; the
//! crate keeps no state here.

use crate::domain::PhotoResult;

/// One tile of the result grid
#[derive(Debug, PartialEq)]
pub struct Tile<'a> {
    /// Thumbnail to display
    pub thumb_url: &'a str,
    /// Caption under the thumbnail
    pub caption: &'a str,
    /// Full record handed upward when the tile's edit action fires
    pub photo: &'a PhotoResult,
}

/// What the result area should show
#[derive(Debug, PartialEq)]
pub enum GalleryView<'a> {
    /// Indeterminate progress indicator; results are ignored while loading
    Loading,
    /// Nothing to render
    Empty,
    /// One tile per result, in result order
    Grid(Vec<Tile<'a>>),
}

/// Build the view for the current results and loading flag
pub fn view(results: &[PhotoResult], loading: bool) -> GalleryView<'_> {
    if loading {
        return GalleryView::Loading;
    }
    if results.is_empty() {
        return GalleryView::Empty;
    }
    GalleryView::Grid(
        results
            .iter()
            .map(|photo| Tile {
                thumb_url: &photo.thumb_url,
                caption: &photo.description,
                photo,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: &str) -> PhotoResult {
        PhotoResult {
            id: id.to_string(),
            full_url: format!("https://example.com/{id}/full.jpg"),
            thumb_url: format!("https://example.com/{id}/thumb.jpg"),
            description: format!("photo {id}"),
        }
    }

    #[test]
    fn test_loading_wins_over_results() {
        let results = vec![photo("1")];
        assert_eq!(view(&results, true), GalleryView::Loading);
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(view(&[], false), GalleryView::Empty);
    }

    #[test]
    fn test_grid_preserves_order() {
        let results = vec![photo("a"), photo("b"), photo("c")];
        let GalleryView::Grid(tiles) = view(&results, false) else {
            panic!("expected grid");
        };
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[0].photo.id, "a");
        assert_eq!(tiles[2].photo.id, "c");
        assert_eq!(tiles[1].thumb_url, "https://example.com/b/thumb.jpg");
        assert_eq!(tiles[1].caption, "photo b");
    }
}
