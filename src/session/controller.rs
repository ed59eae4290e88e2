//! Session controller driving the search and edit screens

use ab_glyph::FontArc;
use rand::seq::SliceRandom;

use super::state::{
    DEFAULT_TOPICS, EXPORT_FILE_NAME, EditState, ExportedImage, Screen, SearchState,
};
use crate::config::AppConfig;
use crate::domain::PhotoResult;
use crate::error::{ErrorKind, Result};
use crate::gallery::{self, GalleryView};
use crate::notify::{Notification, NotificationSender};
use crate::provider::ImageProvider;
use crate::render::text as font_loader;
use crate::scene::Scene;

/// Tag for one in-flight search; responses carrying a stale ticket are
/// discarded instead of overwriting newer results
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Top-level controller: one per user session
pub struct Session {
    provider: Box<dyn ImageProvider>,
    config: AppConfig,
    font: Option<FontArc>,
    search: SearchState,
    editing: Option<EditState>,
    /// Ticket handed to the most recently started search
    last_issued: u64,
    /// Ticket of the most recently applied response
    last_applied: u64,
    /// Whether any search has ever been issued
    has_searched: bool,
    notifier: NotificationSender,
}

impl Session {
    pub fn new(
        provider: Box<dyn ImageProvider>,
        config: AppConfig,
        notifier: NotificationSender,
    ) -> Self {
        let font = match &config.font_path {
            Some(path) => font_loader::load_font(path),
            None => font_loader::load_default_font(),
        };
        Self {
            provider,
            config,
            font,
            search: SearchState::default(),
            editing: None,
            last_issued: 0,
            last_applied: 0,
            has_searched: false,
            notifier,
        }
    }

    /// Which screen the frontend should show
    pub fn screen(&self) -> Screen {
        if self.editing.is_some() {
            Screen::Editing
        } else {
            Screen::Searching
        }
    }

    /// Search screen state (query, results, loading flag)
    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// View model for the result grid
    pub fn gallery(&self) -> GalleryView<'_> {
        gallery::view(&self.search.results, self.search.loading)
    }

    /// The photo currently being edited, if any
    pub fn editing_photo(&self) -> Option<&PhotoResult> {
        self.editing.as_ref().map(|edit| &edit.photo)
    }

    /// Mutable access to the live scene for direct-manipulation edits
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.editing.as_mut().map(|edit| &mut edit.scene)
    }

    fn notify(&self, notification: Notification) {
        // The receiver dropping just means nobody is listening anymore
        let _ = self.notifier.send(notification);
    }

    // ========================================================================
    // Searching
    // ========================================================================

    /// Mark a search as started: record the query, raise the loading flag
    /// and hand out the ticket the eventual response must carry.
    ///
    /// Split from [`Session::apply_search_outcome`] so frontends that run
    /// requests concurrently can interleave them; [`Session::submit_search`]
    /// covers the common sequential case.
    pub fn begin_search(&mut self, query: &str) -> SearchTicket {
        self.last_issued += 1;
        self.has_searched = true;
        self.search.query = query.to_string();
        self.search.loading = true;
        SearchTicket(self.last_issued)
    }

    /// Apply a search response, unless a newer one was already applied
    pub fn apply_search_outcome(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<PhotoResult>>,
    ) {
        if ticket.0 <= self.last_applied {
            log::debug!(
                "Discarding stale search response {ticket:?} (newest applied: {})",
                self.last_applied
            );
            return;
        }
        self.last_applied = ticket.0;
        if ticket.0 == self.last_issued {
            self.search.loading = false;
        }

        match outcome {
            Ok(results) => {
                log::info!("Applying {} search results", results.len());
                self.search.results = results;
            }
            Err(err) => {
                log::error!("Search failed: {err}");
                self.notify(Notification::error("Failed to fetch images"));
            }
        }
    }

    /// Run one keyword search end to end
    ///
    /// A blank query is rejected before any request and surfaces a
    /// validation notification.
    pub async fn submit_search(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.notify(Notification::error("Please enter a search term"));
            return;
        }
        let ticket = self.begin_search(query);
        let outcome = self.provider.search(query).await;
        self.apply_search_outcome(ticket, outcome);
    }

    /// Issue the automatic first search with a random topic
    ///
    /// No-op once any search has been started, so it is safe to call on
    /// every entry to the search screen.
    pub async fn initial_search(&mut self) {
        if self.has_searched {
            return;
        }
        let topic = DEFAULT_TOPICS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("nature");
        log::info!("Issuing initial search for {topic:?}");

        let ticket = self.begin_search(topic);
        match self.provider.search(topic).await {
            Ok(results) => self.apply_search_outcome(ticket, Ok(results)),
            Err(err) => {
                log::error!("Initial search failed: {err}");
                if ticket.0 == self.last_issued {
                    self.search.loading = false;
                }
                self.notify(Notification::error("Failed to load default images"));
            }
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Fetch the photo's full-resolution image and enter the edit screen
    ///
    /// On load failure the session stays on the search screen and the user
    /// gets an advisory notification.
    pub async fn open_editor(&mut self, photo: PhotoResult) {
        if self.editing.is_some() {
            log::warn!("open_editor while already editing; ignoring");
            return;
        }

        let loaded = self.load_background(&photo.full_url).await;
        match loaded {
            Ok(scene) => {
                log::info!("Editing photo {}", photo.id);
                self.editing = Some(EditState { photo, scene });
            }
            Err(err) => {
                log::error!("Could not load photo {}: {err}", photo.id);
                self.notify(Notification::error("Failed to load image"));
            }
        }
    }

    async fn load_background(&self, url: &str) -> Result<Scene> {
        let bytes = self.provider.fetch_image(url).await?;
        let photo = image::load_from_memory(&bytes)?;
        let mut scene = Scene::new(
            self.config.canvas.width,
            self.config.canvas.height,
            self.font.clone(),
        );
        scene.set_background(&photo);
        Ok(scene)
    }

    /// Leave the edit screen, disposing the scene first
    ///
    /// Search results and query survive the round trip.
    pub fn back_to_search(&mut self) {
        if let Some(mut edit) = self.editing.take() {
            edit.scene.dispose();
            log::debug!("Disposed scene for photo {}", edit.photo.id);
        }
    }

    /// Flatten the current scene into a downloadable PNG
    ///
    /// Returns `None` (with an advisory notification on failure) when not
    /// editing or when the export fails.
    pub fn export_image(&mut self) -> Option<ExportedImage> {
        let Some(edit) = &self.editing else {
            log::warn!("export_image while not editing");
            return None;
        };
        match edit.scene.export() {
            Ok(bytes) => {
                self.notify(Notification::success("Image downloaded successfully!"));
                Some(ExportedImage {
                    file_name: EXPORT_FILE_NAME.to_string(),
                    bytes,
                })
            }
            Err(err) => {
                debug_assert_eq!(err.kind(), ErrorKind::Export);
                log::error!("Export failed: {err}");
                self.notify(Notification::error("Failed to download image"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::notify;
    use async_trait::async_trait;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::sync::Mutex;

    /// Catalog stub that records queries and serves canned data
    struct StubProvider {
        queries: Mutex<Vec<String>>,
        results: Vec<PhotoResult>,
        image_bytes: Vec<u8>,
        fail_search: bool,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                results: vec![photo("1"), photo("2")],
                image_bytes: encode_png(64, 48),
                fail_search: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_search: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl ImageProvider for StubProvider {
        async fn search(&self, query: &str) -> Result<Vec<PhotoResult>> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail_search {
                return Err(Error::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok(self.results.clone())
        }

        async fn fetch_image(&self, _url: &str) -> Result<Vec<u8>> {
            if self.image_bytes.is_empty() {
                return Err(Error::Status(reqwest::StatusCode::NOT_FOUND));
            }
            Ok(self.image_bytes.clone())
        }
    }

    fn photo(id: &str) -> PhotoResult {
        PhotoResult {
            id: id.to_string(),
            full_url: format!("https://cdn.example.com/{id}_1280.jpg"),
            thumb_url: format!("https://cdn.example.com/{id}_640.jpg"),
            description: "stub".to_string(),
        }
    }

    fn encode_png(w: u32, h: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255])));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn session_with(provider: StubProvider) -> (Session, notify::NotificationReceiver) {
        let _ = env_logger::builder().is_test(true).try_init();
        let (tx, rx) = notify::channel();
        let session = Session::new(Box::new(provider), AppConfig::new("test-key"), tx);
        (session, rx)
    }

    #[tokio::test]
    async fn test_starts_on_search_screen() {
        let (session, _rx) = session_with(StubProvider::new());
        assert_eq!(session.screen(), Screen::Searching);
        assert!(session.search_state().results.is_empty());
        assert!(!session.search_state().loading);
    }

    #[tokio::test]
    async fn test_submit_search_populates_results() {
        let (mut session, _rx) = session_with(StubProvider::new());
        session.submit_search("dogs").await;
        assert_eq!(session.search_state().query, "dogs");
        assert_eq!(session.search_state().results.len(), 2);
        assert!(!session.search_state().loading);
        assert!(matches!(session.gallery(), GalleryView::Grid(_)));
    }

    #[tokio::test]
    async fn test_blank_search_notifies_without_request() {
        let stub = StubProvider::new();
        let (mut session, mut rx) = session_with(stub);
        session.submit_search("   ").await;

        let note = rx.recv().await.unwrap();
        assert_eq!(note, Notification::error("Please enter a search term"));
        // No request was recorded and nothing changed
        assert!(session.search_state().results.is_empty());
        assert!(!session.search_state().loading);
    }

    #[tokio::test]
    async fn test_search_failure_notifies() {
        let (mut session, mut rx) = session_with(StubProvider::failing());
        session.submit_search("dogs").await;
        let note = rx.recv().await.unwrap();
        assert_eq!(note, Notification::error("Failed to fetch images"));
        assert!(!session.search_state().loading);
    }

    #[tokio::test]
    async fn test_initial_search_uses_a_known_topic_once() {
        let (mut session, _rx) = session_with(StubProvider::new());
        session.initial_search().await;
        assert!(DEFAULT_TOPICS.contains(&session.search_state().query.as_str()));
        assert_eq!(session.search_state().results.len(), 2);

        // Second call is a no-op
        let query = session.search_state().query.clone();
        session.initial_search().await;
        assert_eq!(session.search_state().query, query);
    }

    #[tokio::test]
    async fn test_initial_search_failure_notifies() {
        let (mut session, mut rx) = session_with(StubProvider::failing());
        session.initial_search().await;
        let note = rx.recv().await.unwrap();
        assert_eq!(note, Notification::error("Failed to load default images"));
    }

    #[tokio::test]
    async fn test_stale_search_response_is_discarded() {
        let (mut session, _rx) = session_with(StubProvider::new());

        let slow = session.begin_search("first");
        let fast = session.begin_search("second");

        session.apply_search_outcome(fast, Ok(vec![photo("fast")]));
        assert!(!session.search_state().loading);

        // The earlier request resolves late; its results must not win
        session.apply_search_outcome(slow, Ok(vec![photo("slow")]));
        assert_eq!(session.search_state().results.len(), 1);
        assert_eq!(session.search_state().results[0].id, "fast");
    }

    #[tokio::test]
    async fn test_out_of_order_resolution_keeps_loading_until_newest() {
        let (mut session, _rx) = session_with(StubProvider::new());

        let first = session.begin_search("first");
        let second = session.begin_search("second");

        // The older request resolving does not clear the loading flag
        session.apply_search_outcome(first, Ok(vec![photo("early")]));
        assert!(session.search_state().loading);
        assert_eq!(session.search_state().results[0].id, "early");

        session.apply_search_outcome(second, Ok(vec![photo("late")]));
        assert!(!session.search_state().loading);
        assert_eq!(session.search_state().results[0].id, "late");
    }

    #[tokio::test]
    async fn test_open_editor_and_back_round_trip() {
        let (mut session, _rx) = session_with(StubProvider::new());
        session.submit_search("dogs").await;

        let selected = session.search_state().results[0].clone();
        session.open_editor(selected.clone()).await;
        assert_eq!(session.screen(), Screen::Editing);
        assert_eq!(session.editing_photo(), Some(&selected));
        assert!(session.scene_mut().is_some());

        session.back_to_search();
        assert_eq!(session.screen(), Screen::Searching);
        assert!(session.scene_mut().is_none());
        // Results survive the round trip
        assert_eq!(session.search_state().results.len(), 2);
    }

    #[tokio::test]
    async fn test_open_editor_with_bad_image_stays_searching() {
        let mut stub = StubProvider::new();
        stub.image_bytes = b"definitely not a png".to_vec();
        let (mut session, mut rx) = session_with(stub);

        session.open_editor(photo("broken")).await;
        assert_eq!(session.screen(), Screen::Searching);
        let note = rx.recv().await.unwrap();
        assert_eq!(note, Notification::error("Failed to load image"));
    }

    #[tokio::test]
    async fn test_export_image_returns_png_and_notifies() {
        let (mut session, mut rx) = session_with(StubProvider::new());
        session.open_editor(photo("1")).await;

        let exported = session.export_image().unwrap();
        assert_eq!(exported.file_name, "edited-image.png");
        let decoded = image::load_from_memory(&exported.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 600));

        let note = rx.recv().await.unwrap();
        assert_eq!(note.level, crate::notify::Level::Success);
    }

    #[tokio::test]
    async fn test_export_while_searching_returns_none() {
        let (mut session, _rx) = session_with(StubProvider::new());
        assert!(session.export_image().is_none());
    }
}
