//! photomark: stock-photo search and canvas annotation
//!
//! Search a Pixabay-compatible catalog by keyword, pick a result, annotate
//! it with text and basic shapes on a fixed-size scene, then export a
//! flattened PNG raster. The crate is headless: an embedding frontend
//! renders the [`gallery::GalleryView`], forwards pointer interaction to
//! the [`scene::Scene`], and displays [`notify::Notification`]s; everything
//! stateful lives in the [`session::Session`].
//!
//! Nothing is persisted; one session holds at most one live scene, and the
//! catalog credential is injected through [`config::AppConfig`] at startup.

pub mod config;
pub mod domain;
pub mod error;
pub mod gallery;
pub mod notify;
pub mod provider;
pub mod render;
pub mod scene;
pub mod session;

pub use config::AppConfig;
pub use domain::{Annotation, PhotoResult, ShapeKind};
pub use error::{Error, ErrorKind, Result};
pub use notify::Notification;
pub use provider::{ImageProvider, PixabayClient};
pub use scene::{Scene, SceneState};
pub use session::{Screen, Session};
