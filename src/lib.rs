//! mashup: places and local news for an interactive map
//!
//! A small web service behind a browser map widget. It answers three kinds
//! of questions from a static table of places (name, region, postal code,
//! coordinates):
//!
//! - Which places match a free-text query like "Cambridge, MA" or "95139"?
//! - Which places lie inside the visible map area?
//! - What is in the news for a given place?
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mashup::place::PlaceStore;
//! use mashup::viewport::{find_places, Viewport};
//!
//! # async fn demo() -> mashup::Result<()> {
//! let store = PlaceStore::open("mashup.db".as_ref()).await?;
//!
//! let places = mashup::search::search(&store, "Cambridge, MA").await?;
//! println!("{} matches", places.len());
//!
//! let viewport = Viewport::parse("42.2,-71.3", "42.5,-70.9")?;
//! let nearby = find_places(&store, &viewport).await?;
//! println!("{} places in view", nearby.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod news;
pub mod place;
pub mod search;
pub mod server;
pub mod viewport;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use news::{Article, NewsSource};
pub use place::{Place, PlaceStore};
pub use search::SearchShape;
pub use viewport::Viewport;
