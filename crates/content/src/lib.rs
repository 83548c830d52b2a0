//! # Portal Content Crate
//!
//! Read-only access to the school's hosted content store and the view models the
//! public pages render.
//!
//! ## Architecture
//!
//! - **Query**: structured select/filter/order/limit queries with nested joins
//! - **Transport**: REST transport for the hosted store, in-memory transport for fixtures
//! - **Client**: one shared [`BackendClient`] handed to every reader
//! - **Entities / Mapper**: raw nested rows and their flat view models
//! - **Feeds**: home page feeds that degrade to empty on failure
//!
//! ## Usage
//!
//! ```rust,no_run
//! use portal_content::{BackendClient, ContentRepository, FeedService};
//! use portal_config::AppConfig;
//!
//! # async fn example(config: AppConfig) -> Result<(), portal_content::BackendError> {
//! let client = BackendClient::rest(&config.backend)?;
//! let feeds = FeedService::new(ContentRepository::new(client, config.feeds.clone()));
//! let home = feeds.home().await;
//! # Ok(())
//! # }
//! ```

pub mod catalogue;
pub mod client;
pub mod entities;
pub mod error;
pub mod feeds;
pub mod mapper;
pub mod query;
pub mod repository;
pub mod transport;

pub use catalogue::SiteCatalogue;
pub use client::BackendClient;
pub use entities::{AnnouncementKind, Link, RawAnnouncement, RawEvent, RawPhoto};
pub use error::{BackendError, BackendResult};
pub use feeds::{FeedService, HomeFeeds};
pub use mapper::{AnnouncementCard, Cover, EventCard, PhotoCard};
pub use query::{Direction, Embed, Query, Selection};
pub use repository::ContentRepository;
pub use transport::{MemoryTransport, RestTransport, Transport};
