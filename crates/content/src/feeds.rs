//! Home page feeds with degrade-to-empty error handling.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::BackendResult;
use crate::mapper::{AnnouncementCard, EventCard, PhotoCard};
use crate::repository::ContentRepository;

/// The three content feeds shown on the home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HomeFeeds {
    pub events: Vec<EventCard>,
    pub announcements: Vec<AnnouncementCard>,
    pub photos: Vec<PhotoCard>,
}

/// Fetches and maps feeds. A failed fetch is logged once and yields an empty feed.
#[derive(Clone)]
pub struct FeedService {
    repository: ContentRepository,
}

impl FeedService {
    pub fn new(repository: ContentRepository) -> Self {
        Self { repository }
    }

    pub async fn events(&self) -> Vec<EventCard> {
        degrade("agenda", self.repository.fetch_events().await)
    }

    pub async fn announcements(&self) -> Vec<AnnouncementCard> {
        degrade("informasi", self.repository.fetch_announcements().await)
    }

    pub async fn photos(&self) -> Vec<PhotoCard> {
        degrade("foto", self.repository.fetch_photos().await)
    }

    /// All home page feeds, fetched concurrently.
    pub async fn home(&self) -> HomeFeeds {
        let (events, announcements, photos) =
            tokio::join!(self.events(), self.announcements(), self.photos());

        HomeFeeds {
            events,
            announcements,
            photos,
        }
    }
}

fn degrade<R, C: From<R>>(feed: &'static str, result: BackendResult<Vec<R>>) -> Vec<C> {
    match result {
        Ok(rows) => {
            debug!(feed, count = rows.len(), "feed loaded");
            rows.into_iter().map(C::from).collect()
        }
        Err(err) => {
            error!(feed, error = %err, "failed to fetch feed");
            Vec::new()
        }
    }
}
