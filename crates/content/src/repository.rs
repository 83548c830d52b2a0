//! Read-only queries for the home page feeds.

use portal_config::FeedConfig;

use crate::client::BackendClient;
use crate::entities::{RawAnnouncement, RawEvent, RawPhoto};
use crate::error::BackendResult;
use crate::query::{Direction, Embed, Query, Selection};

pub const EVENT_TABLE: &str = "agenda";
pub const ANNOUNCEMENT_TABLE: &str = "informasi";
pub const PHOTO_TABLE: &str = "foto";

/// `*, post:post_id(galery(foto(file)))`
fn media_selection() -> Selection {
    Selection::all().embed(
        Embed::to_one("post", "post", "post_id").select(
            Selection::default().embed(
                Embed::to_many("galery", "post_id").select(
                    Selection::default()
                        .embed(Embed::to_many("foto", "galery_id").select(Selection::fields(["file"]))),
                ),
            ),
        ),
    )
}

/// `id, file, judul, galery:galery_id!inner(post:post_id(kategori:kategori_id(judul)))`
fn photo_selection() -> Selection {
    Selection::fields(["id", "file", "judul"]).embed(
        Embed::to_one("galery", "galery", "galery_id").inner().select(
            Selection::default().embed(Embed::to_one("post", "post", "post_id").select(
                Selection::default().embed(
                    Embed::to_one("kategori", "kategori", "kategori_id")
                        .select(Selection::fields(["judul"])),
                ),
            )),
        ),
    )
}

#[derive(Clone)]
pub struct ContentRepository {
    client: BackendClient,
    feeds: FeedConfig,
}

impl ContentRepository {
    pub fn new(client: BackendClient, feeds: FeedConfig) -> Self {
        Self { client, feeds }
    }

    pub fn events_query(&self) -> Query {
        Query::table(EVENT_TABLE)
            .select(media_selection())
            .eq("status", self.feeds.active_status.as_str())
            .order("tanggal", Direction::Ascending)
            .limit(self.feeds.event_limit)
    }

    pub fn announcements_query(&self) -> Query {
        Query::table(ANNOUNCEMENT_TABLE)
            .select(media_selection())
            .eq("status", self.feeds.active_status.as_str())
            .order("tanggal", Direction::Descending)
            .limit(self.feeds.announcement_limit)
    }

    pub fn photos_query(&self) -> Query {
        Query::table(PHOTO_TABLE)
            .select(photo_selection())
            .eq("galery.status", self.feeds.published_status)
            .limit(self.feeds.photo_limit)
    }

    /// Active events, soonest first.
    pub async fn fetch_events(&self) -> BackendResult<Vec<RawEvent>> {
        self.client.fetch(&self.events_query()).await
    }

    /// Active announcements, newest first.
    pub async fn fetch_announcements(&self) -> BackendResult<Vec<RawAnnouncement>> {
        self.client.fetch(&self.announcements_query()).await
    }

    /// Photos from published galleries.
    pub async fn fetch_photos(&self) -> BackendResult<Vec<RawPhoto>> {
        self.client.fetch(&self.photos_query()).await
    }
}
