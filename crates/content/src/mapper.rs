//! Flat, render-ready view models built from raw rows.
//!
//! Every conversion here is total: an absent link anywhere in a join chain
//! resolves to the documented default instead of an error.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entities::{Link, MediaPost, RawAnnouncement, RawEvent, RawPhoto};

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Card image: a stored photo or the generic placeholder visual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cover {
    Photo { file: String },
    Placeholder,
}

impl Cover {
    fn from_post(post: &Link<MediaPost>) -> Self {
        match post.get().and_then(MediaPost::cover_file) {
            Some(file) => Cover::Photo {
                file: file.to_string(),
            },
            None => Cover::Placeholder,
        }
    }

    pub fn file(&self) -> Option<&str> {
        match self {
            Cover::Photo { file } => Some(file),
            Cover::Placeholder => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EventCard {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub date_label: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub cover: Cover,
}

impl From<RawEvent> for EventCard {
    fn from(event: RawEvent) -> Self {
        Self {
            id: event.id,
            date_label: format_date_short(&event.date),
            cover: Cover::from_post(&event.post),
            title: event.title,
            date: event.date,
            time: event.time.filter(|time| !time.is_empty()),
            location: event.location.filter(|location| !location.is_empty()),
            description: event.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementCard {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub date: String,
    pub date_label: String,
    /// Raw category tag as stored.
    pub category: String,
    /// `important`, `announcement` or `other`.
    pub tone: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub cover: Cover,
}

impl From<RawAnnouncement> for AnnouncementCard {
    fn from(announcement: RawAnnouncement) -> Self {
        Self {
            id: announcement.id,
            date_label: format_date_numeric(&announcement.date),
            cover: Cover::from_post(&announcement.post),
            category: announcement.category.as_str().to_string(),
            tone: announcement.category.tone().to_string(),
            title: announcement.title,
            body: announcement.body,
            date: announcement.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PhotoCard {
    pub id: i64,
    pub file: String,
    pub title: String,
    pub category_title: String,
}

impl From<RawPhoto> for PhotoCard {
    fn from(photo: RawPhoto) -> Self {
        let category_title = category_title(&photo).to_string();
        Self {
            id: photo.id,
            file: photo.file,
            title: photo.title,
            category_title,
        }
    }
}

/// Category title reached through gallery → post → category, or `""`.
pub fn category_title(photo: &RawPhoto) -> &str {
    photo
        .galery
        .get()
        .and_then(|gallery| gallery.post.get())
        .and_then(|post| post.kategori.get())
        .map(|category| category.title.as_str())
        .unwrap_or_default()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)?.parse().ok()
}

/// `2025-01-05` → `5 Jan 2025`. Unparseable input is returned unchanged.
pub fn format_date_short(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => format!(
            "{} {} {}",
            date.day(),
            SHORT_MONTHS[date.month0() as usize],
            date.year()
        ),
        None => raw.to_string(),
    }
}

/// `2025-01-05` → `5/1/2025`. Unparseable input is returned unchanged.
pub fn format_date_numeric(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        None => raw.to_string(),
    }
}
