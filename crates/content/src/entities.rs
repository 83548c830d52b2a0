//! Raw rows as the content store returns them, nested joins included.
//!
//! Field names follow the backend columns (`judul`, `tanggal`, ...). Every link
//! in a join chain may legitimately be missing, so links are [`Link`] values and
//! child collections default to empty.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One optional hop in a join chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link<T> {
    Present(T),
    Absent,
}

impl<T> Link<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Link::Present(value) => Some(value),
            Link::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Link::Present(_))
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Link::Absent
    }
}

impl<T> From<Option<T>> for Link<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Link::Present(value),
            None => Link::Absent,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Link<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Link::from)
    }
}

impl<T: Serialize> Serialize for Link<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Link::Present(value) => serializer.serialize_some(value),
            Link::Absent => serializer.serialize_none(),
        }
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Event (agenda) row with its optional media chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: i64,
    #[serde(rename = "judul", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "tanggal", default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "waktu", default)]
    pub time: Option<String>,
    #[serde(rename = "lokasi", default)]
    pub location: Option<String>,
    #[serde(rename = "deskripsi", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub post: Link<MediaPost>,
}

/// Announcement (informasi) row with its optional media chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnnouncement {
    pub id: i64,
    #[serde(rename = "judul", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "isi", default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(rename = "tanggal", default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "keterangan", default, deserialize_with = "null_as_default")]
    pub category: AnnouncementKind,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub post: Link<MediaPost>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaPost {
    #[serde(rename = "galery", default, deserialize_with = "null_as_default")]
    pub galleries: Vec<MediaGallery>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaGallery {
    #[serde(rename = "foto", default, deserialize_with = "null_as_default")]
    pub photos: Vec<MediaPhoto>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaPhoto {
    #[serde(default)]
    pub file: Option<String>,
}

impl MediaPost {
    /// First gallery's first photo file, if the whole path exists.
    pub fn cover_file(&self) -> Option<&str> {
        self.galleries
            .first()?
            .photos
            .first()?
            .file
            .as_deref()
            .filter(|file| !file.is_empty())
    }
}

/// Category tag of an announcement (`keterangan`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnouncementKind {
    Important,
    Announcement,
    Other(String),
}

impl AnnouncementKind {
    pub fn as_str(&self) -> &str {
        match self {
            AnnouncementKind::Important => "penting",
            AnnouncementKind::Announcement => "pengumuman",
            AnnouncementKind::Other(raw) => raw,
        }
    }

    /// Display tone used to colour the tag.
    pub fn tone(&self) -> &'static str {
        match self {
            AnnouncementKind::Important => "important",
            AnnouncementKind::Announcement => "announcement",
            AnnouncementKind::Other(_) => "other",
        }
    }
}

impl Default for AnnouncementKind {
    fn default() -> Self {
        AnnouncementKind::Other(String::new())
    }
}

impl From<String> for AnnouncementKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "penting" => AnnouncementKind::Important,
            "pengumuman" => AnnouncementKind::Announcement,
            _ => AnnouncementKind::Other(raw),
        }
    }
}

impl From<AnnouncementKind> for String {
    fn from(kind: AnnouncementKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Gallery photo (foto) with its backward chain to the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPhoto {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(rename = "judul", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub galery: Link<PhotoGallery>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoGallery {
    #[serde(default)]
    pub post: Link<PhotoPost>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoPost {
    #[serde(default)]
    pub kategori: Link<PhotoCategory>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoCategory {
    #[serde(rename = "judul", default, deserialize_with = "null_as_default")]
    pub title: String,
}
