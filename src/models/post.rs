use serde::{Deserialize, Serialize};

/// One uploaded image plus its sidecar metadata.
///
/// `id` and `filename` are always equal; the timestamp-derived filename is
/// the primary key and the storage path segment. Engagement counters are
/// regenerated on every listing read and zeroed at creation, they are not
/// persisted state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub timestamp: String,
    pub prompt: String,
    pub story: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

/// Metadata fields accepted alongside an image upload. All optional;
/// defaults are applied when the post is written.
#[derive(Debug, Default)]
pub struct UploadMeta {
    pub timestamp: Option<String>,
    pub prompt: Option<String>,
    pub story: Option<String>,
    pub kind: Option<String>,
}

pub const DEFAULT_PROMPT: &str = "No prompt available";
pub const DEFAULT_KIND: &str = "generated";
