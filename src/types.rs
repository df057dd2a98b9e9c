use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sort column and direction for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub column: String,
    pub order: SortOrder,
}

impl SortBy {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }
}

impl Default for SortBy {
    /// The service default: sort by `name`, ascending.
    fn default() -> Self {
        Self {
            column: "name".to_string(),
            order: SortOrder::Asc,
        }
    }
}

/// Options for [`list`](crate::StorageClient::list). Unset fields take the
/// service defaults; [`merge_defaults`](Self::merge_defaults) is the merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of entries returned. Default: 100.
    pub limit: Option<u32>,
    /// Offset into the listing for pagination. Default: 0.
    pub offset: Option<u32>,
    /// Sort column and direction. Default: `name`, ascending.
    pub sort_by: Option<SortBy>,
    /// Substring filter on object names. No default; omitted when unset.
    pub search: Option<String>,
}

impl SearchOptions {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const DEFAULT_OFFSET: u32 = 0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(SortBy::new(column, order));
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply the service defaults to any unset field. Caller-supplied values
    /// always win; `search` stays optional.
    pub fn merge_defaults(&self) -> MergedSearchOptions {
        MergedSearchOptions {
            limit: self.limit.unwrap_or(Self::DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(Self::DEFAULT_OFFSET),
            sort_by: self.sort_by.clone().unwrap_or_default(),
            search: self.search.clone(),
        }
    }
}

/// Effective listing settings after defaults are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedSearchOptions {
    pub limit: u32,
    pub offset: u32,
    pub sort_by: SortBy,
    pub search: Option<String>,
}

/// Options for [`upload`](crate::StorageClient::upload) and
/// [`update`](crate::StorageClient::update). Unset fields take the service
/// defaults; [`merge_defaults`](Self::merge_defaults) is the merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOptions {
    /// Cache lifetime in seconds, sent as `cache-control: max-age={n}`.
    /// Default: 3600.
    pub cache_control: Option<u32>,
    /// MIME type of the stored object. Default: `text/plain;charset=UTF-8`.
    pub content_type: Option<String>,
    /// Create-or-replace semantics, sent as the `x-upsert` header.
    /// Default: false.
    pub upsert: Option<bool>,
}

impl FileOptions {
    pub const DEFAULT_CACHE_CONTROL: u32 = 3600;
    pub const DEFAULT_CONTENT_TYPE: &'static str = "text/plain;charset=UTF-8";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_control(mut self, seconds: u32) -> Self {
        self.cache_control = Some(seconds);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn upsert(mut self, upsert: bool) -> Self {
        self.upsert = Some(upsert);
        self
    }

    /// Apply the service defaults to any unset field. Caller-supplied values
    /// always win.
    pub fn merge_defaults(&self) -> MergedFileOptions {
        MergedFileOptions {
            cache_control: self.cache_control.unwrap_or(Self::DEFAULT_CACHE_CONTROL),
            content_type: self
                .content_type
                .clone()
                .unwrap_or_else(|| Self::DEFAULT_CONTENT_TYPE.to_string()),
            upsert: self.upsert.unwrap_or(false),
        }
    }
}

/// Effective upload/update settings after defaults are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFileOptions {
    pub cache_control: u32,
    pub content_type: String,
    pub upsert: bool,
}

/// Options for signed and public URL assembly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlOptions {
    /// Append `?download=true` so browsers save instead of render.
    pub download: bool,
}

impl UrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn download(mut self, download: bool) -> Self {
        self.download = download;
        self
    }
}

/// Options for bucket creation and updates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketOptions {
    /// Whether objects are readable without a credential. Default: false.
    pub public: bool,
    /// Per-object size cap in bytes; unlimited when unset.
    pub file_size_limit: Option<i64>,
    /// Accepted MIME types; unrestricted when unset.
    pub allowed_mime_types: Option<Vec<String>>,
}

impl BucketOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn file_size_limit(mut self, bytes: i64) -> Self {
        self.file_size_limit = Some(bytes);
        self
    }

    pub fn allowed_mime_types(mut self, types: Vec<String>) -> Self {
        self.allowed_mime_types = Some(types);
        self
    }
}

/// An object listed in or removed from a bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileObject {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub bucket_id: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_accessed_at: Option<DateTime<Utc>>,
    /// Service-defined blob of object stats (size, mimetype, eTag, …)
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// A bucket as reported by the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub file_size_limit: Option<i64>,
    #[serde(default)]
    pub allowed_mime_types: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Descriptor returned by upload and update
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    /// Full object path, `{bucket}/{key}`
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
}

/// Descriptor returned by copy
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CopyResponse {
    /// Full destination path, `{bucket}/{key}`
    #[serde(rename = "Key")]
    pub key: String,
}

/// Plain confirmation message
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Confirmation returned by bucket creation
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreateBucketResponse {
    pub name: String,
}

/// One assembled entry from a batch signing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    /// The path as it was requested
    pub path: String,
    /// Whole-string percent-encoded URL, ready to hand out
    pub signed_url: String,
}
