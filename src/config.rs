/// Connection settings for a storage deployment.
///
/// The library never reads the process environment; callers resolve
/// credentials however they like (see the demos for a `dotenv`-style
/// bootstrap) and pass them in here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Project base URL, e.g. `https://abcdefgh.supabase.co`. The storage
    /// API root (`/storage/v1`) is appended by the client.
    pub base_url: String,
    /// Service or anon key, sent as the bearer credential on every call.
    pub api_key: String,
}

impl StorageConfig {
    /// Create a config, trimming any trailing slash from the base URL.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}
