use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::path::object_path;
use crate::types::*;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// API version prefix appended to the configured base URL
const STORAGE_API_PATH: &str = "storage/v1";

/// Client for one bucket of a storage deployment.
///
/// Holds the immutable connection settings and the shared `reqwest` pool, so
/// cloning is cheap and clones may be used from any task. Every operation
/// performs exactly one HTTP exchange; the service, not the client, decides
/// retries and caching.
#[derive(Clone)]
pub struct StorageClient {
    http: Client,
    base_url: String,
    api_key: String,
    bucket_id: String,
}

#[derive(Serialize)]
struct ListRequestBody<'a> {
    prefix: &'a str,
    limit: u32,
    offset: u32,
    #[serde(rename = "sortBy")]
    sort_by: &'a SortBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequestBody<'a> {
    bucket_id: &'a str,
    source_key: &'a str,
    destination_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequestBody {
    expires_in: u32,
}

#[derive(Serialize)]
struct BatchSignRequestBody<'a> {
    paths: &'a [String],
    expires_in: u32,
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", default)]
    signed_url: Option<String>,
}

#[derive(Deserialize)]
struct BatchSignEntry {
    #[serde(default)]
    path: Option<String>,
    #[serde(rename = "signedURL", default)]
    signed_url: Option<String>,
}

#[derive(Serialize)]
struct RemoveRequestBody<'a> {
    prefixes: &'a [String],
}

impl StorageClient {
    /// Create a client bound to `bucket_id`, building a default transport.
    pub fn new(config: StorageConfig, bucket_id: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;
        Self::with_http_client(http, config, bucket_id)
    }

    /// Create a client on a caller-built transport. Timeouts, proxies and
    /// TLS policy belong to the supplied `reqwest::Client`.
    pub fn with_http_client(
        http: Client,
        config: StorageConfig,
        bucket_id: impl Into<String>,
    ) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::Configuration("base url is empty".to_string()));
        }
        if config.api_key.is_empty() {
            return Err(Error::Configuration("api key is empty".to_string()));
        }
        url::Url::parse(&config.base_url)?;

        Ok(Self {
            http,
            base_url: format!("{}/{}", config.base_url, STORAGE_API_PATH),
            api_key: config.api_key,
            bucket_id: bucket_id.into(),
        })
    }

    /// The bucket this client operates on
    pub fn bucket_id(&self) -> &str {
        &self.bucket_id
    }

    /// Storage API root this client talks to, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header(
                "x-client-info",
                concat!("storage-rs/", env!("CARGO_PKG_VERSION")),
            )
    }

    /// List objects under `prefix`, with paging and sorting applied from
    /// `options` (unset fields take the service defaults).
    pub async fn list(&self, prefix: &str, options: SearchOptions) -> Result<Vec<FileObject>> {
        let merged = options.merge_defaults();
        let body = ListRequestBody {
            prefix,
            limit: merged.limit,
            offset: merged.offset,
            sort_by: &merged.sort_by,
            search: merged.search.as_deref(),
        };
        debug!(bucket = %self.bucket_id, prefix, "listing objects");

        let response = self
            .request(Method::POST, &format!("object/list/{}", self.bucket_id))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn store_object(
        &self,
        method: Method,
        path: &str,
        data: Bytes,
        options: &FileOptions,
    ) -> Result<UploadResponse> {
        let merged = options.merge_defaults();
        let target = object_path(&self.bucket_id, path);
        debug!(object = %target, upsert = merged.upsert, "storing object");

        let response = self
            .request(method, &format!("object/{target}"))
            .header("x-upsert", if merged.upsert { "true" } else { "false" })
            .header("cache-control", format!("max-age={}", merged.cache_control))
            .header("content-type", merged.content_type)
            .body(data)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Store `data` at `path`. Fails on an existing object unless
    /// `options.upsert` is set.
    pub async fn upload(
        &self,
        path: &str,
        data: impl Into<Bytes>,
        options: FileOptions,
    ) -> Result<UploadResponse> {
        self.store_object(Method::POST, path, data.into(), &options)
            .await
    }

    /// Read a local file and store it at `path`
    pub async fn upload_file(
        &self,
        path: &str,
        source: impl AsRef<Path>,
        options: FileOptions,
    ) -> Result<UploadResponse> {
        let data = tokio::fs::read(source).await?;
        self.store_object(Method::POST, path, data.into(), &options)
            .await
    }

    /// Replace the object at `path` with `data`
    pub async fn update(
        &self,
        path: &str,
        data: impl Into<Bytes>,
        options: FileOptions,
    ) -> Result<UploadResponse> {
        self.store_object(Method::PUT, path, data.into(), &options)
            .await
    }

    /// Read a local file and replace the object at `path` with it
    pub async fn update_file(
        &self,
        path: &str,
        source: impl AsRef<Path>,
        options: FileOptions,
    ) -> Result<UploadResponse> {
        let data = tokio::fs::read(source).await?;
        self.store_object(Method::PUT, path, data.into(), &options)
            .await
    }

    /// Move an object within the bucket
    pub async fn move_object(&self, from_path: &str, to_path: &str) -> Result<MessageResponse> {
        let body = MoveRequestBody {
            bucket_id: &self.bucket_id,
            source_key: from_path,
            destination_key: to_path,
        };
        debug!(bucket = %self.bucket_id, from_path, to_path, "moving object");

        let response = self
            .request(Method::POST, "object/move")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Copy an object within the bucket
    pub async fn copy_object(&self, from_path: &str, to_path: &str) -> Result<CopyResponse> {
        let body = MoveRequestBody {
            bucket_id: &self.bucket_id,
            source_key: from_path,
            destination_key: to_path,
        };
        debug!(bucket = %self.bucket_id, from_path, to_path, "copying object");

        let response = self
            .request(Method::POST, "object/copy")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Ask the service to sign `path` for `expires_in` seconds and return
    /// the assembled URL as one percent-encoded token.
    pub async fn create_signed_url(
        &self,
        path: &str,
        expires_in: u32,
        options: UrlOptions,
    ) -> Result<String> {
        let target = object_path(&self.bucket_id, path);
        debug!(object = %target, expires_in, "signing object url");

        let response = self
            .request(Method::POST, &format!("object/sign/{target}"))
            .json(&SignRequestBody { expires_in })
            .send()
            .await?
            .error_for_status()?;

        let signed: SignResponse = response.json().await?;
        let signed_path = signed.signed_url.ok_or_else(|| {
            Error::MalformedResponse("signing response carried no signedURL field".to_string())
        })?;

        Ok(self.assemble_signed_url(&signed_path, options))
    }

    /// Sign several paths in one call. Paths are sent as given, relative to
    /// the bucket; each returned URL is assembled like
    /// [`create_signed_url`](Self::create_signed_url).
    pub async fn create_signed_urls(
        &self,
        paths: Vec<String>,
        expires_in: u32,
        options: UrlOptions,
    ) -> Result<Vec<SignedUrl>> {
        debug!(bucket = %self.bucket_id, count = paths.len(), expires_in, "signing object urls");

        let response = self
            .request(Method::POST, &format!("object/sign/{}", self.bucket_id))
            .json(&BatchSignRequestBody {
                paths: &paths,
                expires_in,
            })
            .send()
            .await?
            .error_for_status()?;

        let entries: Vec<BatchSignEntry> = response.json().await?;
        let mut urls = Vec::with_capacity(entries.len());
        for (entry, requested) in entries.into_iter().zip(paths) {
            let signed_path = entry.signed_url.ok_or_else(|| {
                Error::MalformedResponse(format!("no signedURL entry for {requested:?}"))
            })?;
            urls.push(SignedUrl {
                path: entry.path.unwrap_or(requested),
                signed_url: self.assemble_signed_url(&signed_path, options),
            });
        }

        Ok(urls)
    }

    fn assemble_signed_url(&self, signed_path: &str, options: UrlOptions) -> String {
        let mut url = format!("{}{}", self.base_url, signed_path);
        if options.download {
            url.push_str("?download=true");
        }
        urlencoding::encode(&url).into_owned()
    }

    /// Fetch an object's bytes
    pub async fn download(&self, path: &str) -> Result<Bytes> {
        debug!(bucket = %self.bucket_id, path, "downloading object");

        let response = self
            .request(Method::GET, &format!("object/{}/{}", self.bucket_id, path))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?)
    }

    /// Fetch an object as a byte stream, for bodies too large to buffer
    pub async fn download_stream(
        &self,
        path: &str,
    ) -> Result<impl Stream<Item = Result<Bytes>>> {
        debug!(bucket = %self.bucket_id, path, "downloading object stream");

        let response = self
            .request(Method::GET, &format!("object/{}/{}", self.bucket_id, path))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes_stream().map_err(Error::from))
    }

    /// Public URL for an object, as one percent-encoded token. Pure string
    /// assembly: no network call, and no check that the bucket is public.
    pub fn get_public_url(&self, path: &str, options: UrlOptions) -> String {
        let target = object_path(&self.bucket_id, path);
        let mut url = format!("{}/object/public/{}", self.base_url, target);
        if options.download {
            url.push_str("?download=true");
        }
        urlencoding::encode(&url).into_owned()
    }

    /// Delete the listed objects from the bucket
    pub async fn remove(&self, paths: Vec<String>) -> Result<Vec<FileObject>> {
        debug!(bucket = %self.bucket_id, count = paths.len(), "removing objects");

        let response = self
            .request(Method::DELETE, &format!("object/{}", self.bucket_id))
            .json(&RemoveRequestBody { prefixes: &paths })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StorageConfig {
        StorageConfig::new("https://proj.supabase.co", "service-key")
    }

    #[test]
    fn test_new_client() {
        let client = StorageClient::new(config(), "avatars");
        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.bucket_id(), "avatars");
        assert_eq!(client.base_url(), "https://proj.supabase.co/storage/v1");
    }

    #[test]
    fn test_new_client_rejects_empty_api_key() {
        let result = StorageClient::new(StorageConfig::new("https://proj.supabase.co", ""), "b");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_new_client_rejects_empty_base_url() {
        let result = StorageClient::new(StorageConfig::new("", "key"), "b");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_new_client_rejects_unparseable_base_url() {
        let result = StorageClient::new(StorageConfig::new("not a url", "key"), "b");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_public_url_is_pure_and_stable() {
        let client = StorageClient::new(config(), "avatars").unwrap();
        let first = client.get_public_url("/a//b.png/", UrlOptions::new());
        let second = client.get_public_url("/a//b.png/", UrlOptions::new());
        assert_eq!(first, second);
        assert_eq!(
            first,
            urlencoding::encode("https://proj.supabase.co/storage/v1/object/public/avatars/a/b.png")
        );
    }

    #[test]
    fn test_public_url_download_flag() {
        let client = StorageClient::new(config(), "avatars").unwrap();
        let url = client.get_public_url("b.png", UrlOptions::new().download(true));
        assert_eq!(
            url,
            urlencoding::encode(
                "https://proj.supabase.co/storage/v1/object/public/avatars/b.png?download=true"
            )
        );
    }

    #[tokio::test]
    async fn test_upload_sends_merged_option_headers() {
        use mockito::Server;

        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/storage/v1/object/avatars/photo.png")
            .match_header("x-upsert", "false")
            .match_header("cache-control", "max-age=3600")
            .match_header("content-type", "text/plain;charset=UTF-8")
            .match_header("authorization", "Bearer service-key")
            .with_status(200)
            .with_body(r#"{"Key": "avatars/photo.png"}"#)
            .create_async()
            .await;

        let client =
            StorageClient::new(StorageConfig::new(server.url(), "service-key"), "avatars").unwrap();
        let response = client
            .upload("photo.png", "pixels", FileOptions::new())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.key, "avatars/photo.png");
    }

    #[tokio::test]
    async fn test_download_returns_bytes() {
        use mockito::Server;

        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/storage/v1/object/avatars/photo.png")
            .with_status(200)
            .with_body("pixels")
            .create_async()
            .await;

        let client =
            StorageClient::new(StorageConfig::new(server.url(), "service-key"), "avatars").unwrap();
        let data = client.download("photo.png").await.unwrap();

        mock.assert_async().await;
        assert_eq!(data, Bytes::from("pixels"));
    }
}
