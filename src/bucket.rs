use crate::error::Result;
use crate::types::{Bucket, BucketOptions, CreateBucketResponse, MessageResponse};
use crate::StorageClient;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct BucketRequestBody<'a> {
    id: &'a str,
    name: &'a str,
    public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_size_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_mime_types: Option<&'a [String]>,
}

impl<'a> BucketRequestBody<'a> {
    fn new(id: &'a str, options: &'a BucketOptions) -> Self {
        Self {
            id,
            name: id,
            public: options.public,
            file_size_limit: options.file_size_limit,
            allowed_mime_types: options.allowed_mime_types.as_deref(),
        }
    }
}

/// Bucket administration. These calls address the whole deployment, not
/// just the bucket this client is bound to, and typically need a service
/// role credential.
impl StorageClient {
    /// List every bucket in the deployment
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        debug!("listing buckets");

        let response = self
            .request(Method::GET, "bucket")
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Fetch one bucket by id
    pub async fn get_bucket(&self, id: &str) -> Result<Bucket> {
        debug!(bucket = id, "fetching bucket");

        let response = self
            .request(Method::GET, &format!("bucket/{id}"))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Create a bucket named `id`
    pub async fn create_bucket(
        &self,
        id: &str,
        options: BucketOptions,
    ) -> Result<CreateBucketResponse> {
        debug!(bucket = id, public = options.public, "creating bucket");

        let response = self
            .request(Method::POST, "bucket")
            .json(&BucketRequestBody::new(id, &options))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Replace the settings of bucket `id`
    pub async fn update_bucket(
        &self,
        id: &str,
        options: BucketOptions,
    ) -> Result<MessageResponse> {
        debug!(bucket = id, public = options.public, "updating bucket");

        let response = self
            .request(Method::PUT, &format!("bucket/{id}"))
            .json(&BucketRequestBody::new(id, &options))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Delete every object in bucket `id`, leaving the bucket in place
    pub async fn empty_bucket(&self, id: &str) -> Result<MessageResponse> {
        debug!(bucket = id, "emptying bucket");

        let response = self
            .request(Method::POST, &format!("bucket/{id}/empty"))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Delete bucket `id`. The service refuses unless the bucket is empty.
    pub async fn delete_bucket(&self, id: &str) -> Result<MessageResponse> {
        debug!(bucket = id, "deleting bucket");

        let response = self
            .request(Method::DELETE, &format!("bucket/{id}"))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
