//! # Supabase Storage Rust Client
//!
//! A thin async client for the Supabase Storage API, covering object upload,
//! download, listing, signed URLs and bucket administration against any
//! Supabase project or self-hosted storage deployment.
//!
//! ## Features
//!
//! - **Bucket-scoped clients**: Each client binds one bucket; clone freely, clones share the connection pool
//! - **Async/await**: Built on Tokio and reqwest for efficient async operations
//! - **Typed options**: Builder-style option structs with explicit service defaults
//! - **Signed and public URLs**: Assembled client-side as single percent-encoded tokens
//! - **Streaming downloads**: Byte-stream variant for objects too large to buffer
//!
//! ## Quick Start
//!
//! ```no_run
//! use supabase_storage::{FileOptions, SearchOptions, StorageClient, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorageConfig::new("https://project.supabase.co", "service-role-key");
//!     let client = StorageClient::new(config, "avatars")?;
//!
//!     // Store an object
//!     client
//!         .upload("greetings/hello.txt", "Hello, World!", FileOptions::new())
//!         .await?;
//!
//!     // List what lives under a prefix
//!     let objects = client.list("greetings", SearchOptions::new()).await?;
//!     println!("{} objects under greetings/", objects.len());
//!
//!     // Fetch it back
//!     let data = client.download("greetings/hello.txt").await?;
//!     println!("retrieved {} bytes", data.len());
//!
//!     // Clean up
//!     client.remove(vec!["greetings/hello.txt".to_string()]).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Signed URLs
//!
//! ```no_run
//! use supabase_storage::{StorageClient, StorageConfig, UrlOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorageConfig::new("https://project.supabase.co", "service-role-key");
//! let client = StorageClient::new(config, "avatars")?;
//!
//! // Valid for one hour; ?download=true makes browsers save instead of render
//! let url = client
//!     .create_signed_url("reports/q3.pdf", 3600, UrlOptions::new().download(true))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Bucket Administration
//!
//! ```no_run
//! use supabase_storage::{BucketOptions, StorageClient, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorageConfig::new("https://project.supabase.co", "service-role-key");
//! let client = StorageClient::new(config, "avatars")?;
//!
//! client
//!     .create_bucket("reports", BucketOptions::new().public(false))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod bucket;
pub mod client;
pub mod config;
pub mod error;
mod path;
pub mod types;

// Re-export main types for convenience
pub use client::StorageClient;
pub use config::StorageConfig;
pub use error::{Error, Result};
pub use types::*;
