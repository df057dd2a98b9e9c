use supabase_storage::{
    BucketOptions, Error, FileOptions, SearchOptions, StorageClient, StorageConfig, UrlOptions,
};
use std::env;

// Helpers to pull deployment settings from the environment (or a .env file)

fn storage_config() -> StorageConfig {
    dotenvy::dotenv().ok();
    let base_url =
        env::var("SUPABASE_URL").unwrap_or_else(|_| "http://localhost:54321".to_string());
    let api_key = env::var("SUPABASE_SERVICE_KEY")
        .expect("SUPABASE_SERVICE_KEY must be set for integration tests");
    StorageConfig::new(base_url, api_key)
}

fn test_bucket() -> String {
    env::var("STORAGE_TEST_BUCKET").unwrap_or_else(|_| "integration-tests".to_string())
}

// Object Round Trips

#[tokio::test]
#[ignore = "Requires a live storage deployment"]
async fn test_upload_download_remove_round_trip() {
    let client = StorageClient::new(storage_config(), test_bucket()).unwrap();

    let key = "round-trip/hello.txt";
    let contents = "Hello, integration world!";

    let upload = client
        .upload(key, contents, FileOptions::new().upsert(true))
        .await
        .unwrap();
    assert!(upload.key.ends_with("hello.txt"));

    let data = client.download(key).await.unwrap();
    assert_eq!(data, contents.as_bytes());

    let removed = client.remove(vec![key.to_string()]).await.unwrap();
    assert_eq!(removed.len(), 1);

    // Gone after removal
    let result = client.download(key).await;
    match result {
        Err(Error::Http(e)) => assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND)),
        other => panic!("Expected 404 after removal, got: {:?}", other),
    }
}

#[tokio::test]
#[ignore = "Requires a live storage deployment"]
async fn test_list_objects_under_prefix() {
    let client = StorageClient::new(storage_config(), test_bucket()).unwrap();

    // Create test objects
    let keys: Vec<String> = (0..3).map(|i| format!("list-test/file{}.txt", i)).collect();
    for key in &keys {
        client
            .upload(key, format!("Content of {key}"), FileOptions::new().upsert(true))
            .await
            .unwrap();
    }

    let objects = client
        .list("list-test", SearchOptions::new().limit(10))
        .await
        .unwrap();
    assert!(objects.len() >= 3, "Expected at least 3 objects: {:?}", objects);

    // Cleanup
    client.remove(keys).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires a live storage deployment"]
async fn test_move_and_copy() {
    let client = StorageClient::new(storage_config(), test_bucket()).unwrap();

    let original = "move-test/original.txt";
    client
        .upload(original, "movable contents", FileOptions::new().upsert(true))
        .await
        .unwrap();

    client
        .move_object(original, "move-test/moved.txt")
        .await
        .unwrap();

    let copy = client
        .copy_object("move-test/moved.txt", "move-test/copied.txt")
        .await
        .unwrap();
    assert!(copy.key.ends_with("copied.txt"));

    let data = client.download("move-test/copied.txt").await.unwrap();
    assert_eq!(data, "movable contents".as_bytes());

    // Cleanup
    client
        .remove(vec![
            "move-test/moved.txt".to_string(),
            "move-test/copied.txt".to_string(),
        ])
        .await
        .unwrap();
}

// Signed URLs

#[tokio::test]
#[ignore = "Requires a live storage deployment"]
async fn test_signed_url_assembly() {
    let client = StorageClient::new(storage_config(), test_bucket()).unwrap();

    let key = "signed-test/report.txt";
    client
        .upload(key, "signable contents", FileOptions::new().upsert(true))
        .await
        .unwrap();

    let url = client
        .create_signed_url(key, 3600, UrlOptions::new())
        .await
        .unwrap();
    assert!(!url.is_empty());

    // The token decodes back to an absolute URL under the API root
    let decoded = urlencoding::decode(&url).unwrap();
    assert!(decoded.starts_with(client.base_url()));
    assert!(decoded.contains("token="));

    let batch = client
        .create_signed_urls(vec![key.to_string()], 600, UrlOptions::new())
        .await
        .unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].path, key);

    // Cleanup
    client.remove(vec![key.to_string()]).await.unwrap();
}

// Bucket Administration

#[tokio::test]
#[ignore = "Requires a live storage deployment and a service role key"]
async fn test_bucket_admin_round_trip() {
    let client = StorageClient::new(storage_config(), test_bucket()).unwrap();

    let bucket_id = format!("it-bucket-{}", chrono::Utc::now().timestamp());

    let created = client
        .create_bucket(&bucket_id, BucketOptions::new().public(false))
        .await
        .unwrap();
    assert_eq!(created.name, bucket_id);

    let bucket = client.get_bucket(&bucket_id).await.unwrap();
    assert_eq!(bucket.id, bucket_id);
    assert!(!bucket.public);

    client
        .update_bucket(&bucket_id, BucketOptions::new().public(true))
        .await
        .unwrap();
    let bucket = client.get_bucket(&bucket_id).await.unwrap();
    assert!(bucket.public);

    let buckets = client.list_buckets().await.unwrap();
    assert!(buckets.iter().any(|b| b.id == bucket_id));

    // Cleanup
    client.empty_bucket(&bucket_id).await.unwrap();
    client.delete_bucket(&bucket_id).await.unwrap();
}

// Error Handling

#[tokio::test]
#[ignore = "Requires a live storage deployment"]
async fn test_download_nonexistent_object() {
    let client = StorageClient::new(storage_config(), test_bucket()).unwrap();

    let result = client
        .download("nonexistent/file-does-not-exist.txt")
        .await;

    assert!(result.is_err());
    match result {
        Err(Error::Http(e)) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND));
        }
        other => panic!("Expected 404 http error, got: {:?}", other),
    }
}
