use supabase_storage::{FileOptions, SearchOptions, SortOrder, StorageClient, StorageConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Pull connection settings from the environment (or a local .env file)
    dotenvy::dotenv().ok();
    let base_url = std::env::var("SUPABASE_URL")?;
    let api_key = std::env::var("SUPABASE_SERVICE_KEY")?;
    let bucket = std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "quickstart".to_string());

    println!("==> Storage Quickstart");

    let config = StorageConfig::new(base_url, api_key);
    let client = StorageClient::new(config, &bucket)?;
    println!("✓ Created client for bucket '{}'", client.bucket_id());

    // Store an object; upsert makes reruns of this demo idempotent
    let key = "demo/hello.txt";
    let upload = client
        .upload(
            key,
            "Hello from the storage client!",
            FileOptions::new()
                .content_type("text/plain")
                .upsert(true),
        )
        .await?;
    println!("✓ Uploaded object: {}", upload.key);

    // List what lives under the demo prefix, newest first
    let objects = client
        .list(
            "demo",
            SearchOptions::new()
                .limit(10)
                .sort_by("created_at", SortOrder::Desc),
        )
        .await?;
    println!("✓ Listed {} objects under 'demo/'", objects.len());
    for object in &objects {
        println!("  - {}", object.name);
    }

    // Fetch it back
    let data = client.download(key).await?;
    println!("✓ Downloaded {} bytes", data.len());
    println!("  Data: {:?}", String::from_utf8_lossy(&data));

    // Rearrange: move, then keep a copy
    client.move_object(key, "demo/hello-moved.txt").await?;
    println!("✓ Moved object to demo/hello-moved.txt");

    let copy = client
        .copy_object("demo/hello-moved.txt", "demo/hello-copy.txt")
        .await?;
    println!("✓ Copied object to {}", copy.key);

    // Clean up
    let removed = client
        .remove(vec![
            "demo/hello-moved.txt".to_string(),
            "demo/hello-copy.txt".to_string(),
        ])
        .await?;
    println!("✓ Removed {} objects", removed.len());

    println!("\n==> Quickstart completed successfully!");

    Ok(())
}
