use supabase_storage::{FileOptions, StorageClient, StorageConfig, UrlOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Pull connection settings from the environment (or a local .env file)
    dotenvy::dotenv().ok();
    let base_url = std::env::var("SUPABASE_URL")?;
    let api_key = std::env::var("SUPABASE_SERVICE_KEY")?;
    let bucket = std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "quickstart".to_string());

    println!("==> Signed URL Example");

    let config = StorageConfig::new(base_url, api_key);
    let client = StorageClient::new(config, &bucket)?;
    println!("✓ Created client for bucket '{}'", client.bucket_id());

    // Seed a couple of objects to sign
    let keys = ["signed/report.txt", "signed/summary.txt"];
    for key in keys {
        client
            .upload(key, format!("contents of {key}"), FileOptions::new().upsert(true))
            .await?;
        println!("✓ Uploaded object: {}", key);
    }

    // A URL valid for one hour
    let url = client
        .create_signed_url(keys[0], 3600, UrlOptions::new())
        .await?;
    println!("✓ Signed URL (1h): {}", url);

    // The same object, but forcing a browser download
    let url = client
        .create_signed_url(keys[0], 3600, UrlOptions::new().download(true))
        .await?;
    println!("✓ Signed URL (1h, download): {}", url);

    // Sign both objects in one round trip
    let urls = client
        .create_signed_urls(keys.iter().map(|k| k.to_string()).collect(), 600, UrlOptions::new())
        .await?;
    println!("✓ Batch signed {} URLs (10m):", urls.len());
    for signed in &urls {
        println!("  - {}: {}", signed.path, signed.signed_url);
    }

    // Public URL assembly needs no network call at all
    let public = client.get_public_url(keys[0], UrlOptions::new());
    println!("✓ Public URL: {}", public);

    // Clean up
    client
        .remove(keys.iter().map(|k| k.to_string()).collect())
        .await?;
    println!("✓ Removed {} objects", keys.len());

    println!("\n==> Signed URL example completed successfully!");

    Ok(())
}
