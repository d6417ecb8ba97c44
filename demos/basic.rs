//! Basic example demonstrating the content API client.
//!
//! Run with:
//! ```
//! CONTENT_API_APP=my-app CONTENT_API_SCHEMA=articles CONTENT_API_TOKEN=token \
//!     cargo run --example basic
//! ```

use contentapi::{ContentClient, ContentEntity, ContentQuery};
use serde_json::Value;

#[tokio::main]
async fn main() -> contentapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating content client...");
    let client: ContentClient<ContentEntity<Value>> = ContentClient::from_env()?;
    println!("Collection: {}", client.collection_url()?);

    // List the newest items
    println!("\n--- Listing Content (newest first) ---");
    let query = ContentQuery {
        top: Some(10),
        order_by: Some("created desc".to_string()),
        ..Default::default()
    };
    let items = client.list(&query).await?;
    println!("Found {} items (total: {})", items.len(), items.total);

    for item in &items {
        println!("  - {} [{:?}] v{}", item.id, item.status, item.version);
    }

    // Show the first item in full
    if let Some(first) = items.items.first() {
        println!("\n--- Item Details ---");
        let item = client.get(&first.id).await?;
        println!("Id: {}", item.id);
        println!("  Status: {:?}", item.status);
        println!("  Created: {:?} by {:?}", item.created, item.created_by);
        println!("  Modified: {:?} by {:?}", item.last_modified, item.last_modified_by);
        println!("  Data: {}", serde_json::to_string_pretty(&item.data)?);
    }

    // Free-text search
    if let Ok(term) = std::env::var("CONTENT_SEARCH") {
        println!("\n--- Searching for '{term}' ---");
        let query = ContentQuery {
            search: Some(term),
            ..Default::default()
        };
        let found = client.list(&query).await?;
        println!("Found {} matches", found.total);
    }

    println!("\nDone!");
    Ok(())
}
