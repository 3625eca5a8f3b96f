//! Run with: cargo run --bin cleanup

use mongodb::{bson::doc, Client};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let uri = env::var("MONGODB_URI").map_err(|_| anyhow::anyhow!("MONGODB_URI must be set"))?;
    let db_name = env::var("MONGODB_DATABASE").unwrap_or_else(|_| "podcast_scribe".to_string());

    println!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&uri).await?;
    let db = client.database(&db_name);

    let collection = db.collection::<mongodb::bson::Document>("podcast_summaries");
    let count = collection.count_documents(doc! {}).await?;

    println!("Dropping podcast_summaries collection ({} records)...", count);
    collection.drop().await?;
    println!("✓ podcast_summaries dropped");

    println!("\nCollections remaining:");
    let collections = db.list_collection_names().await?;
    for name in collections {
        println!("  - {}", name);
    }

    println!("\n✓ Cleanup complete!");
    Ok(())
}
