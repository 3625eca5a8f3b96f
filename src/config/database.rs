use bson::doc;
use mongodb::{Client, Database};

/// Opens the client and pings the server so a bad URI fails at startup
/// rather than on the first request.
pub async fn connect(uri: &str, db_name: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;
    let db = client.database(db_name);
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(db)
}
