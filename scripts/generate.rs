//! Command-line client for the podcast generator.
//!
//! Run with: cargo run --bin generate -- "<title>" "<source text>"
//! or pipe the source text on stdin: cat notes.txt | cargo run --bin generate -- "<title>"

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::io::Read;
use std::time::Instant;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    title: String,
    text_content: String,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(rename = "podcastSummary")]
    podcast_summary: StoredSummary,
    podcast_script: String,
}

#[derive(Debug, Deserialize)]
struct StoredSummary {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    details: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = env::args().skip(1);
    let title = args.next().unwrap_or_else(|| "Podcast Summary".to_string());
    let text_content = match args.next() {
        Some(text) if text != "-" => text,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let base_url = env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    println!("\n🎙️  Generating podcast \"{}\" ({} chars)...\n", title, text_content.chars().count());

    let start = Instant::now();
    let response = Client::new()
        .post(format!("{}/podcast-summary", base_url.trim_end_matches('/')))
        .json(&CreateRequest { title, text_content })
        .send()
        .await;
    let elapsed = start.elapsed().as_millis();

    let response = match response {
        Ok(resp) => resp,
        Err(e) => {
            println!("❌ Request failed: {}. Is the server running at {}?", e, base_url);
            std::process::exit(1);
        }
    };

    let status = response.status();
    if status.is_success() {
        let created: CreateResponse = response.json().await?;
        println!("⏱️  Response time: {}ms", elapsed);
        println!(
            "📝 Saved as {} ({})\n",
            created.podcast_summary.id, created.podcast_summary.title
        );
        println!("{}", created.podcast_script);
        return Ok(());
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(err) => {
            println!("❌ Error ({}): {}", status, err.error);
            if let Some(details) = err.details {
                println!("   {}", details);
            }
        }
        Err(_) => println!("❌ Error ({}): {}", status, text),
    }
    std::process::exit(1);
}
