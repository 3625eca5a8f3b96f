pub mod podcast_summary;
