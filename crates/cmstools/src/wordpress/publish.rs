//! Publish an article, immediately or at a scheduled time

use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use cmstools_core::wordpress::post::{
    build_publish_payload, transform_published, PostResponse, PublishedArticle,
};

use crate::prelude::{println, *};
use crate::wordpress::WpClient;

/// Options for publishing an article
#[derive(Debug, Args, Serialize, Deserialize, Clone)]
pub struct PublishOptions {
    /// ID of the article to publish
    pub post_id: u64,

    /// Schedule time (ISO 8601, e.g. "2024-12-25T10:00:00"); omit to publish
    /// immediately. The value is passed through verbatim.
    #[arg(long)]
    pub schedule_time: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
pub async fn publish_article_data(
    post_id: u64,
    schedule_time: Option<String>,
) -> Result<PublishedArticle> {
    let client = WpClient::from_env()?;
    let (payload, action) = build_publish_payload(schedule_time.as_deref());

    let path = format!("/sites/{}/posts/{}", client.site_id(), post_id);
    let value = client
        .request(reqwest::Method::POST, &path, Some(&payload), &[])
        .await?;

    let post: PostResponse = super::decode(value)?;
    Ok(transform_published(&post, action))
}

/// Handle the publish command
pub async fn run(options: PublishOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Publishing article {} (schedule: {:?})",
            options.post_id, options.schedule_time
        );
    }

    let article = publish_article_data(options.post_id, options.schedule_time).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        println!("\n{}", article.message.green().bold());
        println!("Title: {}", article.title);
        println!("Status: {}", article.status);
        println!("URL: {}", article.url);
        if let Some(published) = &article.published_at {
            println!("Date: {published}");
        }
    }

    Ok(())
}
