//! Take an article offline

use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use cmstools_core::wordpress::post::{
    build_unpublish_payload, transform_unpublished, PostResponse, UnpublishedArticle,
};

use crate::prelude::{println, *};
use crate::wordpress::WpClient;

/// Options for unpublishing an article
#[derive(Debug, Args, Serialize, Deserialize, Clone)]
pub struct UnpublishOptions {
    /// ID of the article to take offline
    pub post_id: u64,

    /// Target status: draft, private or trash
    #[arg(long, default_value = "draft")]
    pub target_status: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
pub async fn unpublish_article_data(
    post_id: u64,
    target_status: &str,
) -> Result<UnpublishedArticle> {
    let client = WpClient::from_env()?;
    let payload = build_unpublish_payload(target_status);

    let path = format!("/sites/{}/posts/{}", client.site_id(), post_id);
    let value = client
        .request(reqwest::Method::POST, &path, Some(&payload), &[])
        .await?;

    let post: PostResponse = super::decode(value)?;
    Ok(transform_unpublished(&post, target_status))
}

/// Handle the unpublish command
pub async fn run(options: UnpublishOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Unpublishing article {} -> {}",
            options.post_id, options.target_status
        );
    }

    let article = unpublish_article_data(options.post_id, &options.target_status).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        println!("\n{}", article.message.yellow().bold());
        println!("Title: {}", article.title);
        println!("Status: {}", article.current_status);
    }

    Ok(())
}
