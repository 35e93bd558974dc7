//! Update fields of an existing article

use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use cmstools_core::wordpress::post::{
    build_update_payload, transform_updated, PostResponse, UpdateFields, UpdatedArticle,
};

use crate::prelude::{println, *};
use crate::wordpress::WpClient;

/// Options for updating an article
///
/// Omitted flags leave the corresponding remote fields unchanged.
#[derive(Debug, Args, Serialize, Deserialize, Clone)]
pub struct UpdateOptions {
    /// ID of the article to update
    pub post_id: u64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New body content
    #[arg(long)]
    pub content: Option<String>,

    /// New excerpt
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Replacement category name (repeat for multiple; overwrites the set)
    #[arg(long = "category")]
    pub categories: Option<Vec<String>>,

    /// Replacement tag name (repeat for multiple; overwrites the set)
    #[arg(long = "tag")]
    pub tags: Option<Vec<String>>,

    /// New URL slug
    #[arg(long)]
    pub slug: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl UpdateOptions {
    fn fields(&self) -> UpdateFields {
        UpdateFields {
            title: self.title.clone(),
            content: self.content.clone(),
            excerpt: self.excerpt.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// Public data function - used by both CLI and MCP
///
/// Rejects an empty update locally, before any client is built or any
/// request is sent.
pub async fn update_article_data(post_id: u64, fields: UpdateFields) -> Result<UpdatedArticle> {
    let payload = build_update_payload(&fields);
    if payload.is_empty() {
        return Err(Error::Validation("No fields to update were provided".to_string()).into());
    }

    let client = WpClient::from_env()?;
    let path = format!("/sites/{}/posts/{}", client.site_id(), post_id);
    let value = client
        .request(
            reqwest::Method::POST,
            &path,
            Some(&serde_json::Value::Object(payload)),
            &[],
        )
        .await?;

    let post: PostResponse = super::decode(value)?;
    Ok(transform_updated(&post))
}

/// Handle the update command
pub async fn run(options: UpdateOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Updating article {}", options.post_id);
    }

    let article = update_article_data(options.post_id, options.fields()).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        println!(
            "\n{}",
            format!("Updated article {}", article.post_id).green().bold()
        );
        println!("Title: {}", article.title);
        println!("Status: {}", article.status);
        if let Some(modified) = &article.modified_at {
            println!("Modified: {modified}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_update_is_rejected_locally() {
        // No optional fields supplied; the call must fail before any network
        // request, so no environment or server is needed here.
        let result = update_article_data(123, UpdateFields::default()).await;

        let err = result.expect_err("empty update must fail");
        assert!(err.to_string().contains("No fields to update"));
    }
}
