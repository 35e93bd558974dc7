//! Create a new article

use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use cmstools_core::wordpress::post::{
    build_create_payload, transform_created, CreateFields, CreatedArticle, PostResponse,
};

use crate::prelude::{println, *};
use crate::wordpress::WpClient;

/// Options for creating an article
#[derive(Debug, Args, Serialize, Deserialize, Clone)]
pub struct CreateOptions {
    /// Article title
    pub title: String,

    /// Article body; HTML markup is supported (<h2>, <p>, <ul>, ...)
    pub content: String,

    /// Excerpt used for SEO and list views
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Category name (repeat the flag for multiple categories)
    #[arg(long = "category")]
    pub categories: Option<Vec<String>>,

    /// Tag name (repeat the flag for multiple tags)
    #[arg(long = "tag")]
    pub tags: Option<Vec<String>>,

    /// Initial status: draft, publish or private
    #[arg(long, default_value = "draft")]
    pub status: String,

    /// URL slug (e.g. "my-first-post")
    #[arg(long)]
    pub slug: Option<String>,

    /// Featured image URL
    #[arg(long)]
    pub featured_image: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CreateOptions {
    fn into_fields(self) -> CreateFields {
        CreateFields {
            title: self.title,
            content: self.content,
            status: self.status,
            excerpt: self.excerpt,
            categories: self.categories,
            tags: self.tags,
            slug: self.slug,
            featured_image: self.featured_image,
        }
    }
}

/// Public data function - used by both CLI and MCP
pub async fn create_article_data(fields: CreateFields) -> Result<CreatedArticle> {
    let client = WpClient::from_env()?;
    let payload = build_create_payload(&fields);

    let path = format!("/sites/{}/posts/new", client.site_id());
    let value = client
        .request(reqwest::Method::POST, &path, Some(&payload), &[])
        .await?;

    let post: PostResponse = super::decode(value)?;
    Ok(transform_created(&post, client.site_id()))
}

/// Handle the create command
pub async fn run(options: CreateOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Creating article: {}", options.title);
    }

    let json = options.json;
    let article = create_article_data(options.into_fields()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        println!(
            "\n{}",
            format!("Created article {} ({})", article.post_id, article.status)
                .green()
                .bold()
        );
        println!("Title: {}", article.title);
        println!("URL: {}", article.url);
        println!("Edit: {}", article.edit_url);
    }

    Ok(())
}
