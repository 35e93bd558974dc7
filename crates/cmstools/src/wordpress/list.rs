//! List articles by filter criteria
//!
//! One GET for the page of posts, plus an optional top-posts call whose
//! per-post totals are joined onto the page. The view join runs over a fixed
//! 30-day window regardless of the caller's filters and never fails the
//! listing.

use clap::Args;
use serde::{Deserialize, Serialize};

use cmstools_core::wordpress::listing::{
    build_listing, clamp_number, ListingFilters, ListingOutput, ListingParams, PostsListResponse,
};
use cmstools_core::wordpress::stats::accumulate_views_map;

use crate::prelude::{eprintln, println, *};
use crate::wordpress::{fetch_top_posts, WpClient, LISTING_VIEWS_DAYS, TOP_POSTS_MAX};

/// Options for listing articles
#[derive(Debug, Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Everything, most recent first:
  cmstools wp list

  # Published articles in one category:
  cmstools wp list --category Tech --status publish

  # Full-text search across title and content:
  cmstools wp list --search \"rust async\"

  # Most viewed articles first (client-side sort over the fetched page):
  cmstools wp list --order-by views

  # Second page of 50:
  cmstools wp list --number 50 --page 2

NOTES:
  - number is clamped to 1..=100 and page starts at 1
  - order_by=views sorts only the fetched page, using a fixed 30-day window
  - view counts are best-effort; a stats failure lists articles with 0 views")]
pub struct ListOptions {
    /// Filter by category name
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by tag name
    #[arg(long)]
    pub tag: Option<String>,

    /// Filter by status: publish, draft, private or any
    #[arg(long, default_value = "any")]
    pub status: String,

    /// Search keyword (matched in title and content)
    #[arg(long)]
    pub search: Option<String>,

    /// Sort field: date, modified, title, comment_count or views
    #[arg(long, default_value = "date")]
    pub order_by: String,

    /// Sort direction: DESC or ASC
    #[arg(long, default_value = "DESC")]
    pub order: String,

    /// Page size (clamped to 1..=100)
    #[arg(short, long, default_value = "20")]
    pub number: i64,

    /// Page number, 1-indexed
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Skip the extra statistics call that joins per-post view counts
    #[arg(long)]
    pub skip_views: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
pub async fn list_articles_data(
    filters: ListingFilters,
    order_by: String,
    order: String,
    number: i64,
    page: u32,
    include_views: bool,
) -> Result<ListingOutput> {
    let number = clamp_number(number);
    let client = WpClient::from_env()?;

    let status = if filters.status.is_empty() {
        "any".to_string()
    } else {
        filters.status.clone()
    };

    let mut query: Vec<(&str, String)> = vec![
        ("number", number.to_string()),
        ("page", page.to_string()),
        ("order_by", order_by.clone()),
        ("order", order.clone()),
        ("status", status),
    ];
    if let Some(category) = &filters.category {
        query.push(("category", category.clone()));
    }
    if let Some(tag) = &filters.tag {
        query.push(("tag", tag.clone()));
    }
    if let Some(search) = &filters.search {
        query.push(("search", search.clone()));
    }

    let path = format!("/sites/{}/posts/", client.site_id());
    let page_data: PostsListResponse =
        super::decode(client.request(reqwest::Method::GET, &path, None, &query).await?)?;

    // Best-effort enrichment: the fixed window is independent of the
    // caller's filters, and a stats failure joins nothing.
    let views_map = if include_views {
        fetch_top_posts(&client, LISTING_VIEWS_DAYS, TOP_POSTS_MAX)
            .await
            .ok()
            .map(|top| accumulate_views_map(&top))
    } else {
        None
    };

    let params = ListingParams {
        filters,
        order_by,
        order,
        number,
        page,
        include_views,
    };

    Ok(build_listing(page_data, views_map.as_ref(), &params))
}

/// Handle the list command
pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Listing articles: status={}, order_by={}, page={}",
            options.status, options.order_by, options.page
        );
    }

    let filters = ListingFilters {
        category: options.category.clone(),
        tag: options.tag.clone(),
        status: options.status.clone(),
        search: options.search.clone(),
    };

    let data = list_articles_data(
        filters,
        options.order_by.clone(),
        options.order.clone(),
        options.number,
        options.page,
        !options.skip_views,
    )
    .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("Found {} article(s):\n", data.summary.total_articles);

    if data.articles.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row![
        "ID", "Title", "Status", "Views", "Likes", "Comments", "Date"
    ]);

    for article in &data.articles {
        table.add_row(prettytable::row![
            article.id,
            article.title,
            article.status,
            article.metrics.views,
            article.metrics.likes,
            article.metrics.comments,
            article.date.as_deref().unwrap_or("-")
        ]);
    }

    table.printstd();

    println!(
        "\nTotals for this page: {} views, {} likes, {} comments",
        data.summary.total_views, data.summary.total_likes, data.summary.total_comments
    );

    if data.pagination.total_pages > 1 {
        eprintln!(
            "\nPage {} of {} ({} total). Fetch the next page with:\n  cmstools wp list --page {}",
            data.pagination.page,
            data.pagination.total_pages,
            data.pagination.total,
            data.pagination.page + 1
        );
    }

    Ok(())
}
