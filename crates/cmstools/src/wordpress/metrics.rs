//! Performance metrics for one article
//!
//! Issues up to four API calls in a fixed sequential order: the post
//! document (hard requirement), the top-posts statistics, the per-post
//! statistics fallback when needed, and the site summary (best-effort
//! context only).

use clap::Args;
use serde::{Deserialize, Serialize};

use cmstools_core::wordpress::metrics::{build_metrics, MetricsDocument};
use cmstools_core::wordpress::post::PostResponse;
use cmstools_core::wordpress::site::{SiteContext, SiteSummaryResponse};
use cmstools_core::wordpress::stats::clamp_days;

use crate::prelude::{println, *};
use crate::wordpress::{resolve_post_views, WpClient};

/// Options for the metrics command
#[derive(Debug, Args, Serialize, Deserialize, Clone)]
pub struct MetricsOptions {
    /// Article ID
    pub post_id: u64,

    /// Days-back window (clamped to 1..=365)
    #[arg(short, long, default_value = "30")]
    pub days: i64,

    /// Include the per-day view breakdown
    #[arg(long)]
    pub daily_breakdown: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
pub async fn article_metrics_data(
    post_id: u64,
    days: i64,
    include_daily_breakdown: bool,
) -> Result<MetricsDocument> {
    let days = clamp_days(days);
    let client = WpClient::from_env()?;

    // The post document is the one hard requirement; its failure fails the
    // whole call.
    let path = format!("/sites/{}/posts/{}", client.site_id(), post_id);
    let post: PostResponse =
        super::decode(client.request(reqwest::Method::GET, &path, None, &[]).await?)?;

    let views = resolve_post_views(&client, post_id, days, include_daily_breakdown).await;

    // Site summary is display context only; a failure degrades to an empty
    // block instead of failing the metrics call.
    let summary_path = format!("/sites/{}/stats/summary", client.site_id());
    let site_context = match client
        .request(reqwest::Method::GET, &summary_path, None, &[])
        .await
    {
        Ok(value) => super::decode::<SiteSummaryResponse>(value)
            .map(|summary| SiteContext::from_summary(&summary))
            .unwrap_or_default(),
        Err(_) => SiteContext::default(),
    };

    Ok(build_metrics(
        post,
        views,
        site_context,
        days,
        include_daily_breakdown,
    ))
}

/// Handle the metrics command
pub async fn run(options: MetricsOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Fetching metrics for article {} over {} days",
            options.post_id, options.days
        );
    }

    let doc = article_metrics_data(options.post_id, options.days, options.daily_breakdown).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("\n{} ({})", doc.title, doc.status);
        println!("{}", doc.url);
        println!();

        let mut table = crate::prelude::new_table();
        table.add_row(prettytable::row!["Views", doc.metrics.views]);
        table.add_row(prettytable::row!["Likes", doc.metrics.likes]);
        table.add_row(prettytable::row!["Comments", doc.metrics.comments]);
        table.add_row(prettytable::row!["Words", doc.metrics.word_count]);
        if let Some(avg) = doc.metrics.avg_daily_views {
            table.add_row(prettytable::row!["Avg daily views", avg]);
        }
        table.printstd();

        println!(
            "\nPeriod: {} (views from {})",
            doc.dates.stats_period,
            serde_json::to_value(doc.metrics.views_source)?
                .as_str()
                .unwrap_or("unknown")
        );

        if let Some(note) = &doc.metrics.note {
            println!("Note: {note}");
        }

        if let Some(daily) = &doc.daily_breakdown {
            println!("\nDaily views:");
            for day in daily {
                println!("  {}  {}", day.date, day.views);
            }
        }
    }

    Ok(())
}
