//! Site-wide statistics
//!
//! Three best-effort calls (summary, top-posts ranking, site info); any of
//! them may fail without failing the tool.

use clap::Args;
use serde::{Deserialize, Serialize};

use cmstools_core::wordpress::site::{
    build_site_stats, SiteInfoResponse, SiteStatsOutput, SiteSummaryResponse,
};
use cmstools_core::wordpress::stats::clamp_days;

use crate::prelude::{println, *};
use crate::wordpress::{fetch_top_posts, WpClient};

/// Options for the site-stats command
#[derive(Debug, Args, Serialize, Deserialize, Clone)]
pub struct SiteStatsOptions {
    /// Days-back window for the top-posts ranking (clamped to 1..=365)
    #[arg(short, long, default_value = "7")]
    pub days: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
pub async fn site_stats_data(days: i64) -> Result<SiteStatsOutput> {
    let days = clamp_days(days);
    let client = WpClient::from_env()?;

    let summary_path = format!("/sites/{}/stats/summary", client.site_id());
    let summary = client
        .request(reqwest::Method::GET, &summary_path, None, &[])
        .await
        .ok()
        .and_then(|value| super::decode::<SiteSummaryResponse>(value).ok());

    let top = fetch_top_posts(&client, days, 10).await.ok();

    let info_path = format!("/sites/{}", client.site_id());
    let info = client
        .request(reqwest::Method::GET, &info_path, None, &[])
        .await
        .ok()
        .and_then(|value| super::decode::<SiteInfoResponse>(value).ok());

    Ok(build_site_stats(summary, top.as_ref(), info, days))
}

/// Handle the site-stats command
pub async fn run(options: SiteStatsOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching site statistics for the last {} days", options.days);
    }

    let data = site_stats_data(options.days).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    if let Some(info) = &data.site_info {
        println!("\n{} - {}", info.name, info.description);
        println!("{} ({} posts)", info.url, info.post_count);
    }

    if let Some(today) = &data.today {
        println!("\nToday:");
        let mut table = crate::prelude::new_table();
        table.add_row(prettytable::row!["Views", today.views]);
        table.add_row(prettytable::row!["Visitors", today.visitors]);
        table.add_row(prettytable::row!["Likes", today.likes]);
        table.add_row(prettytable::row!["Comments", today.comments]);
        table.add_row(prettytable::row!["Followers", today.followers]);
        table.printstd();
    }

    if !data.top_posts.is_empty() {
        println!("\nTop posts ({}):", data.period);
        let mut table = crate::prelude::new_table();
        table.add_row(prettytable::row!["Views", "Title", "URL"]);
        for post in &data.top_posts {
            table.add_row(prettytable::row![post.views, post.title, post.url]);
        }
        table.printstd();
    }

    Ok(())
}
