//! Site-wide statistics models and transforms

use serde::{Deserialize, Serialize};

use super::stats::TopPostsResponse;

/// Response of `GET /sites/{site}/stats/summary`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteSummaryResponse {
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub visitors: Option<u64>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
}

/// Response of `GET /sites/{site}`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteInfoResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(default)]
    pub post_count: Option<u64>,
}

/// Site-level context attached to article metrics
///
/// Empty when the summary call failed; the metrics document is still valid.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SiteContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_views_today: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_visitors_today: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_followers: Option<u64>,
}

impl SiteContext {
    pub fn from_summary(summary: &SiteSummaryResponse) -> Self {
        Self {
            site_views_today: Some(summary.views.unwrap_or(0)),
            site_visitors_today: Some(summary.visitors.unwrap_or(0)),
            site_followers: Some(summary.followers.unwrap_or(0)),
        }
    }
}

/// Today's headline numbers for the site
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SiteToday {
    pub views: u64,
    pub visitors: u64,
    pub likes: u64,
    pub comments: u64,
    pub followers: u64,
}

/// One entry of the site-stats top-posts ranking
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TopPostSummary {
    pub id: Option<u64>,
    pub title: String,
    pub views: u64,
    pub url: String,
}

/// Basic site identity block
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    pub name: String,
    pub description: String,
    pub url: String,
    pub post_count: u64,
}

/// Output of the get_site_stats tool
#[derive(Debug, Serialize, Clone)]
pub struct SiteStatsOutput {
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<SiteToday>,
    pub top_posts: Vec<TopPostSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_info: Option<SiteInfo>,
}

/// Assemble the site statistics document from the three best-effort calls
///
/// Any section whose call failed is simply absent; the overall result never
/// fails on missing enrichment.
pub fn build_site_stats(
    summary: Option<SiteSummaryResponse>,
    top: Option<&TopPostsResponse>,
    info: Option<SiteInfoResponse>,
    days: u32,
) -> SiteStatsOutput {
    let today = summary.map(|s| SiteToday {
        views: s.views.unwrap_or(0),
        visitors: s.visitors.unwrap_or(0),
        likes: s.likes.unwrap_or(0),
        comments: s.comments.unwrap_or(0),
        followers: s.followers.unwrap_or(0),
    });

    let top_posts = top
        .and_then(|t| t.summary.as_ref())
        .map(|summary| {
            summary
                .postviews
                .iter()
                .take(10)
                .map(|entry| TopPostSummary {
                    id: entry.id,
                    title: entry.title.clone().unwrap_or_default(),
                    views: entry.views.unwrap_or(0),
                    url: entry.href.clone().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    let site_info = info.map(|i| SiteInfo {
        name: i.name.unwrap_or_default(),
        description: i.description.unwrap_or_default(),
        url: i.url.unwrap_or_default(),
        post_count: i.post_count.unwrap_or(0),
    });

    SiteStatsOutput {
        period: format!("last {days} days"),
        today,
        top_posts,
        site_info,
    }
}
