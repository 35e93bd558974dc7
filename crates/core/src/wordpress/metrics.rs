//! Metrics document assembly
//!
//! Combines a post document with the reconciled view total and the optional
//! site context into the final metrics structure.

use serde::Serialize;

use super::post::PostResponse;
use super::site::SiteContext;
use super::stats::{DailyViews, ViewSource, ViewTotal};

/// Engagement numbers for one article
#[derive(Debug, Serialize, Clone)]
pub struct ArticleMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub word_count: u64,
    pub views_source: ViewSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_daily_views: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Timestamps and reporting window
#[derive(Debug, Serialize, Clone)]
pub struct MetricsDates {
    pub published: Option<String>,
    pub modified: Option<String>,
    pub stats_period: String,
}

/// Category and tag names attached to the article
#[derive(Debug, Serialize, Clone)]
pub struct Taxonomy {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Full metrics document for one article
#[derive(Debug, Serialize, Clone)]
pub struct MetricsDocument {
    pub post_id: u64,
    pub title: String,
    pub status: String,
    pub url: String,
    pub metrics: ArticleMetrics,
    pub dates: MetricsDates,
    pub taxonomy: Taxonomy,
    pub site_context: SiteContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_breakdown: Option<Vec<DailyViews>>,
}

/// Assemble the metrics document
///
/// The average is only derived when there are views to average; a zero total
/// carries an explanatory note instead.
pub fn build_metrics(
    post: PostResponse,
    views: ViewTotal,
    site_context: SiteContext,
    days: u32,
    include_daily_breakdown: bool,
) -> MetricsDocument {
    let avg_daily_views = if days > 0 && views.total_views > 0 {
        Some((views.total_views as f64 / days as f64 * 100.0).round() / 100.0)
    } else {
        None
    };

    let note = if views.total_views == 0 {
        Some(
            "View data is not yet available (the article may be too new or has not been visited)"
                .to_string(),
        )
    } else {
        None
    };

    let daily_breakdown = if include_daily_breakdown && !views.daily.is_empty() {
        Some(views.daily)
    } else {
        None
    };

    MetricsDocument {
        post_id: post.id,
        title: post.title.clone(),
        status: post.status.clone(),
        url: post.url.clone(),
        metrics: ArticleMetrics {
            views: views.total_views,
            likes: post.like_count.unwrap_or(0),
            comments: post.comment_count.unwrap_or(0),
            word_count: post.word_count.unwrap_or(0),
            views_source: views.source,
            avg_daily_views,
            note,
        },
        dates: MetricsDates {
            published: post.date.clone(),
            modified: post.modified.clone(),
            stats_period: format!("last {days} days"),
        },
        taxonomy: Taxonomy {
            categories: post.category_names(),
            tags: post.tag_names(),
        },
        site_context,
        daily_breakdown,
    }
}
