//! View-count reconciliation across the statistics endpoints
//!
//! WordPress.com reports views from two surfaces with different shapes: the
//! top-posts endpoint (an aggregate `summary` list plus a per-day map keyed by
//! date string) and the per-post stats endpoint (a flat total plus a
//! date-to-count map). The functions here merge those into one [`ViewTotal`].
//!
//! The single-post path treats the two views of the top-posts response as
//! alternative measurements: a summary hit is authoritative and the per-day
//! walk only contributes the daily breakdown. The multi-post path
//! ([`accumulate_views_map`]) sums summary and per-day counts for the same
//! post instead. The asymmetry is intentional and pinned by tests.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response of `GET /sites/{site}/stats/top-posts`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TopPostsResponse {
    #[serde(default)]
    pub summary: Option<TopPostsSummary>,
    #[serde(default)]
    pub days: Option<BTreeMap<String, DaySummary>>,
}

/// Aggregate section of the top-posts response
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TopPostsSummary {
    #[serde(default)]
    pub postviews: Vec<PostViewEntry>,
}

/// One day's entry in the top-posts `days` map
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DaySummary {
    #[serde(default)]
    pub postviews: Vec<PostViewEntry>,
}

/// A single post's view count as reported by top-posts
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PostViewEntry {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Response of `GET /sites/{site}/stats/post/{id}`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PostStatsResponse {
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub data: Option<BTreeMap<String, u64>>,
}

/// How many views a post received on one day
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DailyViews {
    pub date: String,
    pub views: u64,
}

/// Which endpoint produced a view total
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ViewSource {
    #[serde(rename = "top-posts-summary")]
    TopPostsSummary,
    #[serde(rename = "top-posts")]
    TopPosts,
    #[serde(rename = "post-stats")]
    PostStats,
    #[serde(rename = "unavailable")]
    Unavailable,
}

/// Reconciled view count for one post
#[derive(Debug, Serialize, Clone)]
pub struct ViewTotal {
    pub post_id: u64,
    pub total_views: u64,
    pub source: ViewSource,
    pub daily: Vec<DailyViews>,
}

impl ViewTotal {
    /// The result when no statistics source answered for this post
    pub fn unavailable(post_id: u64) -> Self {
        Self {
            post_id,
            total_views: 0,
            source: ViewSource::Unavailable,
            daily: Vec::new(),
        }
    }
}

/// Clamp a days-back window to the closed range [1, 365]
pub fn clamp_days(days: i64) -> u32 {
    days.clamp(1, 365) as u32
}

/// Reconcile one post's views from a top-posts response
///
/// Summary hit wins outright; otherwise the per-day entries are summed. The
/// daily breakdown is built from the per-day walk either way (when requested)
/// and never feeds back into a summary total.
pub fn views_from_top_posts(
    top: &TopPostsResponse,
    post_id: u64,
    include_daily: bool,
) -> ViewTotal {
    let summary_views = top
        .summary
        .as_ref()
        .and_then(|s| s.postviews.iter().find(|p| p.id == Some(post_id)))
        .map(|p| p.views.unwrap_or(0));

    let mut day_total = 0u64;
    let mut daily = Vec::new();
    if let Some(days) = &top.days {
        for (date, day) in days {
            if let Some(entry) = day.postviews.iter().find(|p| p.id == Some(post_id)) {
                let views = entry.views.unwrap_or(0);
                day_total += views;
                if include_daily {
                    daily.push(DailyViews {
                        date: date.clone(),
                        views,
                    });
                }
            }
        }
    }
    sort_daily_descending(&mut daily);

    match summary_views {
        Some(total_views) => ViewTotal {
            post_id,
            total_views,
            source: ViewSource::TopPostsSummary,
            daily,
        },
        None if day_total > 0 => ViewTotal {
            post_id,
            total_views: day_total,
            source: ViewSource::TopPosts,
            daily,
        },
        None => ViewTotal {
            post_id,
            total_views: 0,
            source: ViewSource::Unavailable,
            daily,
        },
    }
}

/// Adopt a per-post stats response as the view total
pub fn views_from_post_stats(
    stats: &PostStatsResponse,
    post_id: u64,
    include_daily: bool,
) -> ViewTotal {
    let mut daily = Vec::new();
    if include_daily {
        if let Some(data) = &stats.data {
            for (date, views) in data {
                daily.push(DailyViews {
                    date: date.clone(),
                    views: *views,
                });
            }
        }
    }
    sort_daily_descending(&mut daily);

    ViewTotal {
        post_id,
        total_views: stats.views.unwrap_or(0),
        source: ViewSource::PostStats,
        daily,
    }
}

/// Per-post view totals for every post mentioned in a top-posts response
///
/// Summary entries seed the map and per-day entries are added on top, so a
/// post present in both sections gets the sum of the two. Used by the listing
/// join, where no per-post fallback call is economical.
pub fn accumulate_views_map(top: &TopPostsResponse) -> HashMap<u64, u64> {
    let mut views_map = HashMap::new();

    if let Some(summary) = &top.summary {
        for entry in &summary.postviews {
            if let Some(id) = entry.id {
                views_map.insert(id, entry.views.unwrap_or(0));
            }
        }
    }

    if let Some(days) = &top.days {
        for day in days.values() {
            for entry in &day.postviews {
                if let Some(id) = entry.id {
                    *views_map.entry(id).or_insert(0) += entry.views.unwrap_or(0);
                }
            }
        }
    }

    views_map
}

/// Most recent day first; unparseable date strings sort last
fn sort_daily_descending(daily: &mut [DailyViews]) {
    fn date_key(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    daily.sort_by(|a, b| match (date_key(&a.date), date_key(&b.date)) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.date.cmp(&a.date),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to build a top-posts response from summary entries and day rows
    fn top_posts(
        summary: Option<Vec<(u64, u64)>>,
        days: Vec<(&str, Vec<(u64, u64)>)>,
    ) -> TopPostsResponse {
        let summary = summary.map(|entries| TopPostsSummary {
            postviews: entries
                .into_iter()
                .map(|(id, views)| PostViewEntry {
                    id: Some(id),
                    views: Some(views),
                    ..Default::default()
                })
                .collect(),
        });

        let days = if days.is_empty() {
            None
        } else {
            Some(
                days.into_iter()
                    .map(|(date, entries)| {
                        (
                            date.to_string(),
                            DaySummary {
                                postviews: entries
                                    .into_iter()
                                    .map(|(id, views)| PostViewEntry {
                                        id: Some(id),
                                        views: Some(views),
                                        ..Default::default()
                                    })
                                    .collect(),
                            },
                        )
                    })
                    .collect(),
            )
        };

        TopPostsResponse { summary, days }
    }

    #[test]
    fn test_summary_wins_over_day_sum() {
        // Arrange: post 1 has 50 in the summary but 80 across the days
        let top = top_posts(
            Some(vec![(1, 50)]),
            vec![("2024-01-01", vec![(1, 30)]), ("2024-01-02", vec![(1, 50)])],
        );

        // Act
        let total = views_from_top_posts(&top, 1, false);

        // Assert: summary is authoritative, no summation
        assert_eq!(total.total_views, 50);
        assert_eq!(total.source, ViewSource::TopPostsSummary);
    }

    #[test]
    fn test_summary_hit_still_builds_daily_breakdown() {
        let top = top_posts(
            Some(vec![(1, 50)]),
            vec![("2024-01-01", vec![(1, 30)]), ("2024-01-02", vec![(1, 50)])],
        );

        let total = views_from_top_posts(&top, 1, true);

        assert_eq!(total.total_views, 50);
        assert_eq!(total.daily.len(), 2);
        // Most recent first
        assert_eq!(total.daily[0].date, "2024-01-02");
        assert_eq!(total.daily[1].date, "2024-01-01");
    }

    #[test]
    fn test_day_sum_when_absent_from_summary() {
        // Arrange: summary lists another post only
        let top = top_posts(
            Some(vec![(2, 10)]),
            vec![("2024-01-01", vec![(1, 30)]), ("2024-01-02", vec![(1, 50)])],
        );

        // Act
        let total = views_from_top_posts(&top, 1, true);

        // Assert: days are summed for the target post
        assert_eq!(total.total_views, 80);
        assert_eq!(total.source, ViewSource::TopPosts);
        assert_eq!(total.daily.len(), 2);
    }

    #[test]
    fn test_unavailable_when_post_not_mentioned() {
        let top = top_posts(Some(vec![(2, 10)]), vec![("2024-01-01", vec![(2, 5)])]);

        let total = views_from_top_posts(&top, 1, true);

        assert_eq!(total.total_views, 0);
        assert_eq!(total.source, ViewSource::Unavailable);
        assert!(total.daily.is_empty());
    }

    #[test]
    fn test_empty_response_is_unavailable() {
        let total = views_from_top_posts(&TopPostsResponse::default(), 1, true);

        assert_eq!(total.total_views, 0);
        assert_eq!(total.source, ViewSource::Unavailable);
    }

    #[test]
    fn test_multi_post_map_sums_summary_and_days() {
        // Same fixture as the priority test: 50 in summary + 80 across days
        let top = top_posts(
            Some(vec![(1, 50), (2, 7)]),
            vec![("2024-01-01", vec![(1, 30)]), ("2024-01-02", vec![(1, 50)])],
        );

        let views_map = accumulate_views_map(&top);

        // The multi-post path deliberately sums where the single-post path
        // picks, so the same inputs yield 130 here.
        assert_eq!(views_map.get(&1), Some(&130));
        assert_eq!(views_map.get(&2), Some(&7));
    }

    #[test]
    fn test_multi_post_map_ignores_entries_without_id() {
        let top = TopPostsResponse {
            summary: Some(TopPostsSummary {
                postviews: vec![
                    PostViewEntry {
                        id: None,
                        views: Some(99),
                        ..Default::default()
                    },
                    PostViewEntry {
                        id: Some(3),
                        views: Some(4),
                        ..Default::default()
                    },
                ],
            }),
            days: None,
        };

        let views_map = accumulate_views_map(&top);

        assert_eq!(views_map.len(), 1);
        assert_eq!(views_map.get(&3), Some(&4));
    }

    #[test]
    fn test_post_stats_adopted_with_breakdown() {
        // Arrange: the per-post endpoint's flat shape
        let stats = PostStatsResponse {
            views: Some(12),
            data: Some(BTreeMap::from([
                ("2024-01-01".to_string(), 5),
                ("2024-01-02".to_string(), 7),
            ])),
        };

        // Act
        let total = views_from_post_stats(&stats, 1, true);

        // Assert
        assert_eq!(total.total_views, 12);
        assert_eq!(total.source, ViewSource::PostStats);
        assert_eq!(total.daily.len(), 2);
        assert_eq!(total.daily[0].date, "2024-01-02");
        assert_eq!(total.daily.iter().map(|d| d.views).sum::<u64>(), 12);
    }

    #[test]
    fn test_post_stats_without_breakdown_request() {
        let stats = PostStatsResponse {
            views: Some(12),
            data: Some(BTreeMap::from([("2024-01-01".to_string(), 12)])),
        };

        let total = views_from_post_stats(&stats, 1, false);

        assert_eq!(total.total_views, 12);
        assert!(total.daily.is_empty());
    }

    #[test]
    fn test_post_stats_missing_views_field() {
        let total = views_from_post_stats(&PostStatsResponse::default(), 1, true);

        assert_eq!(total.total_views, 0);
        assert_eq!(total.source, ViewSource::PostStats);
    }

    #[test]
    fn test_daily_ordering_is_calendar_aware() {
        // Newest first, across a year boundary
        let top = top_posts(
            None,
            vec![
                ("2024-01-09", vec![(1, 1)]),
                ("2024-01-10", vec![(1, 2)]),
                ("2023-12-31", vec![(1, 3)]),
            ],
        );

        let total = views_from_top_posts(&top, 1, true);

        let dates: Vec<&str> = total.daily.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-10", "2024-01-09", "2023-12-31"]);
    }

    #[test]
    fn test_clamp_days_range() {
        assert_eq!(clamp_days(0), 1);
        assert_eq!(clamp_days(-5), 1);
        assert_eq!(clamp_days(30), 30);
        assert_eq!(clamp_days(365), 365);
        assert_eq!(clamp_days(9999), 365);
    }

    #[test]
    fn test_top_posts_parses_api_shape() {
        // The days section is keyed by date string
        let value = serde_json::json!({
            "summary": {"postviews": [{"id": 1, "title": "A", "views": 50, "href": "https://x"}]},
            "days": {
                "2024-01-01": {"postviews": [{"id": 1, "views": 30}]},
                "2024-01-02": {"postviews": [{"id": 1, "views": 50}]}
            }
        });

        let top: TopPostsResponse = serde_json::from_value(value).unwrap();

        assert_eq!(top.summary.as_ref().unwrap().postviews.len(), 1);
        assert_eq!(top.days.as_ref().unwrap().len(), 2);
    }
}
