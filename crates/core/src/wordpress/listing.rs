//! Listing aggregation
//!
//! Turns one page of posts plus an optional per-post view map into the
//! listing document: filters echoed back, pagination, per-status roll-ups and
//! per-article summaries. View counts are a best-effort enrichment joined by
//! post ID; a missing entry is zero, never an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::post::PostResponse;

const EXCERPT_LIMIT: usize = 150;

/// Response of `GET /sites/{site}/posts/`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PostsListResponse {
    #[serde(default)]
    pub found: Option<u64>,
    #[serde(default)]
    pub posts: Vec<PostResponse>,
}

/// Filter criteria, echoed back in the listing output
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ListingFilters {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub status: String,
    pub search: Option<String>,
}

/// Query parameters of one listing call
#[derive(Debug, Clone)]
pub struct ListingParams {
    pub filters: ListingFilters,
    pub order_by: String,
    pub order: String,
    pub number: u32,
    pub page: u32,
    pub include_views: bool,
}

/// Pagination block of the listing output
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListingPagination {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

/// Post counts per known status
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub publish: u64,
    pub draft: u64,
    pub private: u64,
    pub future: u64,
}

/// Roll-up over the returned page (not over all matching posts)
#[derive(Debug, Serialize, Clone)]
pub struct ListingSummary {
    pub total_articles: usize,
    pub status_breakdown: StatusBreakdown,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

/// Engagement block of one article summary
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ArticleEngagement {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub word_count: u64,
}

/// One article in the listing
#[derive(Debug, Serialize, Clone)]
pub struct ArticleSummary {
    pub id: u64,
    pub title: String,
    pub status: String,
    pub url: String,
    pub date: Option<String>,
    pub modified: Option<String>,
    pub excerpt: String,
    pub metrics: ArticleEngagement,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Output of the list_articles_by_topic tool
#[derive(Debug, Serialize, Clone)]
pub struct ListingOutput {
    pub filters: ListingFilters,
    pub pagination: ListingPagination,
    pub summary: ListingSummary,
    pub articles: Vec<ArticleSummary>,
}

/// Clamp a page size to the closed range [1, 100]
pub fn clamp_number(number: i64) -> u32 {
    number.clamp(1, 100) as u32
}

/// First 150 characters plus an ellipsis marker; empty stays empty
///
/// Character-based so multi-byte excerpts never split inside a code point.
pub fn truncate_excerpt(excerpt: &str) -> String {
    if excerpt.is_empty() {
        return String::new();
    }
    let truncated: String = excerpt.chars().take(EXCERPT_LIMIT).collect();
    format!("{truncated}...")
}

/// Build the listing document from one fetched page
///
/// `views` is the multi-post reconciler's map when view data was requested
/// and available; posts missing from it report zero views. When ordering by
/// views the already-fetched page is re-sorted client-side (stable, so ties
/// keep the server order); every other order_by was already applied
/// server-side.
pub fn build_listing(
    page: PostsListResponse,
    views: Option<&HashMap<u64, u64>>,
    params: &ListingParams,
) -> ListingOutput {
    let total = page.found.unwrap_or(page.posts.len() as u64);

    let mut status_breakdown = StatusBreakdown::default();
    let mut total_views = 0u64;
    let mut total_likes = 0u64;
    let mut total_comments = 0u64;

    let mut articles: Vec<ArticleSummary> = page
        .posts
        .iter()
        .map(|post| {
            match post.status.as_str() {
                "publish" => status_breakdown.publish += 1,
                "draft" => status_breakdown.draft += 1,
                "private" => status_breakdown.private += 1,
                "future" => status_breakdown.future += 1,
                // Unrecognized statuses stay out of the breakdown but the
                // article itself is still listed.
                _ => {}
            }

            let post_views = views
                .and_then(|map| map.get(&post.id))
                .copied()
                .unwrap_or(0);
            let likes = post.like_count.unwrap_or(0);
            let comments = post.comment_count.unwrap_or(0);

            total_views += post_views;
            total_likes += likes;
            total_comments += comments;

            ArticleSummary {
                id: post.id,
                title: post.title.clone(),
                status: post.status.clone(),
                url: post.url.clone(),
                date: post.date.clone(),
                modified: post.modified.clone(),
                excerpt: truncate_excerpt(post.excerpt.as_deref().unwrap_or("")),
                metrics: ArticleEngagement {
                    views: post_views,
                    likes,
                    comments,
                    word_count: post.word_count.unwrap_or(0),
                },
                categories: post.category_names(),
                tags: post.tag_names(),
            }
        })
        .collect();

    if params.include_views && params.order_by == "views" {
        if params.order == "ASC" {
            articles.sort_by(|a, b| a.metrics.views.cmp(&b.metrics.views));
        } else {
            articles.sort_by(|a, b| b.metrics.views.cmp(&a.metrics.views));
        }
    }

    ListingOutput {
        filters: params.filters.clone(),
        pagination: ListingPagination {
            total,
            page: params.page,
            per_page: params.number,
            total_pages: total.div_ceil(params.number as u64),
        },
        summary: ListingSummary {
            total_articles: articles.len(),
            status_breakdown,
            total_views,
            total_likes,
            total_comments,
        },
        articles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_post(id: u64, status: &str, likes: u64, excerpt: &str) -> PostResponse {
        serde_json::from_value(serde_json::json!({
            "ID": id,
            "title": format!("Post {id}"),
            "URL": format!("https://example.wordpress.com/{id}"),
            "status": status,
            "date": "2024-01-01T00:00:00+00:00",
            "modified": "2024-01-02T00:00:00+00:00",
            "excerpt": excerpt,
            "like_count": likes,
            "comment_count": 1,
            "word_count": 100,
        }))
        .unwrap()
    }

    fn fixture_params(order_by: &str, order: &str, include_views: bool) -> ListingParams {
        ListingParams {
            filters: ListingFilters {
                category: None,
                tag: None,
                status: "any".to_string(),
                search: None,
            },
            order_by: order_by.to_string(),
            order: order.to_string(),
            number: 20,
            page: 1,
            include_views,
        }
    }

    #[test]
    fn test_clamp_number_range() {
        assert_eq!(clamp_number(0), 1);
        assert_eq!(clamp_number(-3), 1);
        assert_eq!(clamp_number(20), 20);
        assert_eq!(clamp_number(100), 100);
        assert_eq!(clamp_number(500), 100);
    }

    #[test]
    fn test_truncate_excerpt_long() {
        let long = "x".repeat(500);

        let truncated = truncate_excerpt(&long);

        // Exactly 150 characters plus the marker
        assert_eq!(truncated.len(), 153);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_excerpt_empty_has_no_marker() {
        assert_eq!(truncate_excerpt(""), "");
    }

    #[test]
    fn test_truncate_excerpt_multibyte() {
        // 200 two-byte characters; byte slicing at 150 would panic
        let excerpt = "é".repeat(200);

        let truncated = truncate_excerpt(&excerpt);

        assert_eq!(truncated.chars().count(), 153);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_build_listing_rollups_and_join() {
        // Arrange: two posts, only one present in the views map
        let page = PostsListResponse {
            found: Some(2),
            posts: vec![
                fixture_post(1, "publish", 3, "short"),
                fixture_post(2, "draft", 1, ""),
            ],
        };
        let views = HashMap::from([(1u64, 40u64)]);

        // Act
        let output = build_listing(page, Some(&views), &fixture_params("date", "DESC", true));

        // Assert: join defaults missing entries to zero
        assert_eq!(output.articles[0].metrics.views, 40);
        assert_eq!(output.articles[1].metrics.views, 0);
        assert_eq!(output.summary.total_views, 40);
        assert_eq!(output.summary.total_likes, 4);
        assert_eq!(output.summary.total_comments, 2);
        assert_eq!(output.summary.status_breakdown.publish, 1);
        assert_eq!(output.summary.status_breakdown.draft, 1);
        // Empty excerpt has no ellipsis marker
        assert_eq!(output.articles[1].excerpt, "");
    }

    #[test]
    fn test_build_listing_unknown_status_listed_but_not_counted() {
        let page = PostsListResponse {
            found: Some(1),
            posts: vec![fixture_post(1, "pending", 0, "")],
        };

        let output = build_listing(page, None, &fixture_params("date", "DESC", false));

        assert_eq!(output.articles.len(), 1);
        assert_eq!(output.summary.status_breakdown, StatusBreakdown::default());
    }

    #[test]
    fn test_build_listing_pagination_math() {
        let page = PostsListResponse {
            found: Some(45),
            posts: vec![fixture_post(1, "publish", 0, "")],
        };
        let mut params = fixture_params("date", "DESC", false);
        params.number = 20;
        params.page = 2;

        let output = build_listing(page, None, &params);

        assert_eq!(output.pagination.total, 45);
        assert_eq!(output.pagination.page, 2);
        assert_eq!(output.pagination.per_page, 20);
        // ceil(45 / 20)
        assert_eq!(output.pagination.total_pages, 3);
    }

    #[test]
    fn test_build_listing_total_falls_back_to_page_length() {
        let page = PostsListResponse {
            found: None,
            posts: vec![
                fixture_post(1, "publish", 0, ""),
                fixture_post(2, "publish", 0, ""),
            ],
        };

        let output = build_listing(page, None, &fixture_params("date", "DESC", false));

        assert_eq!(output.pagination.total, 2);
        assert_eq!(output.pagination.total_pages, 1);
    }

    #[test]
    fn test_build_listing_resorts_by_views_desc() {
        let page = PostsListResponse {
            found: Some(3),
            posts: vec![
                fixture_post(1, "publish", 0, ""),
                fixture_post(2, "publish", 0, ""),
                fixture_post(3, "publish", 0, ""),
            ],
        };
        let views = HashMap::from([(1u64, 5u64), (2, 50), (3, 20)]);

        let output = build_listing(page, Some(&views), &fixture_params("views", "DESC", true));

        let ids: Vec<u64> = output.articles.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_build_listing_resort_is_stable_on_ties() {
        let page = PostsListResponse {
            found: Some(3),
            posts: vec![
                fixture_post(1, "publish", 0, ""),
                fixture_post(2, "publish", 0, ""),
                fixture_post(3, "publish", 0, ""),
            ],
        };
        // Posts 1 and 3 tie; server order between them must be preserved
        let views = HashMap::from([(1u64, 10u64), (2, 99), (3, 10)]);

        let desc = build_listing(
            page.clone(),
            Some(&views),
            &fixture_params("views", "DESC", true),
        );
        assert_eq!(
            desc.articles.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![2, 1, 3]
        );

        let asc = build_listing(page, Some(&views), &fixture_params("views", "ASC", true));
        assert_eq!(
            asc.articles.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![1, 3, 2]
        );
    }

    #[test]
    fn test_build_listing_no_resort_without_views() {
        // order_by=views without the views join is passed through as-is
        let page = PostsListResponse {
            found: Some(2),
            posts: vec![
                fixture_post(1, "publish", 0, ""),
                fixture_post(2, "publish", 0, ""),
            ],
        };

        let output = build_listing(page, None, &fixture_params("views", "DESC", false));

        let ids: Vec<u64> = output.articles.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_build_listing_echoes_filters() {
        let page = PostsListResponse::default();
        let mut params = fixture_params("date", "DESC", true);
        params.filters = ListingFilters {
            category: Some("Tech".to_string()),
            tag: None,
            status: "publish".to_string(),
            search: Some("rust".to_string()),
        };

        let output = build_listing(page, None, &params);

        assert_eq!(output.filters.category.as_deref(), Some("Tech"));
        assert_eq!(output.filters.status, "publish");
        assert_eq!(output.filters.search.as_deref(), Some("rust"));
    }
}
