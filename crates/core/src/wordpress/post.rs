//! Post document model and write-operation transforms
//!
//! The WordPress.com v1.1 posts endpoints all return the same post document.
//! Write operations (create/update/publish/unpublish) build their request
//! payloads here so the field-presence rules stay pure and testable: a field
//! that was not supplied by the caller is never sent, which for updates means
//! "leave unchanged".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Post document returned by the WordPress.com posts endpoints
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PostResponse {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(rename = "short_URL", default)]
    pub short_url: Option<String>,
    pub status: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub author: Option<PostAuthor>,
    // Categories and tags come back as objects keyed by name.
    #[serde(default)]
    pub categories: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub tags: BTreeMap<String, serde_json::Value>,
}

/// Author field of a post document
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PostAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

impl PostResponse {
    pub fn category_names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags.keys().cloned().collect()
    }
}

/// Fields for creating a new article
#[derive(Debug, Clone, Default)]
pub struct CreateFields {
    pub title: String,
    pub content: String,
    pub status: String,
    pub excerpt: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub slug: Option<String>,
    pub featured_image: Option<String>,
}

/// Optional fields for updating an existing article
///
/// `None` means "leave unchanged" and is distinct from an explicitly empty
/// value, which is sent and clears the remote field.
#[derive(Debug, Clone, Default)]
pub struct UpdateFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub slug: Option<String>,
}

/// Build the request body for `POST /sites/{site}/posts/new`
///
/// Category and tag lists are joined with "," as the v1.1 API expects.
pub fn build_create_payload(fields: &CreateFields) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "title": fields.title,
        "content": fields.content,
        "status": fields.status,
    });

    if let Some(excerpt) = &fields.excerpt {
        payload["excerpt"] = serde_json::json!(excerpt);
    }
    if let Some(categories) = &fields.categories {
        payload["categories"] = serde_json::json!(categories.join(","));
    }
    if let Some(tags) = &fields.tags {
        payload["tags"] = serde_json::json!(tags.join(","));
    }
    if let Some(slug) = &fields.slug {
        payload["slug"] = serde_json::json!(slug);
    }
    if let Some(featured_image) = &fields.featured_image {
        payload["featured_image"] = serde_json::json!(featured_image);
    }

    payload
}

/// Build the request body for `POST /sites/{site}/posts/{id}`
///
/// Only supplied fields are included; an empty map means there is nothing to
/// send and the caller must reject the update locally.
pub fn build_update_payload(fields: &UpdateFields) -> serde_json::Map<String, serde_json::Value> {
    let mut payload = serde_json::Map::new();

    if let Some(title) = &fields.title {
        payload.insert("title".to_string(), serde_json::json!(title));
    }
    if let Some(content) = &fields.content {
        payload.insert("content".to_string(), serde_json::json!(content));
    }
    if let Some(excerpt) = &fields.excerpt {
        payload.insert("excerpt".to_string(), serde_json::json!(excerpt));
    }
    if let Some(categories) = &fields.categories {
        payload.insert("categories".to_string(), serde_json::json!(categories.join(",")));
    }
    if let Some(tags) = &fields.tags {
        payload.insert("tags".to_string(), serde_json::json!(tags.join(",")));
    }
    if let Some(slug) = &fields.slug {
        payload.insert("slug".to_string(), serde_json::json!(slug));
    }

    payload
}

/// Build the publish payload and the action label that goes with it
///
/// A supplied schedule time switches the payload to a scheduled publish; the
/// timestamp is passed through verbatim and any format problem surfaces as a
/// remote error.
pub fn build_publish_payload(schedule_time: Option<&str>) -> (serde_json::Value, &'static str) {
    match schedule_time {
        Some(date) => (
            serde_json::json!({ "status": "future", "date": date }),
            "scheduled",
        ),
        None => (serde_json::json!({ "status": "publish" }), "published"),
    }
}

/// Build the unpublish payload for the chosen target status
pub fn build_unpublish_payload(target_status: &str) -> serde_json::Value {
    serde_json::json!({ "status": target_status })
}

/// Human-readable label for an unpublish target status
///
/// Unrecognized targets are echoed back raw.
pub fn status_label(status: &str) -> String {
    match status {
        "draft" => "Draft".to_string(),
        "private" => "Private".to_string(),
        "trash" => "Trash".to_string(),
        other => other.to_string(),
    }
}

/// Output for a freshly created article
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CreatedArticle {
    pub post_id: u64,
    pub title: String,
    pub status: String,
    pub url: String,
    pub short_url: String,
    pub edit_url: String,
    pub created_at: Option<String>,
    pub author: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Output for an updated article
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UpdatedArticle {
    pub post_id: u64,
    pub title: String,
    pub status: String,
    pub url: String,
    pub modified_at: Option<String>,
    pub message: String,
}

/// Output for a published (or scheduled) article
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PublishedArticle {
    pub post_id: u64,
    pub title: String,
    pub status: String,
    pub url: String,
    pub short_url: String,
    pub published_at: Option<String>,
    pub action: String,
    pub message: String,
}

/// Output for an unpublished article
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UnpublishedArticle {
    pub post_id: u64,
    pub title: String,
    pub previous_status: String,
    pub current_status: String,
    pub message: String,
}

/// Convert a created post document to the create-article output
pub fn transform_created(post: &PostResponse, site_id: &str) -> CreatedArticle {
    CreatedArticle {
        post_id: post.id,
        title: post.title.clone(),
        status: post.status.clone(),
        url: post.url.clone(),
        short_url: post.short_url.clone().unwrap_or_default(),
        edit_url: format!("https://wordpress.com/post/{}/{}", site_id, post.id),
        created_at: post.date.clone(),
        author: post
            .author
            .as_ref()
            .and_then(|a| a.name.clone())
            .unwrap_or_default(),
        categories: post.category_names(),
        tags: post.tag_names(),
    }
}

/// Convert an updated post document to the update-article output
pub fn transform_updated(post: &PostResponse) -> UpdatedArticle {
    UpdatedArticle {
        post_id: post.id,
        title: post.title.clone(),
        status: post.status.clone(),
        url: post.url.clone(),
        modified_at: post.modified.clone(),
        message: "Article updated successfully".to_string(),
    }
}

/// Convert a published post document to the publish-article output
pub fn transform_published(post: &PostResponse, action: &str) -> PublishedArticle {
    let message = if action == "scheduled" {
        "Article scheduled for publishing"
    } else {
        "Article published"
    };

    PublishedArticle {
        post_id: post.id,
        title: post.title.clone(),
        status: post.status.clone(),
        url: post.url.clone(),
        short_url: post.short_url.clone().unwrap_or_default(),
        published_at: post.date.clone(),
        action: action.to_string(),
        message: message.to_string(),
    }
}

/// Convert an unpublished post document to the unpublish-article output
pub fn transform_unpublished(post: &PostResponse, target_status: &str) -> UnpublishedArticle {
    UnpublishedArticle {
        post_id: post.id,
        title: post.title.clone(),
        // The tool only makes sense on a published article, so the previous
        // status is reported as "publish" without an extra read.
        previous_status: "publish".to_string(),
        current_status: post.status.clone(),
        message: format!(
            "Article unpublished, current status: {}",
            status_label(target_status)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to create a post response for testing
    fn create_post_response(id: u64, title: &str, status: &str) -> PostResponse {
        let mut categories = BTreeMap::new();
        categories.insert("Tech".to_string(), serde_json::json!({"ID": 1}));
        let mut tags = BTreeMap::new();
        tags.insert("rust".to_string(), serde_json::json!({"ID": 2}));

        PostResponse {
            id,
            title: title.to_string(),
            url: format!("https://example.wordpress.com/{id}"),
            short_url: Some(format!("https://wp.me/{id}")),
            status: status.to_string(),
            date: Some("2024-01-01T10:00:00+00:00".to_string()),
            modified: Some("2024-01-02T10:00:00+00:00".to_string()),
            excerpt: None,
            slug: Some("test-post".to_string()),
            like_count: Some(3),
            comment_count: Some(1),
            word_count: Some(120),
            author: Some(PostAuthor {
                name: Some("Ada".to_string()),
            }),
            categories,
            tags,
        }
    }

    #[test]
    fn test_build_create_payload_required_only() {
        // Arrange: only the required fields
        let fields = CreateFields {
            title: "Hello".to_string(),
            content: "<p>World</p>".to_string(),
            status: "draft".to_string(),
            ..Default::default()
        };

        // Act
        let payload = build_create_payload(&fields);

        // Assert: optional keys are absent, not null
        assert_eq!(payload["title"], "Hello");
        assert_eq!(payload["content"], "<p>World</p>");
        assert_eq!(payload["status"], "draft");
        assert!(payload.get("excerpt").is_none());
        assert!(payload.get("categories").is_none());
        assert!(payload.get("tags").is_none());
        assert!(payload.get("slug").is_none());
        assert!(payload.get("featured_image").is_none());
    }

    #[test]
    fn test_build_create_payload_joins_taxonomy() {
        // Arrange
        let fields = CreateFields {
            title: "Hello".to_string(),
            content: "body".to_string(),
            status: "publish".to_string(),
            categories: Some(vec!["Tech".to_string(), "AI".to_string()]),
            tags: Some(vec!["rust".to_string()]),
            ..Default::default()
        };

        // Act
        let payload = build_create_payload(&fields);

        // Assert: lists are joined with commas
        assert_eq!(payload["categories"], "Tech,AI");
        assert_eq!(payload["tags"], "rust");
    }

    #[test]
    fn test_build_update_payload_empty_when_no_fields() {
        // Arrange: no optional fields supplied
        let fields = UpdateFields::default();

        // Act
        let payload = build_update_payload(&fields);

        // Assert: nothing to send
        assert!(payload.is_empty());
    }

    #[test]
    fn test_build_update_payload_only_supplied_fields() {
        // Arrange
        let fields = UpdateFields {
            title: Some("New title".to_string()),
            tags: Some(vec!["a".to_string(), "b".to_string()]),
            ..Default::default()
        };

        // Act
        let payload = build_update_payload(&fields);

        // Assert
        assert_eq!(payload.len(), 2);
        assert_eq!(payload["title"], "New title");
        assert_eq!(payload["tags"], "a,b");
        assert!(!payload.contains_key("content"));
    }

    #[test]
    fn test_build_update_payload_keeps_explicit_empty() {
        // Arrange: explicitly empty excerpt clears the remote field
        let fields = UpdateFields {
            excerpt: Some(String::new()),
            ..Default::default()
        };

        // Act
        let payload = build_update_payload(&fields);

        // Assert
        assert_eq!(payload.len(), 1);
        assert_eq!(payload["excerpt"], "");
    }

    #[test]
    fn test_build_publish_payload_immediate() {
        let (payload, action) = build_publish_payload(None);

        assert_eq!(payload, serde_json::json!({"status": "publish"}));
        assert_eq!(action, "published");
    }

    #[test]
    fn test_build_publish_payload_scheduled() {
        let (payload, action) = build_publish_payload(Some("2024-12-25T10:00:00"));

        assert_eq!(
            payload,
            serde_json::json!({"status": "future", "date": "2024-12-25T10:00:00"})
        );
        assert_eq!(action, "scheduled");
    }

    #[test]
    fn test_build_publish_payload_passes_timestamp_verbatim() {
        // Malformed timestamps are not validated locally
        let (payload, _) = build_publish_payload(Some("not-a-date"));

        assert_eq!(payload["date"], "not-a-date");
    }

    #[test]
    fn test_status_label_known_and_unknown() {
        assert_eq!(status_label("draft"), "Draft");
        assert_eq!(status_label("private"), "Private");
        assert_eq!(status_label("trash"), "Trash");
        // Unrecognized values are echoed raw
        assert_eq!(status_label("pending"), "pending");
    }

    #[test]
    fn test_transform_created() {
        let post = create_post_response(42, "Hello", "draft");

        let output = transform_created(&post, "12345");

        assert_eq!(output.post_id, 42);
        assert_eq!(output.title, "Hello");
        assert_eq!(output.status, "draft");
        assert_eq!(output.edit_url, "https://wordpress.com/post/12345/42");
        assert_eq!(output.author, "Ada");
        assert_eq!(output.categories, vec!["Tech"]);
        assert_eq!(output.tags, vec!["rust"]);
    }

    #[test]
    fn test_transform_created_minimal_post() {
        // A post document without author/short_URL still transforms
        let post = PostResponse {
            id: 7,
            title: "Bare".to_string(),
            url: "https://example.wordpress.com/bare".to_string(),
            short_url: None,
            status: "draft".to_string(),
            date: None,
            modified: None,
            excerpt: None,
            slug: None,
            like_count: None,
            comment_count: None,
            word_count: None,
            author: None,
            categories: BTreeMap::new(),
            tags: BTreeMap::new(),
        };

        let output = transform_created(&post, "12345");

        assert_eq!(output.short_url, "");
        assert_eq!(output.author, "");
        assert_eq!(output.created_at, None);
        assert!(output.categories.is_empty());
    }

    #[test]
    fn test_transform_published_actions() {
        let post = create_post_response(9, "Launch", "publish");

        let published = transform_published(&post, "published");
        assert_eq!(published.action, "published");
        assert_eq!(published.message, "Article published");

        let scheduled = transform_published(&post, "scheduled");
        assert_eq!(scheduled.message, "Article scheduled for publishing");
    }

    #[test]
    fn test_transform_unpublished_label() {
        let post = create_post_response(9, "Retire", "trash");

        let output = transform_unpublished(&post, "trash");

        assert_eq!(output.previous_status, "publish");
        assert_eq!(output.current_status, "trash");
        assert_eq!(output.message, "Article unpublished, current status: Trash");
    }

    #[test]
    fn test_post_response_parses_api_shape() {
        // The v1.1 API uses ID/URL casing and name-keyed taxonomy objects
        let value = serde_json::json!({
            "ID": 101,
            "title": "Shaped",
            "URL": "https://example.wordpress.com/shaped",
            "short_URL": "https://wp.me/x",
            "status": "publish",
            "date": "2024-03-01T00:00:00+00:00",
            "modified": "2024-03-02T00:00:00+00:00",
            "like_count": 5,
            "comment_count": 2,
            "word_count": 900,
            "author": {"name": "Grace"},
            "categories": {"Tech": {"ID": 1}, "AI": {"ID": 2}},
            "tags": {}
        });

        let post: PostResponse = serde_json::from_value(value).unwrap();

        assert_eq!(post.id, 101);
        assert_eq!(post.url, "https://example.wordpress.com/shaped");
        // BTreeMap keys come back sorted
        assert_eq!(post.category_names(), vec!["AI", "Tech"]);
        assert!(post.tag_names().is_empty());
    }
}
