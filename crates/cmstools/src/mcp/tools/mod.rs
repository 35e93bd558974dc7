mod wordpress;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "cmstools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "create_article".to_string(),
            description: "Create a new article on the WordPress.com site. Saved as a draft by default; set status to publish it directly. Returns the article ID, URL and edit link. Requires WP_ACCESS_TOKEN and WP_SITE_ID environment variables.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Article title"
                    },
                    "content": {
                        "type": "string",
                        "description": "Article body; HTML markup is supported (<h2>, <p>, <ul>, ...)"
                    },
                    "excerpt": {
                        "type": "string",
                        "description": "Excerpt used for SEO and list views (optional)"
                    },
                    "categories": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Category names (e.g. ['Tech', 'AI'])"
                    },
                    "tags": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Tag names (e.g. ['rust', 'tutorial'])"
                    },
                    "status": {
                        "type": "string",
                        "enum": ["draft", "publish", "private"],
                        "description": "Initial status: draft (default), publish, or private",
                        "default": "draft"
                    },
                    "slug": {
                        "type": "string",
                        "description": "URL slug (optional, e.g. 'my-first-post')"
                    },
                    "featured_image": {
                        "type": "string",
                        "description": "Featured image URL (optional)"
                    }
                },
                "required": ["title", "content"]
            }),
        },
        Tool {
            name: "update_article".to_string(),
            description: "Update fields of an existing article. Only the supplied fields change; omitted fields keep their current values. Fails when no field to update is provided.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "integer",
                        "description": "ID of the article to update"
                    },
                    "title": {
                        "type": "string",
                        "description": "New title (optional)"
                    },
                    "content": {
                        "type": "string",
                        "description": "New body content (optional)"
                    },
                    "excerpt": {
                        "type": "string",
                        "description": "New excerpt (optional)"
                    },
                    "categories": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Replacement category names (optional; overwrites the current set)"
                    },
                    "tags": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Replacement tag names (optional; overwrites the current set)"
                    },
                    "slug": {
                        "type": "string",
                        "description": "New URL slug (optional)"
                    }
                },
                "required": ["post_id"]
            }),
        },
        Tool {
            name: "publish_article".to_string(),
            description: "Publish an article, turning a draft or private article public. Supports scheduled publishing via schedule_time.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "integer",
                        "description": "ID of the article to publish"
                    },
                    "schedule_time": {
                        "type": "string",
                        "description": "Scheduled publish time (optional, ISO 8601, e.g. '2024-12-25T10:00:00'). Omit to publish immediately."
                    }
                },
                "required": ["post_id"]
            }),
        },
        Tool {
            name: "unpublish_article".to_string(),
            description: "Take a published article offline by moving it to draft, private or trash.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "integer",
                        "description": "ID of the article to take offline"
                    },
                    "target_status": {
                        "type": "string",
                        "enum": ["draft", "private", "trash"],
                        "description": "Target status: draft (default), private, or trash",
                        "default": "draft"
                    }
                },
                "required": ["post_id"]
            }),
        },
        Tool {
            name: "get_article_metrics".to_string(),
            description: "Performance metrics for one article: views, likes, comments, word count, average daily views, with an optional per-day view breakdown. View counts are reconciled across the statistics endpoints.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "integer",
                        "description": "Article ID"
                    },
                    "days": {
                        "type": "integer",
                        "description": "Days-back window (default 30, clamped to 1..=365)",
                        "default": 30
                    },
                    "include_daily_breakdown": {
                        "type": "boolean",
                        "description": "Include the per-day view breakdown",
                        "default": false
                    }
                },
                "required": ["post_id"]
            }),
        },
        Tool {
            name: "list_articles_by_topic".to_string(),
            description: "List articles filtered by category, tag, status or search keyword. Returns pagination info, per-status roll-ups and per-article engagement numbers (views, likes, comments).".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Filter by category name"
                    },
                    "tag": {
                        "type": "string",
                        "description": "Filter by tag name"
                    },
                    "status": {
                        "type": "string",
                        "enum": ["publish", "draft", "private", "any"],
                        "description": "Filter by status (default: any)",
                        "default": "any"
                    },
                    "search": {
                        "type": "string",
                        "description": "Search keyword, matched in title and content"
                    },
                    "order_by": {
                        "type": "string",
                        "enum": ["date", "modified", "title", "comment_count", "views"],
                        "description": "Sort field (default: date). 'views' sorts the fetched page client-side.",
                        "default": "date"
                    },
                    "order": {
                        "type": "string",
                        "enum": ["DESC", "ASC"],
                        "description": "Sort direction (default: DESC)",
                        "default": "DESC"
                    },
                    "number": {
                        "type": "integer",
                        "description": "Page size (default 20, clamped to 1..=100)",
                        "default": 20
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number, 1-indexed",
                        "default": 1
                    },
                    "include_views": {
                        "type": "boolean",
                        "description": "Join per-post view counts from the statistics endpoint (default true; adds one API call)",
                        "default": true
                    }
                }
            }),
        },
        Tool {
            name: "get_site_stats".to_string(),
            description: "Site-wide statistics: today's views/visitors/likes/comments/followers, the top posts over the window, and basic site info. Every section is best-effort.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "days": {
                        "type": "integer",
                        "description": "Days-back window for the top-posts ranking (default 7)",
                        "default": 7
                    }
                }
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "create_article" => wordpress::handle_create_article(params.arguments, global).await,
        "update_article" => wordpress::handle_update_article(params.arguments, global).await,
        "publish_article" => wordpress::handle_publish_article(params.arguments, global).await,
        "unpublish_article" => wordpress::handle_unpublish_article(params.arguments, global).await,
        "get_article_metrics" => {
            wordpress::handle_get_article_metrics(params.arguments, global).await
        }
        "list_articles_by_topic" => {
            wordpress::handle_list_articles_by_topic(params.arguments, global).await
        }
        "get_site_stats" => wordpress::handle_get_site_stats(params.arguments, global).await,
        // Unknown tools go back through the error envelope so the caller
        // never sees a protocol fault for a bad tool name.
        name => wordpress::tool_error(crate::error::Error::UnknownTool(name.to_string()).to_string()),
    }
}
