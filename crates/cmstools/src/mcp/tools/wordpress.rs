use crate::prelude::{eprintln, *};
use serde::{Deserialize, Serialize};

use cmstools_core::wordpress::listing::ListingFilters;
use cmstools_core::wordpress::post::{CreateFields, UpdateFields};

use super::{CallToolResult, Content, JsonRpcError};

/// Wrap a successful tool output as an MCP result
fn tool_result(output: &impl Serialize) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(output).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

/// Wrap any tool failure as an MCP error envelope
///
/// Every failure of a tool execution - bad arguments, validation errors,
/// transport errors - goes through here so callers always get the same
/// `{isError: true}` shape instead of a protocol fault.
pub(super) fn tool_error(message: String) -> Result<serde_json::Value, JsonRpcError> {
    let result = CallToolResult {
        content: vec![Content::Text { text: message }],
        is_error: Some(true),
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

fn parse_args<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, String> {
    // A missing arguments object is fine for tools whose parameters are all
    // optional; required fields still produce a "missing field" message.
    let value = match arguments {
        None | Some(serde_json::Value::Null) => serde_json::Value::Object(serde_json::Map::new()),
        Some(value) => value,
    };
    serde_json::from_value(value).map_err(|e| format!("Invalid arguments: {e}"))
}

pub async fn handle_create_article(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CreateArticleArgs {
        title: String,
        content: String,
        excerpt: Option<String>,
        categories: Option<Vec<String>>,
        tags: Option<Vec<String>>,
        status: Option<String>,
        slug: Option<String>,
        featured_image: Option<String>,
    }

    let args: CreateArticleArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return tool_error(message),
    };

    if global.verbose {
        eprintln!("Calling create_article: title={}", args.title);
    }

    let fields = CreateFields {
        title: args.title,
        content: args.content,
        status: args.status.unwrap_or_else(|| "draft".to_string()),
        excerpt: args.excerpt,
        categories: args.categories,
        tags: args.tags,
        slug: args.slug,
        featured_image: args.featured_image,
    };

    match crate::wordpress::create_article_data(fields).await {
        Ok(article) => tool_result(&article),
        Err(e) => tool_error(format!("{e}")),
    }
}

pub async fn handle_update_article(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UpdateArticleArgs {
        post_id: u64,
        title: Option<String>,
        content: Option<String>,
        excerpt: Option<String>,
        categories: Option<Vec<String>>,
        tags: Option<Vec<String>>,
        slug: Option<String>,
    }

    let args: UpdateArticleArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return tool_error(message),
    };

    if global.verbose {
        eprintln!("Calling update_article: post_id={}", args.post_id);
    }

    let fields = UpdateFields {
        title: args.title,
        content: args.content,
        excerpt: args.excerpt,
        categories: args.categories,
        tags: args.tags,
        slug: args.slug,
    };

    match crate::wordpress::update_article_data(args.post_id, fields).await {
        Ok(article) => tool_result(&article),
        Err(e) => tool_error(format!("{e}")),
    }
}

pub async fn handle_publish_article(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct PublishArticleArgs {
        post_id: u64,
        schedule_time: Option<String>,
    }

    let args: PublishArticleArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return tool_error(message),
    };

    if global.verbose {
        eprintln!(
            "Calling publish_article: post_id={}, schedule_time={:?}",
            args.post_id, args.schedule_time
        );
    }

    match crate::wordpress::publish_article_data(args.post_id, args.schedule_time).await {
        Ok(article) => tool_result(&article),
        Err(e) => tool_error(format!("{e}")),
    }
}

pub async fn handle_unpublish_article(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UnpublishArticleArgs {
        post_id: u64,
        target_status: Option<String>,
    }

    let args: UnpublishArticleArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return tool_error(message),
    };

    if global.verbose {
        eprintln!("Calling unpublish_article: post_id={}", args.post_id);
    }

    let target_status = args.target_status.unwrap_or_else(|| "draft".to_string());

    match crate::wordpress::unpublish_article_data(args.post_id, &target_status).await {
        Ok(article) => tool_result(&article),
        Err(e) => tool_error(format!("{e}")),
    }
}

pub async fn handle_get_article_metrics(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetArticleMetricsArgs {
        post_id: u64,
        days: Option<i64>,
        include_daily_breakdown: Option<bool>,
    }

    let args: GetArticleMetricsArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return tool_error(message),
    };

    if global.verbose {
        eprintln!(
            "Calling get_article_metrics: post_id={}, days={:?}",
            args.post_id, args.days
        );
    }

    match crate::wordpress::article_metrics_data(
        args.post_id,
        args.days.unwrap_or(30),
        args.include_daily_breakdown.unwrap_or(false),
    )
    .await
    {
        Ok(doc) => tool_result(&doc),
        Err(e) => tool_error(format!("{e}")),
    }
}

pub async fn handle_list_articles_by_topic(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ListArticlesArgs {
        category: Option<String>,
        tag: Option<String>,
        status: Option<String>,
        search: Option<String>,
        order_by: Option<String>,
        order: Option<String>,
        number: Option<i64>,
        page: Option<u32>,
        include_views: Option<bool>,
    }

    let args: ListArticlesArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return tool_error(message),
    };

    if global.verbose {
        eprintln!(
            "Calling list_articles_by_topic: category={:?}, tag={:?}, status={:?}",
            args.category, args.tag, args.status
        );
    }

    let filters = ListingFilters {
        category: args.category,
        tag: args.tag,
        status: args.status.unwrap_or_else(|| "any".to_string()),
        search: args.search,
    };

    match crate::wordpress::list_articles_data(
        filters,
        args.order_by.unwrap_or_else(|| "date".to_string()),
        args.order.unwrap_or_else(|| "DESC".to_string()),
        args.number.unwrap_or(20),
        args.page.unwrap_or(1),
        args.include_views.unwrap_or(true),
    )
    .await
    {
        Ok(listing) => tool_result(&listing),
        Err(e) => tool_error(format!("{e}")),
    }
}

pub async fn handle_get_site_stats(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetSiteStatsArgs {
        days: Option<i64>,
    }

    let args: GetSiteStatsArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return tool_error(message),
    };

    if global.verbose {
        eprintln!("Calling get_site_stats: days={:?}", args.days);
    }

    match crate::wordpress::site_stats_data(args.days.unwrap_or(7)).await {
        Ok(stats) => tool_result(&stats),
        Err(e) => tool_error(format!("{e}")),
    }
}
