/// Failure kinds surfaced by the WordPress transport and the tool layer.
///
/// Timeouts, other transport failures and unparseable bodies are distinct
/// variants so callers can tell them apart; a non-2xx response carries the
/// server-reported message and status.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    ResponseParse(String),

    #[error("WordPress API error [{status}]: {message}")]
    Remote { message: String, status: u16 },

    #[error("{0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
