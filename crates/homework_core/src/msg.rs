#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The API answered with a decoded JSON payload.
    ResponseReceived(serde_json::Value),
    /// The API request failed; carries the display text of the fetch error.
    FetchFailed(String),
}
