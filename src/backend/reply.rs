use serde::Deserialize;

/// JSON body returned by `POST /submit`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendReply {
    pub success: bool,
    /// Whether the row reached the spreadsheet.
    #[serde(default)]
    pub sheets_saved: Option<bool>,
    /// Whether the confirmation email went out.
    #[serde(default)]
    pub email_sent: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}
