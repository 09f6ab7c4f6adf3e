use serde::Serialize;

/// A single citation extracted from an assistant reply. The marker matches the
/// `[n]` token spliced into the reply text; `quote` carries the cited snippet
/// for file citations and is absent for path citations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Citation {
    pub marker: String,
    pub file_id: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub path_citation: bool,
}

impl Citation {
    pub fn quoted(marker: String, file_id: String, filename: String, quote: String) -> Self {
        Self {
            marker,
            file_id,
            filename,
            quote: Some(quote),
            path_citation: false,
        }
    }

    pub fn path(marker: String, file_id: String, filename: String) -> Self {
        Self {
            marker,
            file_id,
            filename,
            quote: None,
            path_citation: true,
        }
    }
}
