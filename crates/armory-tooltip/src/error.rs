use thiserror::Error;

#[derive(Debug, Error)]
pub enum TooltipError {
    #[error("tooltip payload is empty")]
    Empty,

    #[error("tooltip payload is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("tooltip payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}
