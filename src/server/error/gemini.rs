use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeminiError {
    /// The HTTP request could not be sent or its body could not be decoded.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Building the request URL failed.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// The API answered with a non-success status.
    #[error("Gemini API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered successfully but without any candidate text.
    #[error("No response generated")]
    EmptyResponse,
}
