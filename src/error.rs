use thiserror::Error;

#[derive(Error, Debug)]
pub enum CastError {
    #[error("unwrap path `{path}` is broken at segment `{segment}`")]
    UnwrapPath { path: String, segment: String },

    #[error("model conversion failed: {0}")]
    Convert(#[from] serde_json::Error),
}
