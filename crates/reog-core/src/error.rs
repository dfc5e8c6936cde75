use thiserror::Error;

/// Errors surfaced by the core while loading assets or configuration.
///
/// None of these are fatal to a session: callers log them and leave the
/// affected feature inactive.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("model parse error: {0}")]
    ModelParse(#[from] gltf::Error),
    #[error("model contains no triangle meshes")]
    EmptyModel,
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
