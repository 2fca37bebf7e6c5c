use thiserror::Error;

/// The schema description could not be turned into type and field records.
#[derive(Debug, Error)]
pub enum SchemaMalformedError {
    #[error("Schema description is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(
        "Schema description has no type container: expected a `types` list \
        under `data.__schema`, `__schema` or the document root"
    )]
    MissingTypeContainer,

    #[error(
        "Schema description's `types` entry must be a list, found {found}"
    )]
    TypeContainerNotAList {
        found: String,
    },

    #[error("Failed to parse schema SDL: {err}")]
    SdlParseError {
        err: String,
    },

    #[error("Failed to decode cached schema snapshot: {err}")]
    SnapshotDecodeError {
        err: String,
    },

    #[error("Failed to encode schema snapshot: {err}")]
    SnapshotEncodeError {
        err: String,
    },
}
