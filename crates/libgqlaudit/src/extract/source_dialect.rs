use std::path::Path;

/// How a file's text is scanned for embedded GraphQL and models.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceDialect {
    /// The whole file is one GraphQL document.
    GraphQL,
    /// Host source with Python-style strings and comments.
    Python,
}
impl SourceDialect {
    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("graphql" | "graphqls" | "gql") => Self::GraphQL,
            _ => Self::Python,
        }
    }
}
