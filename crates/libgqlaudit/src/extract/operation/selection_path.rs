use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub field: String,

    /// Type condition of the innermost inline fragment that the field was
    /// selected under, relative to its parent field.
    pub on_type: Option<String>,
}

/// A chain of field names from an operation (or fragment) root down to one
/// selected field, e.g. `order.customer.email`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SelectionPath {
    segments: SmallVec<[PathSegment; 4]>,
}
impl SelectionPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self, field: &str, on_type: Option<&str>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment {
            field: field.to_string(),
            on_type: on_type.map(str::to_string),
        });
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn leaf(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn to_dotted(&self) -> String {
        self.to_string()
    }
}
impl std::fmt::Display for SelectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.field.as_str())?;
        }
        Ok(())
    }
}
