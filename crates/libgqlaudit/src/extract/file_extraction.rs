use crate::extract::BlockKind;
use crate::extract::ExtractedBlock;
use crate::issue::Issue;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// Everything extracted from one file: its blocks in source order and any
/// syntax issues met along the way.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileExtraction {
    pub path: PathBuf,
    pub blocks: Vec<ExtractedBlock>,
    pub issues: Vec<Issue>,
}
impl FileExtraction {
    pub fn count_of(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|block| block.kind() == kind).count()
    }
}
