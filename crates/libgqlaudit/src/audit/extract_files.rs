use crate::extract::FileExtraction;
use crate::extract::extract_source;
use rayon::prelude::*;
use std::path::Path;

/// Extracts every `(path, source)` pair in parallel.
///
/// Files share no state, so each one is extracted on its own worker. The
/// results are sorted by path, which makes the output independent of
/// scheduling.
pub fn extract_files<P, S>(sources: &[(P, S)]) -> Vec<FileExtraction>
where
    P: AsRef<Path> + Sync,
    S: AsRef<str> + Sync,
{
    let mut extractions: Vec<FileExtraction> = sources
        .par_iter()
        .map(|(path, source)| extract_source(path.as_ref(), source.as_ref()))
        .collect();
    extractions.sort_by(|a, b| a.path.cmp(&b.path));

    log::debug!(
        "Extracted {} blocks from {} files.",
        extractions.iter().map(|extraction| extraction.blocks.len()).sum::<usize>(),
        extractions.len(),
    );
    extractions
}
