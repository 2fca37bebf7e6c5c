use crate::audit::extract_files;
use crate::extract::BlockKind;
use std::path::Path;
use std::path::PathBuf;

#[test]
fn results_are_sorted_by_path() {
    let extractions = extract_files(&[
        ("ops/zeta.graphql", "query Z { shop { name } }"),
        ("app/models.py", "from pydantic import BaseModel\n\nclass Shop(BaseModel):\n    name: str\n"),
        ("ops/alpha.graphql", "fragment ShopParts on Shop { name }"),
    ]);

    let paths: Vec<&Path> = extractions.iter().map(|e| e.path.as_path()).collect();
    assert_eq!(paths, vec![
        Path::new("app/models.py"),
        Path::new("ops/alpha.graphql"),
        Path::new("ops/zeta.graphql"),
    ]);
    assert_eq!(extractions[0].count_of(BlockKind::Model), 1);
    assert_eq!(extractions[1].count_of(BlockKind::Fragment), 1);
    assert_eq!(extractions[2].count_of(BlockKind::Operation), 1);
}

#[test]
fn parallel_extraction_is_deterministic() {
    let sources: Vec<(PathBuf, String)> = (0..40)
        .map(|i| (
            PathBuf::from(format!("ops/op_{i:02}.graphql")),
            format!("query Op{i} {{ order(id: {i}) {{ id total }} }}\n"),
        ))
        .collect();

    let first = extract_files(&sources);
    let second = extract_files(&sources);

    assert_eq!(first, second);
    assert_eq!(first.len(), 40);
    assert!(first.windows(2).all(|pair| pair[0].path < pair[1].path));
}
