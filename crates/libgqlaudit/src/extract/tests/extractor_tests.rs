use crate::extract::BlockKind;
use crate::extract::FileExtraction;
use crate::extract::extract_source;
use crate::extract::operation::OperationKind;
use crate::issue::IssueCode;
use std::path::Path;

fn extract_py(source: &str) -> FileExtraction {
    extract_source(Path::new("app/queries.py"), source)
}

const GQL_CALLS: &str = r#"from gql import gql

ORDER_QUERY = gql("""
    query GetOrder($id: ID!) {
        order(id: $id) {
            id
            total
        }
    }
""")

def helper():
    return "query is not graphql"
"#;

#[test]
fn finds_operations_in_gql_calls() {
    let extraction = extract_py(GQL_CALLS);

    assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);
    assert_eq!(extraction.blocks.len(), 1);
    let block = &extraction.blocks[0];
    assert_eq!(block.location.file, Path::new("app/queries.py"));
    assert_eq!((block.location.line, block.location.col), (4, 5));
    assert!(block.raw.starts_with("query GetOrder($id: ID!) {"));
    assert!(block.raw.ends_with('}'));
    assert_eq!(block.describe(), "query GetOrder");

    let paths: Vec<_> = block.selection_paths().iter().map(|p| p.to_dotted()).collect();
    assert_eq!(paths, vec!["order", "order.id", "order.total"]);
}

#[test]
fn raw_text_matches_the_source_slice() {
    let extraction = extract_py(GQL_CALLS);
    let block = &extraction.blocks[0];

    assert!(GQL_CALLS.contains(&block.raw));
}

#[test]
fn anonymous_braces_need_a_graphql_context() {
    let extraction = extract_py("greeting = \"{name} says hi\"\n");
    assert!(extraction.blocks.is_empty());

    let extraction = extract_py("SHOP_QUERY = \"{ shop { name } }\"\n");
    assert_eq!(extraction.blocks.len(), 1);
    let operation = extraction.blocks[0].as_operation().unwrap();
    assert_eq!(operation.name, None);
    assert_eq!(operation.kind, OperationKind::Query);
}

#[test]
fn syntax_errors_do_not_hide_later_blocks() {
    let source = r#"BROKEN = """
query Broken {
  order {
    id
"""

GOOD = """
query Good { shop { name } }
"""
"#;
    let extraction = extract_py(source);

    assert_eq!(extraction.issues.len(), 1);
    let issue = &extraction.issues[0];
    assert_eq!(issue.code, IssueCode::ExtractionSyntaxError);
    assert_eq!((issue.location.line, issue.location.col), (3, 9));

    assert_eq!(extraction.blocks.len(), 1);
    assert_eq!(extraction.blocks[0].describe(), "query Good");
    assert_eq!(extraction.blocks[0].location.line, 8);
}

#[test]
fn unterminated_literals_are_reported_at_the_quote() {
    let source = "q = \"query { order { id } }\nx = 1\n";
    let extraction = extract_py(source);

    assert!(extraction.blocks.is_empty());
    assert_eq!(extraction.issues.len(), 1);
    assert_eq!(extraction.issues[0].code, IssueCode::ExtractionSyntaxError);
    assert_eq!(
        (extraction.issues[0].location.line, extraction.issues[0].location.col),
        (1, 5),
    );
}

#[test]
fn fstring_interpolations_never_become_fields() {
    let source = "QUERY = f\"\"\"\nquery Dyn {{ shop {{ {field} name }} }}\n\"\"\"\n";
    let extraction = extract_py(source);

    assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);
    let paths: Vec<_> = extraction.blocks[0].selection_paths().iter()
        .map(|p| p.to_dotted())
        .collect();
    assert_eq!(paths, vec!["shop", "shop.name"]);
}

#[test]
fn graphql_files_are_parsed_whole() {
    let source = "fragment OrderParts on Order { id }\n\nquery A { order { ...OrderParts } }\n";
    let extraction = extract_source(Path::new("ops/orders.graphql"), source);

    assert!(extraction.issues.is_empty());
    assert_eq!(extraction.count_of(BlockKind::Fragment), 1);
    assert_eq!(extraction.count_of(BlockKind::Operation), 1);
    assert_eq!(extraction.blocks[1].location.line, 3);
    assert_eq!(extraction.blocks[1].fragment_spreads(), ["OrderParts".to_string()]);
}

#[test]
fn extraction_is_deterministic() {
    let first = extract_py(GQL_CALLS);
    let second = extract_py(GQL_CALLS);

    assert_eq!(first, second);
}
