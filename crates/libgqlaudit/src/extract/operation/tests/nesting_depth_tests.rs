use crate::extract::extract_source;
use crate::extract::operation::DocumentParser;
use crate::extract::operation::FieldSelection;
use crate::extract::operation::InlineFragment;
use crate::extract::operation::OperationAst;
use crate::extract::operation::ParsedDefinitionKind;
use crate::extract::operation::ParsedDocument;
use crate::extract::operation::Selection;
use crate::extract::operation::SelectionSummary;
use crate::issue::IssueCode;
use std::path::Path;

const NESTING_ERROR: &str = "maximum nesting depth exceeded";

fn nested_query(name: &str, depth: usize) -> String {
    format!("query {name} {}{}", "{ a ".repeat(depth), "}".repeat(depth))
}

fn operation_names(document: &ParsedDocument) -> Vec<&str> {
    document.definitions.iter()
        .filter_map(|def| match &def.kind {
            ParsedDefinitionKind::Operation(op) => op.name.as_deref(),
            _ => None,
        })
        .collect()
}

fn field(name: &str, selection_set: Option<Vec<Selection>>) -> Selection {
    Selection::Field(FieldSelection {
        alias: None,
        name: name.to_string(),
        arguments: vec![],
        directives: vec![],
        selection_set,
    })
}

#[test]
fn moderately_nested_selections_still_parse() {
    let source = nested_query("Nested", 40);
    let document = DocumentParser::new(&source).parse();

    assert!(document.errors.is_empty(), "{:?}", document.errors);
    let ParsedDefinitionKind::Operation(op) = &document.definitions[0].kind else {
        panic!("expected an operation");
    };
    let op: &OperationAst = op;
    assert_eq!(op.selection_paths.len(), 40);
    assert_eq!(op.selection_paths.last().map(|path| path.len()), Some(40));
}

#[test]
fn runaway_selection_nesting_is_an_error_not_a_crash() {
    let source = format!("{}\nquery Next {{ b }}", nested_query("Deep", 1500));
    let document = DocumentParser::new(&source).parse();

    assert_eq!(document.errors.len(), 1, "{:?}", document.errors);
    assert_eq!(document.errors[0].message, NESTING_ERROR);
    assert_eq!(operation_names(&document), vec!["Next"]);
}

#[test]
fn runaway_list_value_nesting_is_an_error_not_a_crash() {
    let source = format!(
        "query Deep {{ search(filter: {}1{}) {{ id }} }}\nquery Next {{ b }}",
        "[".repeat(5000),
        "]".repeat(5000),
    );
    let document = DocumentParser::new(&source).parse();

    assert_eq!(document.errors.len(), 1, "{:?}", document.errors);
    assert_eq!(document.errors[0].message, NESTING_ERROR);
    assert_eq!(operation_names(&document), vec!["Next"]);
}

#[test]
fn runaway_variable_type_nesting_is_an_error_not_a_crash() {
    let source = format!(
        "query Deep($ids: {}ID{}) {{ id }}\nquery Next {{ b }}",
        "[".repeat(5000),
        "]".repeat(5000),
    );
    let document = DocumentParser::new(&source).parse();

    assert_eq!(document.errors.len(), 1, "{:?}", document.errors);
    assert_eq!(document.errors[0].message, NESTING_ERROR);
    assert_eq!(operation_names(&document), vec!["Next"]);
}

#[test]
fn deeply_nested_block_reports_syntax_error_and_extraction_continues() {
    let source = format!(
        "{}\n\nquery GetOrder {{ order {{ id }} }}\n",
        nested_query("Deep", 1500),
    );
    let extraction = extract_source(Path::new("ops/deep.graphql"), &source);

    assert_eq!(extraction.issues.len(), 1, "{:?}", extraction.issues);
    let issue = &extraction.issues[0];
    assert_eq!(issue.code, IssueCode::ExtractionSyntaxError);
    assert_eq!(issue.message, NESTING_ERROR);
    assert_eq!(extraction.blocks.len(), 1);
    assert_eq!(extraction.blocks[0].describe(), "query GetOrder");
}

#[test]
fn summarizing_a_deep_tree_does_not_recurse() {
    const DEPTH: usize = 300;
    let mut selection_set = vec![field("leaf", None)];
    for _ in 0..DEPTH {
        selection_set = vec![field("a", Some(selection_set))];
    }

    let summary = SelectionSummary::from_selection_set(&selection_set);

    assert_eq!(summary.selection_paths.len(), DEPTH + 1);
    let deepest = summary.selection_paths.last().map(|path| path.to_dotted());
    let expected = format!("{}leaf", "a.".repeat(DEPTH));
    assert_eq!(deepest, Some(expected));
}

#[test]
fn summary_keeps_pre_order_across_inline_fragments() {
    let selection_set = vec![
        field("order", Some(vec![
            field("id", None),
            Selection::InlineFragment(InlineFragment {
                type_condition: Some("DigitalOrder".to_string()),
                directives: vec![],
                selection_set: vec![field("downloadUrl", None)],
            }),
            field("total", None),
        ])),
        field("viewer", None),
    ];

    let summary = SelectionSummary::from_selection_set(&selection_set);
    let dotted: Vec<_> = summary.selection_paths.iter().map(|path| path.to_dotted()).collect();

    assert_eq!(dotted, vec![
        "order",
        "order.id",
        "order.downloadUrl",
        "order.total",
        "viewer",
    ]);
}
