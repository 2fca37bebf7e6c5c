use crate::extract::FileExtraction;
use crate::extract::extract_source;
use crate::issue::IssueCode;
use crate::issue::Severity;
use crate::surface::SurfaceRules;
use crate::surface::SurfaceValidator;
use crate::surface::validate_surface;
use std::path::Path;

fn extract_graphql(path: &str, source: &str) -> FileExtraction {
    let extraction = extract_source(Path::new(path), source);
    assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);
    extraction
}

#[test]
fn subscription_with_empty_selection_set_yields_two_issues_at_one_location() {
    let extraction = extract_graphql("ops/live.graphql", "subscription OnOrderCreated {}\n");
    let issues = validate_surface(&SurfaceRules::default(), &extraction.blocks);

    let codes: Vec<_> = issues.iter().map(|issue| issue.code).collect();
    assert_eq!(codes, vec![IssueCode::SubscriptionDisallowed, IssueCode::EmptySelectionSet]);
    assert_eq!(issues[0].location, issues[1].location);
    assert_eq!(issues[0].location, extraction.blocks[0].location);
}

#[test]
fn subscriptions_can_be_allowed() {
    let extraction = extract_graphql(
        "ops/live.graphql",
        "subscription OnOrderCreated { orderCreated { id } }\n",
    );
    let rules = SurfaceRules::default().allow_subscriptions(true);

    assert!(validate_surface(&rules, &extraction.blocks).is_empty());
}

#[test]
fn flags_operation_shape_problems_in_block_order() {
    let source = "\
query { shop { name } }
query GetOrder { order(id: 1) { id { value } customer { ...CustomerParts ...Missing } lines {} } }
query GetOrder { shop { name } }
fragment CustomerParts on Customer { email }
";
    let extraction = extract_graphql("ops/orders.graphql", source);
    let issues = validate_surface(&SurfaceRules::default(), &extraction.blocks);

    let found: Vec<_> = issues.iter()
        .map(|issue| (issue.location.line, issue.code))
        .collect();
    assert_eq!(found, vec![
        (1, IssueCode::OperationUnnamed),
        (2, IssueCode::ScalarLeafHasSelection),
        (2, IssueCode::EmptySelectionSet),
        (2, IssueCode::DanglingFragmentSpread),
        (3, IssueCode::DuplicateOperationName),
    ]);

    assert_eq!(issues[1].severity, Severity::Advisory);
    assert!(issues[3].message.contains("`Missing`"));
}

#[test]
fn fragments_from_other_files_satisfy_spreads() {
    let operations = extract_graphql(
        "ops/orders.graphql",
        "query GetOrder { order(id: 1) { ...OrderParts } }\n",
    );
    let fragments = extract_graphql(
        "ops/fragments.graphql",
        "fragment OrderParts on Order { total }\n",
    );
    let rules = SurfaceRules::default();

    let issues = SurfaceValidator::new(&rules)
        .with_fragments_from(&fragments.blocks)
        .validate(&operations.blocks);
    assert!(issues.is_empty(), "{issues:?}");

    let issues = validate_surface(&rules, &operations.blocks);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::DanglingFragmentSpread);
}

#[test]
fn configured_scalar_leaf_names_are_honoured() {
    let extraction = extract_graphql(
        "ops/orders.graphql",
        "query GetOrder { order(id: 1) { money { amount } } }\n",
    );

    assert!(validate_surface(&SurfaceRules::default(), &extraction.blocks).is_empty());

    let rules = SurfaceRules::default().with_scalar_leaf_name("money");
    let issues = validate_surface(&rules, &extraction.blocks);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::ScalarLeafHasSelection);
}

#[test]
fn empty_fragments_and_inline_fragments_are_flagged() {
    let extraction = extract_graphql(
        "ops/orders.graphql",
        "fragment Nothing on Order {}\nquery Q { node(id: 1) { ... on Order {} } }\n",
    );
    let issues = validate_surface(&SurfaceRules::default(), &extraction.blocks);

    let found: Vec<_> = issues.iter()
        .map(|issue| (issue.location.line, issue.code))
        .collect();
    assert_eq!(found, vec![
        (1, IssueCode::EmptySelectionSet),
        (2, IssueCode::EmptySelectionSet),
    ]);
}
