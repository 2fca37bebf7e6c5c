use crate::extract::extract_source;
use proptest::prelude::*;
use std::path::Path;

const FIELD_NAMES: [&str; 4] = ["email", "id", "name", "total"];

fn arb_operation() -> impl Strategy<Value = (String, Vec<&'static str>)> {
    (
        "[A-Z][a-z]{1,6}",
        prop::collection::vec(prop::sample::select(FIELD_NAMES.to_vec()), 1..4),
    )
}

/// Each operation occupies four lines; its `query` keyword is on the second.
fn render_module(operations: &[(String, Vec<&'static str>)]) -> String {
    operations.iter()
        .enumerate()
        .map(|(idx, (name, fields))| format!(
            "Q{idx} = gql(\"\"\"\nquery {name} {{ shop {{ {} }} }}\n\"\"\")\n\n",
            fields.join(" "),
        ))
        .collect()
}

proptest! {
    #[test]
    fn extraction_is_deterministic_and_ordered(
        operations in prop::collection::vec(arb_operation(), 0..6),
    ) {
        let source = render_module(&operations);
        let path = Path::new("app/generated.py");

        let first = extract_source(path, &source);
        let second = extract_source(path, &source);
        prop_assert_eq!(&first, &second);

        prop_assert!(first.issues.is_empty());
        prop_assert_eq!(first.blocks.len(), operations.len());
        for (idx, (block, (name, fields))) in first.blocks.iter().zip(&operations).enumerate() {
            prop_assert_eq!(block.location.line, idx * 4 + 2);
            prop_assert_eq!(block.location.col, 1);
            prop_assert_eq!(block.describe(), format!("query {name}"));

            let paths: Vec<String> = block.selection_paths().iter()
                .map(|path| path.to_dotted())
                .collect();
            let expected: Vec<String> = std::iter::once("shop".to_string())
                .chain(fields.iter().map(|field| format!("shop.{field}")))
                .collect();
            prop_assert_eq!(paths, expected);
        }
    }
}
