const SCALAR_LEAF_NAMES: [&str; 8] = [
    "__typename", "cursor", "email", "id", "phone", "slug", "url", "uuid",
];

/// Heuristically decides whether a field name denotes a scalar leaf, e.g.
/// `id`, `orderId`, `customer_id`, `isActive`, `createdAt`, `itemCount`.
///
/// Names in `extra_names` always count as scalar leaves.
pub fn looks_like_scalar_leaf(name: &str, extra_names: &[String]) -> bool {
    if extra_names.iter().any(|extra| extra == name) {
        return true;
    }
    let lowercase = name.to_ascii_lowercase();
    if SCALAR_LEAF_NAMES.contains(&lowercase.as_str()) {
        return true;
    }

    has_camel_suffix(name, "Id")
        || has_camel_suffix(name, "ID")
        || has_camel_suffix(name, "At")
        || has_camel_suffix(name, "Count")
        || ["_id", "_at", "_count"].iter().any(|suffix| {
            name.len() > suffix.len() && lowercase.ends_with(suffix)
        })
        || has_predicate_prefix(name, "is")
        || has_predicate_prefix(name, "has")
}

/// `orderId` has the camel suffix `Id`; `Id` and `VOID` do not.
fn has_camel_suffix(name: &str, suffix: &str) -> bool {
    name.strip_suffix(suffix)
        .and_then(|stem| stem.chars().last())
        .is_some_and(|last| last.is_ascii_lowercase() || last.is_ascii_digit())
}

/// `isActive` and `is_active` are predicates; `issue` and `hash` are not.
fn has_predicate_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|next| next.is_ascii_uppercase() || next == '_')
}
