use proptest::prelude::*;
use stockmark_core::Record;

/// Attribute values as the provider hands them back, including the blank ones it sends
/// for "not set"
pub fn attribute_value_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[A-Z]{2}-[0-9]{1,6}".prop_map(Some),
    ]
}

/// Catalog with unique, ascending ids
pub fn catalog_strategy(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (
            "[a-z ]{0,12}",
            attribute_value_strategy(),
            attribute_value_strategy(),
        ),
        0..max_len,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(position, (name, sku, barcode))| Record {
                id: (position as i64 + 1).into(),
                name: Some(name),
                sku,
                barcode,
            })
            .collect()
    })
}

/// Ids to toggle, drawn from a range overlapping the generated catalogs so some are absent
pub fn toggle_sequence_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..40, 0..60)
}
