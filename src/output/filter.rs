use crate::output::types::ExtractedItem;

/// Selects items whose name or price contains `query`
///
/// Name matching is case-insensitive; the price is compared in its display
/// form (`19.99`, `45`). An empty query keeps every item.
pub fn filter_items<'a>(items: &'a [ExtractedItem], query: &str) -> Vec<&'a ExtractedItem> {
    let needle = query.to_lowercase();

    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle) || item.price.to_string().contains(query)
        })
        .collect()
}
