use crate::output::types::CrawlResult;

/// Header row of the CSV export
pub const CSV_HEADER: &str = "name,price,currency,url";

/// Formats crawl items as CSV
///
/// Every field is double-quoted and embedded quotes are doubled.
pub fn to_csv(result: &CrawlResult) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for item in &result.items {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            quote(&item.name),
            quote(&item.price.to_string()),
            quote(&item.currency),
            quote(&item.url)
        ));
    }

    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
