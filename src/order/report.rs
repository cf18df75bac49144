//! Order report formatting
//!
//! Markdown rendering of order requests and responses for the CLI.

use crate::order::types::{OrderRequest, OrderResult};

/// Build a markdown table from headers and rows
pub fn build_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = String::new();

    // Header row
    table.push_str("| ");
    table.push_str(&headers.join(" | "));
    table.push_str(" |\n");

    // Separator row
    table.push('|');
    for _ in headers {
        table.push_str("--------|");
    }
    table.push('\n');

    // Data rows
    for row in rows {
        table.push_str("| ");
        table.push_str(&row.join(" | "));
        table.push_str(" |\n");
    }

    table
}

/// Build a markdown section header
pub fn build_section_header(title: &str, level: u8) -> String {
    let hashes = "#".repeat(level as usize);
    format!("{} {}\n\n", hashes, title)
}

fn row(label: &str, value: impl ToString) -> Vec<String> {
    vec![label.to_string(), value.to_string()]
}

/// Summary of the order about to be sent
pub fn format_order_request(request: &OrderRequest) -> String {
    let mut rows = vec![
        row("Symbol", request.symbol()),
        row("Side", request.side()),
        row("Type", request.order_type()),
        row("Quantity", request.quantity()),
    ];
    if let Some(price) = request.price() {
        rows.push(row("Price", price));
    }

    let mut out = build_section_header("Order Request Summary", 2);
    out.push_str(&build_table(&["Field", "Value"], &rows));
    out
}

/// Details of the exchange's answer; missing fields show as N/A
pub fn format_order_response(result: &OrderResult) -> String {
    let rows = vec![
        row("Order ID", &result.order_id),
        row("Client OID", &result.client_order_id),
        row("Symbol", &result.symbol),
        row("Side", &result.side),
        row("Type", &result.order_type),
        row("Status", &result.status),
        row("Orig Qty", &result.orig_qty),
        row("Executed Qty", &result.executed_qty),
        row("Avg Price", &result.avg_price),
        row("Price", &result.price),
        row("Time in Force", &result.time_in_force),
    ];

    let mut out = build_section_header("Order Response Details", 2);
    out.push_str(&build_table(&["Field", "Value"], &rows));
    out
}
