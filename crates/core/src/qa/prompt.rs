//! Prompt construction.

use crate::records::FinancialRecord;

/// Renders records as context lines, one JSON object per record, in order.
#[must_use]
pub fn serialize_context(records: &[FinancialRecord]) -> String {
    records
        .iter()
        .filter_map(|record| serde_json::to_string(record).ok())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fills the fixed question-answering template.
#[must_use]
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the question based on the balance sheet data below:\n\n{context}\n\nQuestion: {question}\nAnswer concisely:"
    )
}
