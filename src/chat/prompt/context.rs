use crate::archive::RetrievedDocument;

/// Numbers the documents in retrieval order, separated by blank lines.
pub fn format_documents(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("Document {}:\n{}", i + 1, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
