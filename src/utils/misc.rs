/// Discord rejects messages longer than this many characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Splits `content` into pieces of at most `limit` characters, preferring to
/// break after a newline, then after a space.
pub fn chunk_message(content: &str, limit: usize) -> Vec<String> {
    let mut chunks = vec![];
    let mut rest = content;

    while rest.chars().count() > limit {
        let hard = rest
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let window = &rest[..hard];

        let cut = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .map(|i| i + 1)
            .filter(|&i| i > 0 && i < hard)
            .unwrap_or(hard);

        chunks.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest.to_string());
    }

    chunks
}

/// Keeps the tail of an answer that is still growing, so the preview shows
/// the latest text.
pub fn preview(content: &str, limit: usize) -> String {
    let count = content.chars().count();
    if count <= limit {
        return content.to_string();
    }

    let skip = count - (limit - 1);
    format!("…{}", content.chars().skip(skip).collect::<String>())
}
