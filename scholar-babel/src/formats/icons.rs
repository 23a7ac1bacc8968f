//! Icon mapping for the tree visualization format

/// Get the Unicode icon for a report node kind
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Title" => "⊤",
        "Section" => "§",
        "SubHeading" => "≡",
        "Paragraph" => "¶",
        "Bullet" => "•",
        "Table" => "▦",
        "HeaderRow" => "⊟",
        "Row" => "↵",
        "Diagram" => "◇",
        "Chart" => "∿",
        "Code" => "𝒱",
        "Reference" => "†",
        _ => "○",
    }
}
