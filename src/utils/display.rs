use crate::upload::KeyValues;

/// Display text for extracted key-values.
///
/// Text is returned as-is. Anything structured is pretty-printed with two-space
/// indentation, keys in the order the server sent them.
pub fn key_values_text(key_values: &KeyValues) -> String {
    match key_values {
        KeyValues::Text(text) => text.clone(),
        KeyValues::Structured(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
