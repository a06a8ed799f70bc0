/// Filesystem-safe name for a downloaded job resource: `{uuid}-{api}`.
///
/// `("1f0c", "/artifact")` becomes `1f0c-artifact`; a query string is folded
/// into the name so decoded and raw variants do not collide.
pub fn download_filename(uuid: &str, api: &str) -> String {
    let uuid = sanitize(uuid);
    let api = sanitize(api);
    let name = match (uuid.is_empty(), api.is_empty()) {
        (false, false) => format!("{uuid}-{api}"),
        (false, true) => uuid,
        (true, false) => api,
        (true, true) => "download".to_string(),
    };
    let mut name = truncate(name, 120);
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    name
}

fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    compacted.trim_matches(&['_', ' ', '.'][..]).to_string()
}

fn truncate(mut name: String, max_len: usize) -> String {
    if name.len() > max_len {
        let mut cut = max_len;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '&' | '=' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
