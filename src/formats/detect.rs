use super::Format;

/// Detect configuration format from file content.
///
/// Used when a file's extension does not name a format. Checks the most
/// distinctive patterns first and falls back to TOML.
///
/// ```
/// use confview::{Format, formats::detect_format_from_content};
///
/// assert_eq!(detect_format_from_content(r#"{"key": "value"}"#), Format::Json);
/// assert_eq!(detect_format_from_content("name = \"app\"\n[server]\nport = 80"), Format::Toml);
/// assert_eq!(detect_format_from_content("[server]\nhost = localhost"), Format::Ini);
/// assert_eq!(detect_format_from_content("name: app\nserver:\n  port: 80"), Format::Yaml);
/// assert_eq!(detect_format_from_content(""), Format::Toml);
/// ```
pub fn detect_format_from_content(content: &str) -> Format {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Format::Toml;
    }

    if is_json_format(trimmed) {
        return Format::Json;
    }

    let lines: Vec<&str> = trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'))
        .collect();

    if let Some(format) = detect_section_format(&lines) {
        return format;
    }

    if is_yaml_format(trimmed, &lines) {
        return Format::Yaml;
    }

    Format::Toml
}

/// A bracketed document is a JSON array only if its first element looks like a
/// JSON value; `[section]` is a header
fn is_json_format(content: &str) -> bool {
    if content.starts_with('{') && content.ends_with('}') {
        return true;
    }

    content.starts_with('[')
        && content.ends_with(']')
        && content[1..]
            .trim_start()
            .chars()
            .next()
            .is_some_and(|c| matches!(c, '{' | '[' | '"' | ']' | '-') || c.is_ascii_digit())
}

/// TOML and INI share `[section]` headers and `key = value` lines; INI values
/// are bare text where TOML requires a literal
fn detect_section_format(lines: &[&str]) -> Option<Format> {
    let mut section_like = false;

    for line in lines {
        if is_section_header(line) {
            if line.eq_ignore_ascii_case("[default]") {
                return Some(Format::Ini);
            }
            section_like = true;
            continue;
        }

        if let Some(value) = assignment_value(line) {
            section_like = true;
            if !is_toml_literal(value) {
                return Some(Format::Ini);
            }
        }
    }

    section_like.then_some(Format::Toml)
}

fn is_section_header(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']') && !line.contains(':')
}

fn assignment_value(line: &str) -> Option<&str> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(':') || key.starts_with('[') {
        return None;
    }
    Some(value.trim())
}

fn is_toml_literal(value: &str) -> bool {
    let Some(first) = value.chars().next() else {
        return false;
    };

    matches!(first, '"' | '\'' | '[' | '{' | '+' | '-')
        || first.is_ascii_digit()
        || matches!(value, "true" | "false" | "inf" | "nan")
}

fn is_yaml_format(content: &str, lines: &[&str]) -> bool {
    if content.starts_with("---") {
        return true;
    }

    if lines.is_empty() {
        return false;
    }

    let yaml_pattern_count = lines
        .iter()
        .filter(|line| {
            line.starts_with("- ")
                || line.find(':').is_some_and(|colon| {
                    let after_colon = &line[colon + 1..];
                    after_colon.starts_with(' ') || after_colon.is_empty()
                })
        })
        .count();

    yaml_pattern_count > 0 && yaml_pattern_count >= lines.len() / 2
}
