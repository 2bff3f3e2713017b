use chrono::{DateTime, TimeZone};

/// Replaces every character that is not a word character (`[A-Za-z0-9_]` or any
/// alphanumeric Unicode character) with an underscore.
pub fn sanitize_guild_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Builds the archive filename for a backup started at `started_at`.
///
/// Format: `<sanitized guild name>_data_<YYYY-MM-DD_HH.MM.SS>.json.zip`
pub fn archive_filename<Tz: TimeZone>(guild_name: &str, started_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_data_{}.json.zip",
        sanitize_guild_name(guild_name),
        started_at.format("%Y-%m-%d_%H.%M.%S")
    )
}

/// Strips the final extension from a filename (`a.json.zip` becomes `a.json`).
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}
