/// Public object path for a storage bucket, relative to the project endpoint.
const PUBLIC_OBJECT_PATH: &str = "storage/v1/object/public";

/// Build the storage base path for `bucket`: `{endpoint}/storage/v1/object/public/{bucket}/`.
pub fn storage_base(endpoint: &str, bucket: &str) -> String {
    format!(
        "{}/{PUBLIC_OBJECT_PATH}/{}/",
        endpoint.trim_end_matches('/'),
        bucket.trim_matches('/')
    )
}

fn is_absolute(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Turn a raw `audio_url` column value into something a player can fetch.
///
/// Empty stays empty, absolute URLs pass through, anything else is treated
/// as a storage key under `base`.
pub fn resolve(raw: &str, base: &str) -> String {
    if raw.is_empty() {
        log::warn!("Empty audio URL provided");
        return String::new();
    }
    if is_absolute(raw) {
        return raw.to_string();
    }
    let resolved = format!("{base}{}", raw.trim_start_matches('/'));
    log::debug!("Resolved audio key {raw} -> {resolved}");
    resolved
}
