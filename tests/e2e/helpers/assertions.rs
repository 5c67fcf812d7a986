use std::path::Path;

/// Card ids of the report rows, in page order.
pub fn report_card_ids(html: &str) -> Vec<i64> {
    html.split("<tr data-card-id=\"")
        .skip(1)
        .map(|chunk| {
            chunk
                .split('"')
                .next()
                .and_then(|id| id.parse().ok())
                .expect("Malformed report row")
        })
        .collect()
}

/// Names of the audio files in an output folder, sorted. Empty when the
/// folder does not exist.
pub fn audio_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("speech-"))
        .collect();
    names.sort();
    names
}
