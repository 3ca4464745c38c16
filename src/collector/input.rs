//! URL text parsing and input validation

use crate::collector::request::{DownloadRequest, OutputKind, Quality};
use crate::utils::error::ValidationError;
use path_absolutize::Absolutize;
use std::path::PathBuf;
use tracing::debug;

/// Characters stripped from both ends of every line after whitespace
const TRIM_CHARS: [char; 4] = ['\'', '"', ' ', ','];

/// Options chosen in the window for the whole batch
#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub output_kind: OutputKind,
    pub quality: Quality,
    pub destination_directory: PathBuf,
    /// Prompt text that must never be treated as a URL
    pub placeholder: String,
}

/// Strip surrounding whitespace, quotes and commas from a pasted line.
///
/// Only the ends are touched; characters inside the URL are kept as-is.
pub fn clean_line(line: &str) -> &str {
    line.trim().trim_matches(&TRIM_CHARS[..])
}

/// Split raw editor text into candidate URLs, in input order.
pub fn split_urls(raw_text: &str, placeholder: &str) -> Vec<String> {
    let placeholder = clean_line(placeholder);

    raw_text
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .filter(|line| placeholder.is_empty() || *line != placeholder)
        .map(str::to_string)
        .collect()
}

/// Build the requests for a batch or explain why it cannot start.
///
/// URLs are not validated here; yt-dlp rejects what it cannot handle.
pub fn collect(
    raw_text: &str,
    options: &CollectOptions,
) -> Result<Vec<DownloadRequest>, ValidationError> {
    let urls = split_urls(raw_text, &options.placeholder);
    if urls.is_empty() {
        return Err(ValidationError::NoUrls);
    }

    let destination = resolve_directory(&options.destination_directory)?;

    debug!(
        "Collected {} URL(s) for {:?} into {}",
        urls.len(),
        options.output_kind,
        destination.display()
    );

    Ok(urls
        .into_iter()
        .map(|url| DownloadRequest {
            url,
            output_kind: options.output_kind,
            quality: options.quality,
            destination_directory: destination.clone(),
        })
        .collect())
}

/// Make the destination absolute and check that it is an existing directory
fn resolve_directory(dir: &std::path::Path) -> Result<PathBuf, ValidationError> {
    let bad = || ValidationError::BadDirectory(dir.to_path_buf());

    if dir.as_os_str().is_empty() {
        return Err(bad());
    }

    let absolute = dir.absolutize().map_err(|_| bad())?.into_owned();
    if !absolute.is_dir() {
        return Err(bad());
    }

    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn options(dir: PathBuf) -> CollectOptions {
        CollectOptions {
            output_kind: OutputKind::Video,
            quality: Quality::Best,
            destination_directory: dir,
            placeholder: "Paste URLs here...".to_string(),
        }
    }

    #[test]
    fn test_clean_line_strips_quotes_and_commas() {
        assert_eq!(clean_line("  'https://b/y' ,"), "https://b/y");
        assert_eq!(clean_line("\"https://a/x\""), "https://a/x");
        assert_eq!(clean_line("\thttps://a/x\r"), "https://a/x");
    }

    #[test]
    fn test_clean_line_keeps_interior_characters() {
        assert_eq!(
            clean_line("'https://a/x?list=1,2&t=\"3\"',"),
            "https://a/x?list=1,2&t=\"3\""
        );
    }

    #[test]
    fn test_split_urls_example() {
        let raw = "https://a/x\n\n  'https://b/y' ,\nPaste URLs here...";
        assert_eq!(
            split_urls(raw, "Paste URLs here..."),
            vec!["https://a/x".to_string(), "https://b/y".to_string()]
        );
    }

    #[test]
    fn test_split_urls_preserves_order() {
        let raw = "c\nb\na\nb";
        assert_eq!(split_urls(raw, ""), vec!["c", "b", "a", "b"]);
    }

    #[test]
    fn test_collect_no_urls() {
        let dir = tempdir().unwrap();
        let result = collect("\n  ,\n''\nPaste URLs here...\n", &options(dir.path().into()));
        assert_eq!(result, Err(ValidationError::NoUrls));
    }

    #[test]
    fn test_collect_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let result = collect("https://a/x", &options(missing.clone()));
        assert_eq!(result, Err(ValidationError::BadDirectory(missing)));
    }

    #[test]
    fn test_collect_empty_directory_field() {
        let result = collect("https://a/x", &options(PathBuf::new()));
        assert!(matches!(result, Err(ValidationError::BadDirectory(_))));
    }

    #[test]
    fn test_collect_file_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        let result = collect("https://a/x", &options(file));
        assert!(matches!(result, Err(ValidationError::BadDirectory(_))));
    }

    #[test]
    fn test_collect_no_urls_checked_before_directory() {
        let result = collect("", &options(PathBuf::from("/definitely/missing")));
        assert_eq!(result, Err(ValidationError::NoUrls));
    }

    #[test]
    fn test_collect_builds_requests() {
        let dir = tempdir().unwrap();
        let mut opts = options(dir.path().into());
        opts.output_kind = OutputKind::Audio;
        opts.quality = Quality::Height(480);

        let requests = collect("https://a/x\nhttps://b/y", &opts).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, "https://a/x");
        assert_eq!(requests[1].url, "https://b/y");
        assert!(requests.iter().all(|r| r.output_kind == OutputKind::Audio));
        assert!(requests.iter().all(|r| r.quality == Quality::Height(480)));
        assert!(requests
            .iter()
            .all(|r| r.destination_directory.is_absolute()));
    }
}
