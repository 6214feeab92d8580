use std::path::Path;

use super::limits::{human_size, KIB, MIB, TEXT_READ_LIMIT};
use crate::content::FileRef;

const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".mov", ".avi", ".mkv", ".webm", ".m4v", ".wmv", ".flv", ".f4v", ".asf", ".rm",
    ".rmvb", ".3gp", ".3g2",
];

const TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".js", ".ts", ".json", ".csv", ".xml", ".html", ".css",
];

const TEXT_MIME_PREFIXES: &[&str] = &["text/", "application/json", "application/javascript"];

/// MIME type guessed from a file name's extension.
pub fn mime_for_name(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "xml" => "application/xml",
        "json" => "application/json",
        "js" => "application/javascript",
        "ts" => "text/typescript",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

pub fn is_video_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn is_text_like(file: &FileRef) -> bool {
    let by_mime = file
        .mime
        .as_deref()
        .is_some_and(|mime| TEXT_MIME_PREFIXES.iter().any(|p| mime.starts_with(p)));
    let lower = file.name.to_lowercase();
    by_mime || TEXT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// What to send to the backend for a file payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContentPlan {
    /// Read the file as UTF-8 text.
    ReadText,
    /// Send a description instead of the bytes.
    Describe(String),
}

pub fn plan_file_content(file: &FileRef) -> FileContentPlan {
    if is_video_file(&file.name) {
        return FileContentPlan::Describe(format!(
            "Video file: {}\nSize: {}\nType: {}\n\n[Video content not processed - file stored for reference]",
            file.name,
            human_size(&file.size_bytes),
            file.mime.as_deref().unwrap_or("video"),
        ));
    }

    if file.size_bytes <= TEXT_READ_LIMIT && is_text_like(file) {
        return FileContentPlan::ReadText;
    }

    let size = if file.size_bytes >= MIB {
        format!("{}MB", (file.size_bytes as f64 / MIB as f64).round() as u64)
    } else {
        format!("{}KB", (file.size_bytes as f64 / KIB as f64).round() as u64)
    };
    FileContentPlan::Describe(format!(
        "Binary file: {}\nSize: {}\nType: {}",
        file.name,
        size,
        file.mime.as_deref().unwrap_or("unknown"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, size: u64, mime: Option<&str>) -> FileRef {
        FileRef {
            name: name.into(),
            size_bytes: size,
            mime: mime.map(str::to_string),
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn mime_guess_by_extension() {
        assert_eq!(mime_for_name("logo.PNG"), Some("image/png"));
        assert_eq!(mime_for_name("notes.md"), Some("text/markdown"));
        assert_eq!(mime_for_name("clip.mp4"), Some("video/mp4"));
        assert_eq!(mime_for_name("archive.unknown"), None);
        assert_eq!(mime_for_name("README"), None);
    }

    #[test]
    fn video_detection_is_case_insensitive() {
        assert!(is_video_file("Holiday.MP4"));
        assert!(is_video_file("clip.3g2"));
        assert!(!is_video_file("notes.md"));
    }

    #[test]
    fn text_files_are_read() {
        assert_eq!(plan_file_content(&file("notes.md", 10, None)), FileContentPlan::ReadText);
        assert_eq!(
            plan_file_content(&file("data", 10, Some("application/json"))),
            FileContentPlan::ReadText
        );
    }

    #[test]
    fn oversized_text_files_are_described() {
        let plan = plan_file_content(&file("huge.txt", TEXT_READ_LIMIT + 1, Some("text/plain")));
        assert!(matches!(plan, FileContentPlan::Describe(d) if d.starts_with("Binary file: huge.txt")));
    }

    #[test]
    fn videos_are_never_read() {
        let plan = plan_file_content(&file("movie.mp4", 200 * MIB, Some("video/mp4")));
        match plan {
            FileContentPlan::Describe(text) => {
                assert!(text.contains("movie.mp4"));
                assert!(text.contains("200MB"));
                assert!(text.contains("video/mp4"));
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn small_binaries_report_kilobytes() {
        let plan = plan_file_content(&file("logo.png", 2048, Some("image/png")));
        assert_eq!(
            plan,
            FileContentPlan::Describe("Binary file: logo.png\nSize: 2KB\nType: image/png".into())
        );
    }
}
