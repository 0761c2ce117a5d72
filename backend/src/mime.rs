use std::path::Path;

use serde::Serialize;

pub const OCTET_STREAM: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    // text and structured data
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("json", "application/json"),
    ("js", "text/javascript"),
    ("ts", "text/typescript"),
    ("jsx", "text/javascript"),
    ("tsx", "text/typescript"),
    ("html", "text/html"),
    ("css", "text/css"),
    ("xml", "text/xml"),
    ("yml", "text/yaml"),
    ("yaml", "text/yaml"),
    ("csv", "text/csv"),
    ("log", "text/plain"),
    // source and config files
    ("sql", "text/plain"),
    ("py", "text/plain"),
    ("java", "text/plain"),
    ("cpp", "text/plain"),
    ("c", "text/plain"),
    ("h", "text/plain"),
    ("php", "text/plain"),
    ("rb", "text/plain"),
    ("go", "text/plain"),
    ("rs", "text/plain"),
    ("sh", "text/plain"),
    ("bat", "text/plain"),
    ("ps1", "text/plain"),
    ("ini", "text/plain"),
    ("conf", "text/plain"),
    ("config", "text/plain"),
    ("env", "text/plain"),
    ("gitignore", "text/plain"),
    ("dockerfile", "text/plain"),
    // images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("ico", "image/x-icon"),
    // video
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("mkv", "video/x-matroska"),
    // audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("aac", "audio/aac"),
    ("m4a", "audio/mp4"),
    ("flac", "audio/flac"),
    ("wma", "audio/x-ms-wma"),
    // documents
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
];

const TEXT_EXTENSIONS: &[&str] = &[
    "txt",
    "md",
    "json",
    "js",
    "ts",
    "jsx",
    "tsx",
    "html",
    "css",
    "xml",
    "yml",
    "yaml",
    "csv",
    "log",
    "sql",
    "py",
    "java",
    "cpp",
    "c",
    "h",
    "php",
    "rb",
    "go",
    "rs",
    "sh",
    "bat",
    "ps1",
    "ini",
    "conf",
    "config",
    "env",
    "gitignore",
    "dockerfile",
];

const CODE_EXTENSIONS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "py", "java", "cpp", "c", "go", "rs",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Code,
    Markdown,
    Word,
    Excel,
    Powerpoint,
    Document,
}

fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

pub fn classify(filename: &str) -> &'static str {
    let Some(ext) = extension(filename) else {
        return OCTET_STREAM;
    };
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(OCTET_STREAM)
}

pub fn is_text_previewable(filename: &str) -> bool {
    extension(filename)
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn category(filename: &str, mime_type: &str) -> FileCategory {
    let ext = extension(filename).unwrap_or_default();
    let is_ext = |candidates: &[&str]| candidates.contains(&ext.as_str());

    if mime_type.starts_with("image/") {
        FileCategory::Image
    } else if mime_type.starts_with("video/") {
        FileCategory::Video
    } else if mime_type.starts_with("audio/") {
        FileCategory::Audio
    } else if ext == "md" {
        FileCategory::Markdown
    } else if mime_type.starts_with("text/") || is_ext(CODE_EXTENSIONS) {
        FileCategory::Code
    } else if is_ext(&["doc", "docx"]) || mime_type.contains("msword") {
        FileCategory::Word
    } else if is_ext(&["xls", "xlsx"]) || mime_type.contains("ms-excel") {
        FileCategory::Excel
    } else if is_ext(&["ppt", "pptx"]) || mime_type.contains("ms-powerpoint") {
        FileCategory::Powerpoint
    } else {
        FileCategory::Document
    }
}
