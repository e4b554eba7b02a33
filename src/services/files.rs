use jiff::tz::TimeZone;

use crate::{models::attachment::Attachment, services::dates::parse_record_date};

/// Attachments of a task, most recently uploaded first. Files with a missing
/// or unparseable upload date are listed last.
pub fn files_for_task<'a>(files: &'a [Attachment], task_id: u64, tz: &TimeZone) -> Vec<&'a Attachment> {
    let mut found: Vec<&Attachment> = files.iter().filter(|f| f.task_id == task_id).collect();
    found.sort_by_cached_key(|f| {
        std::cmp::Reverse(
            f.upload_date
                .as_deref()
                .and_then(|raw| parse_record_date(raw, tz)),
        )
    });
    found
}

/// Broad family of a file, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Document,
    Spreadsheet,
    Presentation,
    Video,
    Audio,
    Archive,
    Other,
}

impl FileKind {
    pub fn from_mime(mime: Option<&str>) -> Self {
        let Some(mime) = mime else {
            return FileKind::Other;
        };
        let mime = mime.to_lowercase();
        let has = |needle: &str| mime.contains(needle);

        if has("image") {
            FileKind::Image
        } else if has("pdf") || has("word") || has("document") {
            FileKind::Document
        } else if has("excel") || has("spreadsheet") {
            FileKind::Spreadsheet
        } else if has("powerpoint") || has("presentation") {
            FileKind::Presentation
        } else if has("video") {
            FileKind::Video
        } else if has("audio") {
            FileKind::Audio
        } else if has("zip") || has("archive") {
            FileKind::Archive
        } else if has("text") {
            FileKind::Document
        } else {
            FileKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Document => "document",
            FileKind::Spreadsheet => "spreadsheet",
            FileKind::Presentation => "presentation",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Archive => "archive",
            FileKind::Other => "file",
        }
    }
}

/// Human readable size with one decimal, e.g. `1.5 KB`. Capped at GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let rounded = (size * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[unit])
    } else {
        format!("{rounded:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: u64, task_id: u64, uploaded: Option<&str>) -> Attachment {
        Attachment {
            id,
            task_id,
            name: format!("file-{id}.txt"),
            upload_date: uploaded.map(String::from),
            ..Attachment::default()
        }
    }

    #[test]
    fn test_files_for_task_newest_first() {
        let files = vec![
            file(1, 7, Some("2024-03-01T10:00:00Z")),
            file(2, 7, None),
            file(3, 8, Some("2024-03-05T10:00:00Z")),
            file(4, 7, Some("2024-03-02")),
            file(5, 7, Some("whenever")),
        ];

        let ids: Vec<u64> = files_for_task(&files, 7, &TimeZone::UTC)
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![4, 1, 2, 5]);
    }

    #[test]
    fn test_file_kind_from_mime() {
        assert_eq!(FileKind::from_mime(Some("image/png")), FileKind::Image);
        assert_eq!(FileKind::from_mime(Some("application/pdf")), FileKind::Document);
        assert_eq!(
            FileKind::from_mime(Some(
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            )),
            FileKind::Document
        );
        assert_eq!(FileKind::from_mime(Some("application/vnd.ms-excel")), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_mime(Some("application/zip")), FileKind::Archive);
        assert_eq!(FileKind::from_mime(Some("text/plain")), FileKind::Document);
        assert_eq!(FileKind::from_mime(Some("application/octet-stream")), FileKind::Other);
        assert_eq!(FileKind::from_mime(None), FileKind::Other);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }
}
