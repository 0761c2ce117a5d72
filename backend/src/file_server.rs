use std::{io, path::Path};

use actix_web::{HttpResponse, http::header};
use tokio::fs;
use tracing::{debug, error};

use crate::{error::AppError, mime};

pub const CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Debug)]
pub struct ServedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    pub download: bool,
}

impl ServedFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn content_disposition(&self) -> Option<String> {
        self.download.then(|| {
            format!(
                "attachment; filename*=UTF-8''{}",
                urlencoding::encode(&self.file_name)
            )
        })
    }

    pub fn into_response(self) -> HttpResponse {
        let disposition = self.content_disposition();
        let mut response = HttpResponse::Ok();
        response
            .content_type(self.mime_type)
            .insert_header((header::CACHE_CONTROL, CACHE_CONTROL));
        if let Some(disposition) = disposition {
            response.insert_header((header::CONTENT_DISPOSITION, disposition));
        }
        response.body(self.bytes)
    }
}

pub async fn serve(physical_path: &Path, download: bool) -> Result<ServedFile, AppError> {
    let shown = physical_path.display().to_string();
    let metadata = match fs::metadata(physical_path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %shown, "requested file does not exist");
            return Err(AppError::NotFound(shown));
        }
        Err(err) => {
            error!(path = %shown, error = %err, "failed to stat requested file");
            return Err(AppError::Io(err));
        }
    };

    if metadata.is_dir() {
        return Err(AppError::IsDirectory(shown));
    }

    let bytes = fs::read(physical_path).await.map_err(|err| {
        error!(path = %shown, error = %err, "failed to read requested file");
        AppError::Io(err)
    })?;

    let file_name = physical_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".into());

    Ok(ServedFile {
        mime_type: mime::classify(&file_name),
        file_name,
        bytes,
        download,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = serve(&dir.path().join("nope.txt"), false).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let result = serve(&dir.path().join("sub"), false).await;
        assert!(matches!(result, Err(AppError::IsDirectory(_))));
    }

    #[tokio::test]
    async fn file_is_buffered_with_mime_type() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("photo.PNG"), [0x89, b'P', b'N', b'G']).unwrap();

        let served = serve(&dir.path().join("photo.PNG"), false).await.unwrap();
        assert_eq!(served.mime_type, "image/png");
        assert_eq!(served.len(), 4);
        assert!(served.content_disposition().is_none());
    }

    #[tokio::test]
    async fn download_names_the_file_percent_encoded() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("年度 报告.pdf"), b"%PDF").unwrap();

        let served = serve(&dir.path().join("年度 报告.pdf"), true).await.unwrap();
        assert_eq!(
            served.content_disposition().unwrap(),
            "attachment; filename*=UTF-8''%E5%B9%B4%E5%BA%A6%20%E6%8A%A5%E5%91%8A.pdf"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_file_is_an_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.txt");
        std::fs::write(&path, "secret").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read(&path).is_ok() {
            // Running with privileges that ignore permission bits.
            return;
        }

        let result = serve(&path, false).await;
        assert!(matches!(result, Err(AppError::Io(_))));
        assert_eq!(
            actix_web::ResponseError::status_code(&result.unwrap_err()),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
