use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use crate::{error::AppError, mode::BrowseMode};

pub const DEFAULT_MAX_TEXT_FILE_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct FilesFolderConfig {
    pub enabled: bool,
    pub folder_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub max_text_file_size: u64,
    pub csv_row_limit: usize,
    pub csv_row_limit_expanded: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_dir: PathBuf,
    pub mode: BrowseMode,
    pub root_path: PathBuf,
    pub project_dir: PathBuf,
    pub files_folder: FilesFolderConfig,
    pub preview: PreviewConfig,
    pub snapshot_path: PathBuf,
    pub static_files_url: String,
    pub static_deployment: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let host = var("SERVER_HOST", "0.0.0.0");
        let port: u16 = parse_var(&lookup, "SERVER_PORT", 8080)?;
        let log_dir = PathBuf::from(var("EXPLORER_LOG_DIR", "./log"));

        let mode: BrowseMode = parse_var(&lookup, "FILE_BROWSER_MODE", BrowseMode::Local)?;
        let root_path = PathBuf::from(var("ROOT_PATH", "."));
        let project_dir = PathBuf::from(var("PROJECT_DIR", "."));
        let files_folder = FilesFolderConfig {
            enabled: parse_flag(&lookup, "FILES_MODE_ENABLED")?,
            folder_path: PathBuf::from(var("FILES_FOLDER_PATH", "public/files")),
        };

        let preview = PreviewConfig {
            max_text_file_size: parse_var(
                &lookup,
                "MAX_TEXT_FILE_SIZE",
                DEFAULT_MAX_TEXT_FILE_SIZE,
            )?,
            csv_row_limit: parse_var(&lookup, "CSV_ROW_LIMIT", 10)?,
            csv_row_limit_expanded: parse_var(&lookup, "CSV_ROW_LIMIT_EXPANDED", 50)?,
        };

        let snapshot_path = PathBuf::from(var("SNAPSHOT_PATH", "data/fileList.json"));
        let static_files_url = var("STATIC_FILES_URL", "/files");

        let static_deployment = parse_flag(&lookup, "STATIC_DEPLOYMENT")?
            || lookup("VERCEL").is_some_and(|value| !value.is_empty());

        Ok(Self {
            host,
            port,
            log_dir,
            mode,
            root_path,
            project_dir,
            files_folder,
            preview,
            snapshot_path,
            static_files_url,
            static_deployment,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|err| AppError::Config(format!("invalid {key}: {err}"))),
        _ => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        other => Err(AppError::Config(format!("invalid {key}: {other}"))),
    }
}
