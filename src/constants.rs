//! Application constants and configuration

pub const APP_NAME: &str = "MiniGallery";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const API_URL_ENV: &str = "MINIGALLERY_API_URL";
pub const LIST_IMAGES_PATH: &str = "/api/images/";
pub const UPLOAD_IMAGE_PATH: &str = "/upload/";

/// Matches the server's `title` column length
pub const MAX_TITLE_LEN: usize = 200;

/// Concurrent image asset downloads per collection load
pub const MAX_CONCURRENT_ASSETS: usize = 8;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];
