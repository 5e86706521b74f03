use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, http::header, web};
use futures_util::StreamExt;

use crate::error::AppError;
use crate::models::UploadMeta;
use crate::repositories::posts::load_all_posts;
use crate::storage::PostStorage;

const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// POST /api/upload
/// Accepts a multipart submission (`image` plus optional `timestamp`,
/// `prompt`, `story`, `type`) and persists it to the post store. The story
/// may arrive as an inline text field or as a second file part.
pub async fn upload_post(
    storage: web::Data<PostStorage>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut image: Option<Vec<u8>> = None;
    let mut original_name = String::from("file");
    let mut meta = UploadMeta::default();

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| AppError::BadRequest(format!("malformed multipart payload: {}", e)))?;
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                if let Some(filename) = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                {
                    original_name = filename.to_string();
                }
                image = Some(read_file_field(&mut field).await?);
            }
            "timestamp" => meta.timestamp = read_text_field(&mut field).await?,
            "prompt" => meta.prompt = read_text_field(&mut field).await?,
            "story" => meta.story = read_text_field(&mut field).await?,
            "type" => meta.kind = read_text_field(&mut field).await?,
            _ => drain_field(&mut field).await?,
        }
    }

    let image = image.ok_or_else(|| AppError::BadRequest("No image file provided".to_string()))?;

    let post = storage
        .save_post(&image, &original_name, meta)
        .map_err(|e| AppError::Internal(format!("failed to persist upload: {}", e)))?;

    log::info!("stored post {}", post.id);
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts
/// Returns every post in the store, newest first, with freshly randomized
/// engagement counters.
pub async fn list_posts(storage: web::Data<PostStorage>) -> Result<HttpResponse, AppError> {
    let posts = load_all_posts(storage.store_dir())
        .map_err(|e| AppError::Internal(format!("failed to scan post store: {}", e)))?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/images/{filename} (also mounted at /db/{filename})
/// Streams raw image bytes with a long-lived immutable cache header,
/// checking the store directory first and the export directory second.
pub async fn serve_image(
    storage: web::Data<PostStorage>,
    filename: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filename = filename.into_inner();
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(AppError::BadRequest("invalid image filename".to_string()));
    }

    let path = storage
        .resolve_image(&filename)
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| AppError::Internal(format!("failed to open {}: {}", path.display(), e)))?;
    let stream = tokio_util::io::ReaderStream::new(file);

    Ok(HttpResponse::Ok()
        .append_header((header::CONTENT_TYPE, content_type_for(&filename)))
        .append_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
        .streaming(stream))
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        // png and everything unrecognized serve as png
        _ => "image/png",
    }
}

/// Collects a file field into memory, rejecting payloads over the limit.
async fn read_file_field(field: &mut Field) -> Result<Vec<u8>, AppError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk =
            chunk.map_err(|e| AppError::BadRequest(format!("error reading upload: {}", e)))?;
        if buf.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest("image exceeds the 10MB limit".to_string()));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Collects a text field; empty fields count as absent so defaults apply.
async fn read_text_field(field: &mut Field) -> Result<Option<String>, AppError> {
    let bytes = read_file_field(field).await?;
    let text = String::from_utf8_lossy(&bytes).to_string();
    Ok(if text.is_empty() { None } else { Some(text) })
}

async fn drain_field(field: &mut Field) -> Result<(), AppError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| AppError::BadRequest(format!("error reading upload: {}", e)))?;
    }
    Ok(())
}
