use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::models::post::{DEFAULT_KIND, DEFAULT_PROMPT};
use crate::models::{Post, UploadMeta};

/// Flat-file post store: one image per post plus a `<stem>.txt` sidecar
/// (line 1 = prompt, line 2 = type) and an optional `<stem>_story.txt`.
#[derive(Clone)]
pub struct PostStorage {
    store_dir: PathBuf,
    export_dir: PathBuf,
}

impl PostStorage {
    pub fn new(store_dir: impl AsRef<Path>, export_dir: impl AsRef<Path>) -> Self {
        Self {
            store_dir: store_dir.as_ref().to_path_buf(),
            export_dir: export_dir.as_ref().to_path_buf(),
        }
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn ensure_store_exists(&self) -> io::Result<()> {
        fs::create_dir_all(&self.store_dir)
    }

    /// Writes the image and its sidecar files, returning the created post
    /// with zeroed counters. An existing post with the same derived
    /// filename is silently overwritten.
    pub fn save_post(&self, image: &[u8], original_name: &str, meta: UploadMeta) -> io::Result<Post> {
        self.ensure_store_exists()?;

        let timestamp = meta
            .timestamp
            .unwrap_or_else(|| Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string());
        let prompt = meta.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string());
        let kind = meta.kind.unwrap_or_else(|| DEFAULT_KIND.to_string());
        let story = meta.story.unwrap_or_default();

        let filename = derive_filename(&timestamp, original_name);
        let stem = stem_of(&filename);

        fs::write(self.store_dir.join(&filename), image)?;
        fs::write(
            self.store_dir.join(format!("{}.txt", stem)),
            format!("{}\n{}", prompt, kind),
        )?;
        if !story.is_empty() {
            fs::write(self.store_dir.join(format!("{}_story.txt", stem)), &story)?;
        }

        Ok(Post {
            id: filename.clone(),
            timestamp,
            prompt,
            story,
            filename,
            kind,
            likes: 0,
            comments: 0,
            shares: 0,
        })
    }

    /// Resolves an image filename against the store directory first, then
    /// the export directory. Returns None when absent from both.
    pub fn resolve_image(&self, filename: &str) -> Option<PathBuf> {
        for dir in [&self.store_dir, &self.export_dir] {
            let candidate = dir.join(filename);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

/// Replaces `:` and `.` in the timestamp with `-`, matching the filename
/// format the listing parser expects.
pub fn sanitize_timestamp(timestamp: &str) -> String {
    timestamp.replace([':', '.'], "-")
}

/// Derives the storage filename from the upload timestamp and the original
/// file name. A name starting with `.` (a bare extension) attaches directly
/// without a joining dash.
pub fn derive_filename(timestamp: &str, original_name: &str) -> String {
    let sanitized = sanitize_timestamp(timestamp);
    if original_name.starts_with('.') {
        format!("{}{}", sanitized, original_name)
    } else {
        format!("{}-{}", sanitized, original_name)
    }
}

/// Filename without its final extension; the sidecar files share this stem.
pub fn stem_of(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[..idx],
        None => filename,
    }
}

/// Reads the `<stem>.txt` sidecar: line 1 = prompt, line 2 = type.
/// Missing file or missing lines fall back to the documented defaults.
pub fn read_sidecar(dir: &Path, stem: &str) -> (String, String) {
    let path = dir.join(format!("{}.txt", stem));
    match fs::read_to_string(&path) {
        Ok(contents) => {
            let mut lines = contents.lines();
            let prompt = lines
                .next()
                .filter(|l| !l.is_empty())
                .unwrap_or(DEFAULT_PROMPT)
                .to_string();
            let kind = lines
                .next()
                .filter(|l| !l.is_empty())
                .unwrap_or(DEFAULT_KIND)
                .to_string();
            (prompt, kind)
        }
        Err(_) => (DEFAULT_PROMPT.to_string(), DEFAULT_KIND.to_string()),
    }
}

/// Reads the optional `<stem>_story.txt` sidecar, empty string when absent.
pub fn read_story(dir: &Path, stem: &str) -> String {
    fs::read_to_string(dir.join(format!("{}_story.txt", stem))).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sanitize_replaces_colons_and_dots() {
        assert_eq!(
            sanitize_timestamp("2025-01-02T03:04:05.678Z"),
            "2025-01-02T03-04-05-678Z"
        );
    }

    #[test]
    fn filename_joins_original_name_with_dash() {
        assert_eq!(
            derive_filename("2025-01-02T03:04:05.678Z", "art.png"),
            "2025-01-02T03-04-05-678Z-art.png"
        );
    }

    #[test]
    fn filename_attaches_bare_extension_without_dash() {
        assert_eq!(
            derive_filename("2025-01-02T03:04:05.678Z", ".png"),
            "2025-01-02T03-04-05-678Z.png"
        );
    }

    #[test]
    fn stem_strips_final_extension_only() {
        assert_eq!(stem_of("2025-10-26-215555.png"), "2025-10-26-215555");
        assert_eq!(stem_of("no_extension"), "no_extension");
    }

    #[test]
    fn save_post_writes_image_and_sidecars() {
        let dir = TempDir::new().unwrap();
        let storage = PostStorage::new(dir.path(), dir.path().join("export"));

        let meta = UploadMeta {
            timestamp: Some("2025-01-02T03:04:05.678Z".to_string()),
            prompt: Some("a quiet street".to_string()),
            story: Some("long form text".to_string()),
            kind: Some("autogen".to_string()),
        };
        let post = storage.save_post(b"imagebytes", "art.png", meta).unwrap();

        assert_eq!(post.id, "2025-01-02T03-04-05-678Z-art.png");
        assert_eq!(post.id, post.filename);
        assert_eq!(post.likes, 0);
        assert_eq!(post.comments, 0);
        assert_eq!(post.shares, 0);

        let image = dir.path().join("2025-01-02T03-04-05-678Z-art.png");
        assert_eq!(fs::read(image).unwrap(), b"imagebytes");

        let sidecar = dir.path().join("2025-01-02T03-04-05-678Z-art.txt");
        assert_eq!(
            fs::read_to_string(sidecar).unwrap(),
            "a quiet street\nautogen"
        );

        let story = dir.path().join("2025-01-02T03-04-05-678Z-art_story.txt");
        assert_eq!(fs::read_to_string(story).unwrap(), "long form text");
    }

    #[test]
    fn save_post_without_story_skips_story_sidecar() {
        let dir = TempDir::new().unwrap();
        let storage = PostStorage::new(dir.path(), dir.path().join("export"));

        let meta = UploadMeta {
            timestamp: Some("2025-01-02T03:04:05.678Z".to_string()),
            ..Default::default()
        };
        let post = storage.save_post(b"x", "art.png", meta).unwrap();

        assert_eq!(post.prompt, DEFAULT_PROMPT);
        assert_eq!(post.kind, DEFAULT_KIND);
        assert!(
            !dir.path()
                .join("2025-01-02T03-04-05-678Z-art_story.txt")
                .exists()
        );
    }

    #[test]
    fn save_post_overwrites_same_filename() {
        let dir = TempDir::new().unwrap();
        let storage = PostStorage::new(dir.path(), dir.path().join("export"));

        let meta = || UploadMeta {
            timestamp: Some("2025-01-02T03:04:05.678Z".to_string()),
            ..Default::default()
        };
        storage.save_post(b"first", "art.png", meta()).unwrap();
        storage.save_post(b"second", "art.png", meta()).unwrap();

        let image = dir.path().join("2025-01-02T03-04-05-678Z-art.png");
        assert_eq!(fs::read(image).unwrap(), b"second");
    }

    #[test]
    fn resolve_image_checks_store_then_export() {
        let root = TempDir::new().unwrap();
        let store = root.path().join("db");
        let export = root.path().join("export");
        fs::create_dir_all(&store).unwrap();
        fs::create_dir_all(&export).unwrap();
        let storage = PostStorage::new(&store, &export);

        fs::write(export.join("only-export.png"), b"e").unwrap();
        assert_eq!(
            storage.resolve_image("only-export.png").unwrap(),
            export.join("only-export.png")
        );
        assert!(storage.resolve_image("missing.png").is_none());
    }
}
