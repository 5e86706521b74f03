use std::io;
use std::path::Path;

use rand::Rng;

use crate::models::Post;
use crate::storage::{read_sidecar, read_story, stem_of};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Scans the store directory and reconstructs every post, newest first.
///
/// Engagement counters are drawn fresh on every call; they are display
/// garnish, not persisted state. A missing directory yields an empty list.
pub fn load_all_posts(dir: &Path) -> io::Result<Vec<Post>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut rng = rand::thread_rng();
    let mut posts = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if !is_image_file(&name) {
            continue;
        }

        let stem = stem_of(&name);
        let (prompt, kind) = read_sidecar(dir, stem);
        let story = read_story(dir, stem);

        posts.push(Post {
            id: name.clone(),
            timestamp: timestamp_from_stem(stem),
            prompt,
            story,
            filename: name,
            kind,
            likes: rng.gen_range(5..=54),
            comments: rng.gen_range(0..=9),
            shares: rng.gen_range(0..=4),
        });
    }

    // Descending string comparison; the zero-padded fixed-width filename
    // format makes this match chronological order.
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(posts)
}

fn is_image_file(name: &str) -> bool {
    name.rsplit('.')
        .next()
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recovers the display timestamp from a filename stem.
///
/// A stem shaped like `YYYY-MM-DD-HHMMSS` (at least four dash-separated
/// parts, the fourth exactly six ASCII characters) becomes
/// `"YYYY-MM-DD HH:MM:SS"`; any other stem passes through verbatim. The
/// ASCII requirement keeps the fixed slice offsets on char boundaries for
/// filenames with multibyte segments.
pub fn timestamp_from_stem(stem: &str) -> String {
    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() >= 4 && parts[3].len() == 6 && parts[3].is_ascii() {
        let time = parts[3];
        format!(
            "{}-{}-{} {}:{}:{}",
            parts[0],
            parts[1],
            parts[2],
            &time[0..2],
            &time[2..4],
            &time[4..6]
        )
    } else {
        stem.to_string()
    }
}
