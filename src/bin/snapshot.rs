//! Offline snapshot generator: scans the export directory with the same
//! listing logic the API uses and writes a pretty-printed posts.json for
//! statically deployed builds that fetch the snapshot before the API.

use std::fs;
use std::io;

use artfeed::config;
use artfeed::repositories::posts::load_all_posts;

fn main() -> io::Result<()> {
    env_logger::init();

    dotenv::dotenv().ok();

    let export_dir = config::export_dir();
    let snapshot_path = config::snapshot_path();

    let posts = load_all_posts(&export_dir)?;
    let json = serde_json::to_string_pretty(&posts).map_err(io::Error::other)?;

    if let Some(parent) = snapshot_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&snapshot_path, json)?;

    log::info!(
        "wrote {} posts from {} to {}",
        posts.len(),
        export_dir.display(),
        snapshot_path.display()
    );
    Ok(())
}
