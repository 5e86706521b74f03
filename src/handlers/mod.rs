use actix_web::web;

pub mod posts;

/// Registers the API routes plus the `/db` alias used by statically
/// exported deployments.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/upload", web::post().to(posts::upload_post))
            .route("/posts", web::get().to(posts::list_posts))
            .route("/images/{filename}", web::get().to(posts::serve_image)),
    )
    .route("/db/{filename}", web::get().to(posts::serve_image));
}
