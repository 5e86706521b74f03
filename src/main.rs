use actix_web::{App, HttpServer, web};
use artfeed::storage::PostStorage;
use artfeed::{config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    dotenv::dotenv().ok();

    let storage = PostStorage::new(config::store_dir(), config::export_dir());
    if let Err(e) = storage.ensure_store_exists() {
        log::warn!("could not create store directory: {}", e);
    }

    let bind_addr = config::bind_addr();
    log::info!("listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .configure(handlers::routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
