// main.rs
use actix_cors::Cors;
use actix_files::Files;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::web::JsonConfig;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::env;

mod controllers;
mod db;
mod models;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting up...");

    let pool = match db::establish_connection().await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to initialise database pool: {:?}", e);
            std::process::exit(1);
        }
    };

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5000);
    log::info!("listening on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        let json_config = JsonConfig::default().error_handler(|err, _req| {
            log::error!("JSON payload error: {}", err);
            actix_web::error::ErrorBadRequest(format!("Payload error: {}", err))
        });

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(json_config)
            .wrap(cors)
            .wrap(Logger::default())
            //health
            .service(controllers::home_controller::health_check)
            //events
            .service(controllers::event_controller::get_events)
            .service(controllers::event_controller::create_event)
            //ratings
            .service(controllers::rating_controller::submit_rating)
            //static client
            .service(Files::new("/app", "./static").index_file("index.html"))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
