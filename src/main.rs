// src/main.rs - posts backend
use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info, warn};

use shareapp::config::{ServerConfig, mask_key};
use shareapp::{AppState, configure};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState::new(config.imagekit_private_key.clone()));
    match config.imagekit_private_key.as_deref() {
        Some(key) if state.upload_auth.is_configured() => {
            info!("ImageKit private key: {}", mask_key(key))
        }
        _ => warn!("IMAGEKIT_PRIVATE_KEY not set, /api/auth/imagekit will fail"),
    }

    let allowed_origins = config.allowed_origins.clone();
    let bind_address = config.bind_address();

    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["content-type", "accept", "x-requested-with"])
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
