use actix_web::{middleware::Logger, web, App, HttpServer};

use quizgen_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let state = AppState::new(config.clone()).expect("failed to initialise application state");

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    println!("starting HTTP server on {}:{}", host, port);
    log::info!(
        "wikidata enrichment: {}",
        if config.enable_wikidata { "enabled" } else { "disabled" }
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .service(handlers::get_quiz)
            .service(handlers::list_videos)
            .service(handlers::health_check)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
