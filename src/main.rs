use std::io;

use actix_web::{middleware::Logger, App, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

use grubdash::config::{AppConfig, IdStrategy};
use grubdash::entities::{dish::Dish, order::Order};
use grubdash::repositories::in_memory::InMemoryRepository;
use grubdash::routes;
use grubdash::seed::Seed;
use grubdash::state::AppState;
use grubdash::utils::{IdGenerator, SequentialIds, UuidIds};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cfg = AppConfig::from_env().map_err(io::Error::other)?;

    let seed = match &cfg.seed_path {
        Some(path) => Seed::from_path(path).map_err(io::Error::other)?,
        None => Seed::default(),
    };

    let ids: Box<dyn IdGenerator> = match cfg.id_strategy {
        IdStrategy::Sequential => Box::new(SequentialIds::after(seed.ids())),
        IdStrategy::Uuid => Box::new(UuidIds),
    };

    let dishes = InMemoryRepository::<Dish>::default();
    let orders = InMemoryRepository::<Order>::default();
    let (n_dishes, n_orders) = seed
        .load_into(&dishes, &orders)
        .await
        .map_err(io::Error::other)?;
    info!(dishes = n_dishes, orders = n_orders, id_strategy = ?cfg.id_strategy, "stores ready");

    let state = AppState::new(dishes, orders, ids);

    info!(addr = %cfg.server_addr, "listening");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::config)
    })
    .bind(&cfg.server_addr)?
    .run()
    .await
}
