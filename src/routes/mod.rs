use crate::errors::ApiError;
use crate::handlers;
use actix_web::web::{self, ServiceConfig};

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Invalid request body: {err}")).into()
    })
}

pub fn config(cfg: &mut ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::scope("/health").route("", web::get().to(handlers::health::ping)))
        .service(
            web::scope("/dishes")
                .service(
                    web::resource("")
                        .route(web::get().to(handlers::dishes::list_dishes))
                        .route(web::post().to(handlers::dishes::create_dish))
                        .default_service(web::to(handlers::method_not_allowed)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(handlers::dishes::get_dish))
                        .route(web::put().to(handlers::dishes::update_dish))
                        .default_service(web::to(handlers::method_not_allowed)),
                ),
        )
        .service(
            web::scope("/orders")
                .service(
                    web::resource("")
                        .route(web::get().to(handlers::orders::list_orders))
                        .route(web::post().to(handlers::orders::create_order))
                        .default_service(web::to(handlers::method_not_allowed)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(handlers::orders::get_order))
                        .route(web::put().to(handlers::orders::update_order))
                        .route(web::delete().to(handlers::orders::delete_order))
                        .default_service(web::to(handlers::method_not_allowed)),
                ),
        )
        .default_service(web::to(handlers::not_found));
}
