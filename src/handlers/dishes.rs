use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use super::{body, log_rejection, MaybePayload};
use crate::entities::{
    dish::{Dish, DishDraft},
    Envelope, Payload,
};
use crate::errors::ApiError;
use crate::state::AppState;
use crate::validation::{dishes, Submission};

fn missing(id: &str) -> impl FnOnce() -> String + '_ {
    move || format!("Dish does not exist: {id}.")
}

pub async fn list_dishes(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let items = state
        .dishes
        .list()
        .await
        .map_err(|_| ApiError::Internal)?;
    Ok(HttpResponse::Ok().json(Envelope::from(items)))
}

pub async fn get_dish(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let dish = state
        .dishes
        .get(&id)
        .await
        .map_err(|e| e.into_api(missing(&id)))?;
    Ok(HttpResponse::Ok().json(Envelope::from(dish)))
}

#[instrument(name = "create_dish", skip_all)]
pub async fn create_dish(
    state: web::Data<AppState>,
    payload: web::Json<Payload>,
) -> Result<HttpResponse, ApiError> {
    let Payload { data } = payload.into_inner();
    let draft: DishDraft = dishes::create()
        .run(&Submission::new(&data))
        .and_then(|()| dishes::draft(&data))
        .inspect_err(log_rejection)?;

    let created = state
        .dishes
        .insert(Dish::new(state.ids.next_id(), draft))
        .await
        .map_err(|e| e.into_api(String::new))?;
    info!(dish_id = %created.id, price = created.price, "dish created");
    Ok(HttpResponse::Created().json(Envelope::from(created)))
}

#[instrument(name = "update_dish", skip_all, fields(dish_id = %path.as_str()))]
pub async fn update_dish(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: MaybePayload,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let data = body(payload);
    if data.is_err() {
        state
            .dishes
            .get(&id)
            .await
            .map_err(|e| e.into_api(missing(&id)))?;
    }
    let data = data.inspect_err(log_rejection)?;
    let route_id = id.clone();

    let updated = state
        .dishes
        .update(
            &id,
            Box::new(move |dish: &mut Dish| -> Result<(), ApiError> {
                dishes::update().run(&Submission::new(&data).targeting(&route_id, &*dish))?;
                dish.apply(dishes::draft(&data)?);
                Ok(())
            }),
        )
        .await
        .map_err(|e| e.into_api(missing(&id)))
        .inspect_err(log_rejection)?;
    info!(dish_id = %updated.id, "dish updated");
    Ok(HttpResponse::Ok().json(Envelope::from(updated)))
}
