use actix_web::{web, HttpResponse};
use serde_json::Map;
use tracing::{info, instrument};

use super::{body, log_rejection, MaybePayload};
use crate::entities::{
    order::{Order, OrderDraft},
    Envelope, Payload,
};
use crate::errors::ApiError;
use crate::state::AppState;
use crate::validation::{orders, Submission};

fn missing(id: &str) -> impl FnOnce() -> String + '_ {
    move || format!("Order {id} does not exist.")
}

pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let items = state
        .orders
        .list()
        .await
        .map_err(|_| ApiError::Internal)?;
    Ok(HttpResponse::Ok().json(Envelope::from(items)))
}

pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let order = state
        .orders
        .get(&id)
        .await
        .map_err(|e| e.into_api(missing(&id)))?;
    Ok(HttpResponse::Ok().json(Envelope::from(order)))
}

#[instrument(name = "create_order", skip_all)]
pub async fn create_order(
    state: web::Data<AppState>,
    payload: web::Json<Payload>,
) -> Result<HttpResponse, ApiError> {
    let Payload { data } = payload.into_inner();
    let draft: OrderDraft = orders::create()
        .run(&Submission::new(&data))
        .and_then(|()| orders::draft(&data))
        .inspect_err(log_rejection)?;

    let created = state
        .orders
        .insert(Order::new(state.ids.next_id(), draft))
        .await
        .map_err(|e| e.into_api(String::new))?;
    info!(order_id = %created.id, lines = created.dishes.len(), "order created");
    Ok(HttpResponse::Created().json(Envelope::from(created)))
}

#[instrument(name = "update_order", skip_all, fields(order_id = %path.as_str()))]
pub async fn update_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: MaybePayload,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let data = body(payload);
    if data.is_err() {
        state
            .orders
            .get(&id)
            .await
            .map_err(|e| e.into_api(missing(&id)))?;
    }
    let data = data.inspect_err(log_rejection)?;
    let route_id = id.clone();

    let updated = state
        .orders
        .update(
            &id,
            Box::new(move |order: &mut Order| -> Result<(), ApiError> {
                orders::update().run(&Submission::new(&data).targeting(&route_id, &*order))?;
                order.apply(orders::draft(&data)?);
                Ok(())
            }),
        )
        .await
        .map_err(|e| e.into_api(missing(&id)))
        .inspect_err(log_rejection)?;
    info!(order_id = %updated.id, status = %updated.status, "order updated");
    Ok(HttpResponse::Ok().json(Envelope::from(updated)))
}

#[instrument(name = "delete_order", skip_all, fields(order_id = %path.as_str()))]
pub async fn delete_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let route_id = id.clone();

    state
        .orders
        .remove(
            &id,
            Box::new(move |order: &Order| {
                let data = Map::new();
                let submission = Submission::new(&data).targeting(&route_id, order);
                orders::delete().run(&submission)
            }),
        )
        .await
        .map_err(|e| e.into_api(missing(&id)))
        .inspect_err(log_rejection)?;
    info!(order_id = %id, "order deleted");
    Ok(HttpResponse::NoContent().finish())
}
