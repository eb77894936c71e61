use serde_json::{Map, Value};

use super::{has_property, id_matches_route, is_truthy, positive_integer, text, Pipeline, Submission};
use crate::entities::order::{Order, OrderDraft, OrderLine, OrderStatus};
use crate::errors::ApiError;

const KIND: &str = "Order";

fn bad(msg: impl Into<String>) -> ApiError {
    ApiError::BadRequest(msg.into())
}

fn dishes_not_empty(s: &Submission<'_, Order>) -> Result<(), ApiError> {
    match s.data.get("dishes") {
        Some(Value::Array(items)) if !items.is_empty() => Ok(()),
        _ => Err(bad("Order must include at least one dish")),
    }
}

fn quantity_msg(index: usize) -> String {
    format!("Dish {index} must have a quantity that is an integer greater than 0")
}

fn dish_quantities(s: &Submission<'_, Order>) -> Result<(), ApiError> {
    let items = s.data.get("dishes").and_then(Value::as_array);
    for (i, item) in items.into_iter().flatten().enumerate() {
        if item.get("quantity").and_then(positive_integer).is_none() {
            return Err(bad(quantity_msg(i)));
        }
    }
    Ok(())
}

fn status_is_known(s: &Submission<'_, Order>) -> Result<(), ApiError> {
    let known = s
        .data
        .get("status")
        .filter(|v| is_truthy(v))
        .and_then(Value::as_str)
        .and_then(OrderStatus::parse);
    match known {
        Some(_) => Ok(()),
        None => Err(bad(
            "Order must have a status of pending, preparing, out-for-delivery, delivered",
        )),
    }
}

fn not_delivered(s: &Submission<'_, Order>) -> Result<(), ApiError> {
    match s.existing {
        Some(o) if o.status == OrderStatus::Delivered => {
            Err(bad("A delivered order cannot be changed"))
        }
        _ => Ok(()),
    }
}

fn is_pending(s: &Submission<'_, Order>) -> Result<(), ApiError> {
    match s.existing {
        Some(o) if o.status == OrderStatus::Pending => Ok(()),
        _ => Err(bad("An order cannot be deleted unless it is pending")),
    }
}

fn fields() -> Pipeline<Order> {
    Pipeline::new()
        .stage(has_property(KIND, "deliverTo"))
        .stage(has_property(KIND, "mobileNumber"))
        .stage(has_property(KIND, "dishes"))
        .stage(dishes_not_empty)
        .stage(dish_quantities)
}

pub fn create() -> Pipeline<Order> {
    fields()
}

pub fn update() -> Pipeline<Order> {
    fields()
        .stage(status_is_known)
        .stage(not_delivered)
        .stage(id_matches_route(KIND, "."))
}

pub fn delete() -> Pipeline<Order> {
    Pipeline::new().stage(is_pending)
}

fn line(index: usize, item: &Value) -> Result<OrderLine, ApiError> {
    let quantity = item
        .get("quantity")
        .and_then(positive_integer)
        .ok_or_else(|| bad(quantity_msg(index)))?;
    let dish_id = match item.get("dishId") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => return Err(bad(format!("Dish {index} has an invalid dishId"))),
    };
    Ok(OrderLine { dish_id, quantity })
}

/// Builds the typed fields from a body that passed [`create`] or [`update`].
/// A falsy or absent status reads as pending.
pub fn draft(data: &Map<String, Value>) -> Result<OrderDraft, ApiError> {
    let status = match data.get("status").filter(|v| is_truthy(v)) {
        None => OrderStatus::Pending,
        Some(v) => v
            .as_str()
            .and_then(OrderStatus::parse)
            .ok_or_else(|| bad(format!("Order has an unknown status: {v}")))?,
    };
    let dishes = data
        .get("dishes")
        .and_then(Value::as_array)
        .ok_or_else(|| bad("Order must include at least one dish"))?
        .iter()
        .enumerate()
        .map(|(i, item)| line(i, item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OrderDraft {
        deliver_to: text(KIND, data, "deliverTo")?,
        mobile_number: text(KIND, data, "mobileNumber")?,
        status,
        dishes,
    })
}
