use serde_json::{Map, Value};

use super::{has_property, id_matches_route, positive_integer, text, Pipeline, Submission};
use crate::entities::dish::{Dish, DishDraft};
use crate::errors::ApiError;

const KIND: &str = "Dish";
const PRICE_MSG: &str = "Dish must have a price that is an integer greater than 0";

fn price_is_valid(s: &Submission<'_, Dish>) -> Result<(), ApiError> {
    s.data
        .get("price")
        .and_then(positive_integer)
        .map(|_| ())
        .ok_or_else(|| ApiError::BadRequest(PRICE_MSG.into()))
}

fn fields() -> Pipeline<Dish> {
    Pipeline::new()
        .stage(has_property(KIND, "name"))
        .stage(has_property(KIND, "description"))
        .stage(has_property(KIND, "price"))
        .stage(has_property(KIND, "image_url"))
        .stage(price_is_valid)
}

pub fn create() -> Pipeline<Dish> {
    fields()
}

pub fn update() -> Pipeline<Dish> {
    fields().stage(id_matches_route(KIND, ""))
}

/// Builds the typed fields from a body that passed [`create`] or [`update`].
pub fn draft(data: &Map<String, Value>) -> Result<DishDraft, ApiError> {
    Ok(DishDraft {
        name: text(KIND, data, "name")?,
        description: text(KIND, data, "description")?,
        price: data
            .get("price")
            .and_then(positive_integer)
            .ok_or_else(|| ApiError::BadRequest(PRICE_MSG.into()))?,
        image_url: text(KIND, data, "image_url")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    fn valid() -> Value {
        json!({ "name": "Taco", "description": "d", "price": 5, "image_url": "u" })
    }

    fn message(r: Result<(), ApiError>) -> String {
        match r.unwrap_err() {
            ApiError::BadRequest(m) => m,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_body() {
        let data = obj(valid());
        create().run(&Submission::new(&data)).unwrap();
        let d = draft(&data).unwrap();
        assert_eq!(d.price, 5);
        assert_eq!(d.image_url, "u");
    }

    #[test]
    fn reports_first_missing_field_in_order() {
        let data = obj(json!({ "price": 0 }));
        assert_eq!(
            message(create().run(&Submission::new(&data))),
            "Dish must include a name"
        );

        let data = obj(json!({ "name": "Taco", "description": "d", "image_url": "u" }));
        assert_eq!(
            message(create().run(&Submission::new(&data))),
            "Dish must include a price"
        );

        let data = obj(json!({ "name": "Taco", "description": "d", "price": 5, "image_url": "" }));
        assert_eq!(
            message(create().run(&Submission::new(&data))),
            "Dish must include a image_url"
        );
    }

    #[test]
    fn rejects_bad_prices() {
        for price in [json!(-1), json!(2.5), json!("5")] {
            let mut data = obj(valid());
            data.insert("price".into(), price);
            assert_eq!(message(create().run(&Submission::new(&data))), PRICE_MSG);
        }
    }

    #[test]
    fn update_checks_route_id_last() {
        let existing = Dish::new("1".into(), draft(&obj(valid())).unwrap());

        let mut data = obj(valid());
        data.insert("id".into(), json!("2"));
        assert_eq!(
            message(update().run(&Submission::new(&data).targeting("1", &existing))),
            "Dish id does not match route id. Dish: 2, Route: 1"
        );

        data.remove("name");
        assert_eq!(
            message(update().run(&Submission::new(&data).targeting("1", &existing))),
            "Dish must include a name"
        );

        let mut data = obj(valid());
        data.insert("id".into(), json!("1"));
        update()
            .run(&Submission::new(&data).targeting("1", &existing))
            .unwrap();
    }

    #[test]
    fn draft_rejects_non_string_fields() {
        let mut data = obj(valid());
        data.insert("name".into(), json!(12));
        assert_eq!(
            draft(&data).unwrap_err(),
            ApiError::BadRequest("Dish name must be a string".into())
        );
    }
}
