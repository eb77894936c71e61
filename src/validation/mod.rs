//! Ordered, short-circuiting request checks.
//!
//! A [`Pipeline`] is a list of stages run in order against a [`Submission`].
//! The first stage that fails ends the run; later stages never see the request.

pub mod dishes;
pub mod orders;

use serde_json::{Map, Value};

use crate::errors::ApiError;

/// What a stage gets to look at.
pub struct Submission<'a, T> {
    /// Id taken from the request path, if the route has one.
    pub route_id: Option<&'a str>,
    /// The `data` object from the request body.
    pub data: &'a Map<String, Value>,
    /// The stored record the request targets, for update and delete.
    pub existing: Option<&'a T>,
}

impl<'a, T> Submission<'a, T> {
    pub fn new(data: &'a Map<String, Value>) -> Self {
        Self {
            route_id: None,
            data,
            existing: None,
        }
    }

    pub fn targeting(mut self, route_id: &'a str, existing: &'a T) -> Self {
        self.route_id = Some(route_id);
        self.existing = Some(existing);
        self
    }
}

type Stage<T> = Box<dyn Fn(&Submission<'_, T>) -> Result<(), ApiError> + Send + Sync>;

pub struct Pipeline<T> {
    stages: Vec<Stage<T>>,
}

impl<T: 'static> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Pipeline<T> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn stage<F>(mut self, check: F) -> Self
    where
        F: Fn(&Submission<'_, T>) -> Result<(), ApiError> + Send + Sync + 'static,
    {
        self.stages.push(Box::new(check));
        self
    }

    pub fn run(&self, submission: &Submission<'_, T>) -> Result<(), ApiError> {
        self.stages.iter().try_for_each(|stage| stage(submission))
    }
}

/// JavaScript-style truthiness: `null`, `false`, `0` and `""` count as absent.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A JSON number with no fractional part that is at least 1.
pub fn positive_integer(v: &Value) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        return (n > 0).then_some(n);
    }
    v.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

/// Fails with "`<kind>` must include a `<field>`" unless the field is truthy.
pub fn has_property<T: 'static>(
    kind: &'static str,
    field: &'static str,
) -> impl Fn(&Submission<'_, T>) -> Result<(), ApiError> + Send + Sync + 'static {
    move |s: &Submission<'_, T>| {
        if s.data.get(field).is_some_and(is_truthy) {
            Ok(())
        } else {
            Err(ApiError::BadRequest(format!("{kind} must include a {field}")))
        }
    }
}

/// Fails when the body carries a truthy `id` different from the route id.
pub fn id_matches_route<T: 'static>(
    kind: &'static str,
    trailer: &'static str,
) -> impl Fn(&Submission<'_, T>) -> Result<(), ApiError> + Send + Sync + 'static {
    move |s: &Submission<'_, T>| {
        let (Some(route_id), Some(id)) = (s.route_id, s.data.get("id")) else {
            return Ok(());
        };
        if !is_truthy(id) {
            return Ok(());
        }
        // Route ids are strings, so a body id of any other JSON type never matches.
        let body_id = match id {
            Value::String(raw) if raw == route_id => return Ok(()),
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        };
        Err(ApiError::BadRequest(format!(
            "{kind} id does not match route id. {kind}: {body_id}, Route: {route_id}{trailer}"
        )))
    }
}

/// Reads a string field that a pipeline already checked for presence.
pub(crate) fn text(kind: &str, data: &Map<String, Value>, field: &str) -> Result<String, ApiError> {
    data.get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::BadRequest(format!("{kind} {field} must be a string")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn truthiness() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!(-1), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn positive_integers() {
        assert_eq!(positive_integer(&json!(5)), Some(5));
        assert_eq!(positive_integer(&json!(5.0)), Some(5));
        assert_eq!(positive_integer(&json!(0)), None);
        assert_eq!(positive_integer(&json!(-3)), None);
        assert_eq!(positive_integer(&json!(2.5)), None);
        assert_eq!(positive_integer(&json!("5")), None);
        assert_eq!(positive_integer(&json!(null)), None);
    }

    #[test]
    fn first_failure_stops_the_run() {
        let reached = Arc::new(AtomicUsize::new(0));
        let counter = reached.clone();
        let pipeline: Pipeline<()> = Pipeline::new()
            .stage(has_property("Dish", "name"))
            .stage(move |_: &Submission<'_, ()>| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });

        let data = obj(json!({}));
        let err = pipeline.run(&Submission::new(&data)).unwrap_err();
        assert_eq!(err, ApiError::BadRequest("Dish must include a name".into()));
        assert_eq!(reached.load(Ordering::SeqCst), 0);

        let data = obj(json!({ "name": "Taco" }));
        pipeline.run(&Submission::new(&data)).unwrap();
        assert_eq!(reached.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn id_check_ignores_missing_or_falsy_id() {
        let check = id_matches_route::<()>("Dish", "");
        let existing = ();
        for body in [json!({}), json!({ "id": "" }), json!({ "id": null }), json!({ "id": "7" })] {
            let data = obj(body);
            check(&Submission::new(&data).targeting("7", &existing)).unwrap();
        }
    }

    #[test]
    fn id_check_rejects_numeric_id_even_when_digits_match() {
        let check = id_matches_route::<()>("Dish", "");
        let existing = ();
        let data = obj(json!({ "id": 7 }));
        let err = check(&Submission::new(&data).targeting("7", &existing)).unwrap_err();
        assert_eq!(
            err,
            ApiError::BadRequest("Dish id does not match route id. Dish: 7, Route: 7".into())
        );
    }

    #[test]
    fn id_check_rejects_mismatch() {
        let check = id_matches_route::<()>("Order", ".");
        let existing = ();
        let data = obj(json!({ "id": "8" }));
        let err = check(&Submission::new(&data).targeting("7", &existing)).unwrap_err();
        assert_eq!(
            err,
            ApiError::BadRequest("Order id does not match route id. Order: 8, Route: 7.".into())
        );
    }
}
