//! Conversion of handler return values into payloads.

use serde::Serialize;
use serde_json::Value;
use switchyard_core::{ActionError, Payload};

/// What a handler produced once its return value is converted.
pub type Outcome = Result<Payload, ActionError>;

/// A trait for types a handler may return.
pub trait IntoOutcome: Send {
    fn into_outcome(self) -> Outcome;
}

/// `()` produces an empty payload.
impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Ok(Payload::Empty)
    }
}

impl IntoOutcome for String {
    fn into_outcome(self) -> Outcome {
        Ok(Payload::Text(self))
    }
}

impl IntoOutcome for &'static str {
    fn into_outcome(self) -> Outcome {
        Ok(Payload::Text(self.to_string()))
    }
}

impl IntoOutcome for Payload {
    fn into_outcome(self) -> Outcome {
        Ok(self)
    }
}

impl IntoOutcome for Value {
    fn into_outcome(self) -> Outcome {
        Ok(Payload::Json(self))
    }
}

impl IntoOutcome for Vec<u8> {
    fn into_outcome(self) -> Outcome {
        Ok(Payload::Bytes(self))
    }
}

/// Serialises the wrapped value as a JSON payload.
///
/// ```rust
/// use serde::Serialize;
/// use switchyard_framework::Json;
///
/// #[derive(Serialize)]
/// struct User {
///     id: i64,
/// }
///
/// async fn get_user(id: i64) -> Json<User> {
///     Json(User { id })
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<T: Serialize + Send> IntoOutcome for Json<T> {
    fn into_outcome(self) -> Outcome {
        Ok(Payload::Json(serde_json::to_value(self.0)?))
    }
}

/// `None` produces an empty payload.
impl<T: IntoOutcome> IntoOutcome for Option<T> {
    fn into_outcome(self) -> Outcome {
        match self {
            Some(value) => value.into_outcome(),
            None => Ok(Payload::Empty),
        }
    }
}

/// `Err` is surfaced as a handler failure; see [`ActionError`] for the
/// mapping to failure kinds.
impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<ActionError> + Send,
{
    fn into_outcome(self) -> Outcome {
        self.map_err(Into::into)?.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_become_text() {
        assert_eq!("hi".into_outcome().unwrap(), Payload::Text("hi".into()));
        assert_eq!(().into_outcome().unwrap(), Payload::Empty);
    }

    #[test]
    fn json_wrapper_serialises() {
        #[derive(Serialize)]
        struct User {
            id: i64,
        }
        let payload = Json(User { id: 7 }).into_outcome().unwrap();
        assert_eq!(payload, Payload::Json(serde_json::json!({"id": 7})));
    }

    #[test]
    fn errors_pass_through() {
        let result: Result<String, ActionError> = Err(ActionError::missing("--words"));
        assert!(matches!(
            result.into_outcome(),
            Err(ActionError::MissingParameter { .. })
        ));
        let none: Option<String> = None;
        assert_eq!(none.into_outcome().unwrap(), Payload::Empty);
    }
}
