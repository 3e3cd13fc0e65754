use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("element {0} is not a {1}")]
    WrongElement(String, &'static str),
    #[error("could not read form {0}: {1}")]
    FormData(String, String),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        LandingError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_names_the_lookup() {
        let err = LandingError::MissingElement("#prev-btn".to_string());
        assert_eq!(err.to_string(), "element not found: #prev-btn");
    }

    #[test]
    fn wrong_element_names_expected_kind() {
        let err = LandingError::WrongElement("#coverage-form".to_string(), "form");
        assert_eq!(err.to_string(), "element #coverage-form is not a form");
    }
}
