/// Result type alias for registry and annotation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while annotations are applied.
///
/// Apart from `Serialization`, every variant is a definition-time ordering
/// violation: the annotation referenced a container that an earlier step should
/// have created. Assembly itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No route fact was registered for the method before it was read.
    MissingRoute { controller: String, method: String },
    /// A response was declared before `ApiOperation` created the responses map.
    MissingResponses { controller: String, method: String },
    /// A class-level annotation ran for a controller nothing has registered.
    UnknownController(String),
    /// The assembled document could not be rendered for serving.
    Serialization(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingRoute { controller, method } => write!(
                f,
                "no route registered for {}::{}; register the route before ApiOperation/ApiDocument",
                controller, method
            ),
            Error::MissingResponses { controller, method } => write!(
                f,
                "responses of {}::{} do not exist yet; apply ApiOperation before ApiResponse",
                controller, method
            ),
            Error::UnknownController(name) => {
                write!(f, "controller {} has no registered routes or operations", name)
            }
            Error::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_method() {
        let err = Error::MissingResponses {
            controller: "Cat".to_string(),
            method: "findAll".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Cat::findAll"));
        assert!(message.contains("ApiOperation"));
    }

    #[test]
    fn test_unknown_controller_display() {
        let err = Error::UnknownController("Dog".to_string());
        assert_eq!(err.to_string(), "controller Dog has no registered routes or operations");
    }
}
