use crate::provider::ProviderError;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// This is the error type returned by an [`Agent`](crate::Agent). When receiving this error type
/// you will typically want to display it and exit your main function with a non-zero exit code.
#[derive(Debug)]
pub enum AgentError {
    /// The requested resource type is not in the [`Registry`](crate::Registry).
    UnknownResourceType(ErrorMessage),
    Provider(ProviderError),
}

/// The result type returned by an [`Agent`](crate::Agent).
pub type AgentResult<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// The provider error, if this error came from a lifecycle operation.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            AgentError::Provider(e) => Some(e),
            AgentError::UnknownResourceType(_) => None,
        }
    }
}

impl ErrorEnum for AgentError {
    fn variant_name(&self) -> &'static str {
        match self {
            AgentError::UnknownResourceType(_) => "Unknown resource type",
            AgentError::Provider(_) => "Provider error",
        }
    }

    fn inner(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            AgentError::UnknownResourceType(e) => Some(e as &(dyn Error + Send + Sync + 'static)),
            AgentError::Provider(e) => Some(e as &(dyn Error + Send + Sync + 'static)),
        }
    }
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.display(f)
    }
}

impl Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner_as_source()
    }
}

impl From<ProviderError> for AgentError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

/// This struct can serve as an `Error` type when you want to provide an error message, but have no
/// underlying error type. It allows a string to serve as an error. This can be useful for custom
/// (i.e. mock) implementations of [`CommandRunner`](crate::process::CommandRunner).
///
/// # Example
///
/// ```
/// # use resource_agent::error::ErrorMessage;
/// // Create a std::error::Error from a string.
/// let _error: ErrorMessage = "Something bad happened".into();
/// ```
///
#[derive(Debug)]
pub struct ErrorMessage {
    message: String,
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.message, f)
    }
}

impl<S: Into<String>> From<S> for ErrorMessage {
    fn from(s: S) -> Self {
        Self { message: s.into() }
    }
}

impl std::error::Error for ErrorMessage {}

/// This internal trait helps de-duplicate a bit of code that we use when implementing `Display`
/// and `Error` for our error enums.
pub(crate) trait ErrorEnum {
    fn variant_name(&self) -> &'static str;
    fn inner(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)>;

    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.inner() {
            None => Display::fmt(self.variant_name(), f),
            Some(inner) => write!(f, "{}: {}", self.variant_name(), inner),
        }
    }

    fn inner_as_source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner().map(|some| some as &(dyn Error + 'static))
    }
}

#[test]
fn unknown_resource_type_display() {
    let error = AgentError::UnknownResourceType("eksctl_nodegroup".into());
    assert_eq!(error.to_string(), "Unknown resource type: eksctl_nodegroup");
    assert!(error.provider_error().is_none());
}
