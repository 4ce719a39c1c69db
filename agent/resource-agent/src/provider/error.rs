use std::fmt::{Display, Formatter};

/// When a lifecycle operation fails, it must explicitly state whether or not the external tool may
/// have left infrastructure behind. No automatic rollback is ever attempted; this classification
/// tells the host (and the person reading the error) what state the world is likely in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resources {
    /// Infrastructure exists and the resource still holds its identity, so a later delete can
    /// clean it up.
    Remaining,

    /// Nothing was changed outside of this process.
    Clear,

    /// The external tool ran and failed part way through; it may or may not have left
    /// infrastructure behind.
    Unknown,
}

/// This is a trait that you can implement for your own types to describe whether or not
/// infrastructure remains after an error.
///
/// # Example
///
/// ```
/// use resource_agent::provider::{AsResources, Resources};
/// struct StackIds {
///     ids: Vec<String>
/// }
/// impl AsResources for StackIds {
///     fn as_resources(&self) -> Resources {
///         if self.ids.is_empty() {
///             Resources::Clear
///         } else {
///             Resources::Remaining
///         }
///     }
/// }
/// ```
///
pub trait AsResources {
    /// Inspects `&self` and determines if there are resources remaining.
    fn as_resources(&self) -> Resources;
}

impl AsResources for Resources {
    fn as_resources(&self) -> Resources {
        *self
    }
}

/// The error type returned by [`Create`], [`Read`], [`Update`] and [`Destroy`] implementations.
#[derive(Debug)]
pub struct ProviderError {
    /// Whether or not the error has left resources behind.
    resources: Resources,

    /// What was being attempted, e.g. which operation on which resource identity. This is
    /// displayed before `inner`.
    context: Option<String>,

    /// The error that caused this error.
    inner: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

/// The result type returned by lifecycle operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

impl ProviderError {
    pub fn new_with_source_and_context<R, S, E>(resources: R, context: S, source: E) -> Self
    where
        R: AsResources,
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            resources: resources.as_resources(),
            context: Some(context.into()),
            inner: Some(source.into()),
        }
    }

    pub fn new_with_context<R, S>(resources: R, context: S) -> Self
    where
        R: AsResources,
        S: Into<String>,
    {
        Self {
            resources: resources.as_resources(),
            context: Some(context.into()),
            inner: None,
        }
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn inner(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.inner.as_ref().map(|some| some.as_ref())
    }

    /// The underlying error as a concrete type, if it is one. This is how callers tell a
    /// configuration error apart from a failure of the external process.
    pub fn inner_as<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.inner().and_then(|inner| inner.downcast_ref::<E>())
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.resources())?;
        if let Some(context) = self.context() {
            write!(f, ", {}", context)?;
        }
        if let Some(inner) = self.inner() {
            write!(f, ": {}", inner)?;
        }
        Ok(())
    }
}

impl Resources {
    pub fn message(&self) -> &'static str {
        match self {
            Resources::Remaining => "An error occurred and the resource still exists",
            Resources::Clear => "An error occurred but nothing was changed",
            Resources::Unknown => {
                "An error occurred and it is unknown whether or not infrastructure was left behind"
            }
        }
    }
}

impl Display for Resources {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.message(), f)
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// A trait that makes it possible to convert error types to `ProviderError` using a familiar
/// `context` function.
pub trait IntoProviderError<T> {
    /// Convert `self` into a `ProviderError`.
    fn context<R, S>(self, resources: R, message: S) -> ProviderResult<T>
    where
        S: Into<String>,
        R: AsResources;
}

impl<T, E> IntoProviderError<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<R, S>(self, resources: R, message: S) -> ProviderResult<T>
    where
        S: Into<String>,
        R: AsResources,
    {
        self.map_err(|e| ProviderError::new_with_source_and_context(resources, message, e))
    }
}

#[test]
fn provider_error_display_includes_context_and_source() {
    let source: Result<(), std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "no such file",
    ));
    let error = source
        .context(Resources::Clear, "Unable to create cluster 'prod'")
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "An error occurred but nothing was changed, Unable to create cluster 'prod': no such file"
    );
    assert!(error.inner_as::<std::io::Error>().is_some());
    assert!(error.inner_as::<std::fmt::Error>().is_none());
}
