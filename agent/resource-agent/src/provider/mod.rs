mod error;

pub use self::error::{AsResources, IntoProviderError, ProviderError, ProviderResult, Resources};
use provider_model::AttributeStore;

/// You implement the [`Create`] trait in order to create a resource. The host hands you the
/// resource's [`AttributeStore`], which holds the configured attributes and an empty identity.
///
/// On success the implementation must set a non-empty identity (and any computed attributes). On
/// failure it must leave the identity empty and return an error that states, through
/// [`Resources`], whether infrastructure may have been left behind.
#[async_trait::async_trait]
pub trait Create: Send + Sync {
    async fn create(&self, data: &mut dyn AttributeStore) -> ProviderResult<()>;
}

/// You implement the [`Read`] trait to refresh the recorded state of an existing resource. An
/// implementation that does not detect drift can simply return `Ok(())`.
#[async_trait::async_trait]
pub trait Read: Send + Sync {
    async fn read(&self, data: &mut dyn AttributeStore) -> ProviderResult<()>;
}

/// You implement the [`Update`] trait to change an existing resource in place. The store holds the
/// new attributes and the existing identity.
#[async_trait::async_trait]
pub trait Update: Send + Sync {
    async fn update(&self, data: &mut dyn AttributeStore) -> ProviderResult<()>;
}

/// You implement the [`Destroy`] trait in order to delete a resource that you have previously
/// created. On success the implementation must clear the identity; on failure it must leave it
/// untouched so that the host still believes the resource exists.
#[async_trait::async_trait]
pub trait Destroy: Send + Sync {
    async fn destroy(&self, data: &mut dyn AttributeStore) -> ProviderResult<()>;
}

/// Everything a resource type needs to take part in the full lifecycle. This is implemented
/// automatically for any type that implements the four lifecycle traits, and is what the
/// [`Registry`](crate::Registry) stores.
pub trait Provider: Create + Read + Update + Destroy {}

impl<T> Provider for T where T: Create + Read + Update + Destroy {}
