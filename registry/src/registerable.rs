//! Registration support for component types.

use async_trait::async_trait;

use crate::error::Result;
use crate::registry::{EntryId, Registry};

/// A component type that knows how to register itself.
///
/// Registration is explicit: implementors call
/// [`register_into`](Self::register_into) when (and if) they want to be
/// registered, rather than inheriting registration as a construction side
/// effect. The default alias is the type's bare name.
#[async_trait]
pub trait Registerable: Send + Sync + Sized + 'static {
    /// The alias to register under by default.
    fn default_alias() -> &'static str {
        let name = std::any::type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }

    /// Register this value under [`default_alias`](Self::default_alias).
    async fn register_into(self, registry: &Registry<Self>) -> Result<EntryId> {
        registry.register_with_alias(self, Self::default_alias()).await
    }
}
