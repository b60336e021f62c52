//! Domain ports and supporting types for the hexagonal boundary.

mod dashboard_session;
mod document_store;
mod identity_provider;

#[cfg(test)]
pub use dashboard_session::MockDashboardSession;
pub use dashboard_session::DashboardSession;
#[cfg(test)]
pub use document_store::MockDocumentStore;
pub(crate) use document_store::merge_fields;
pub use document_store::{DocumentStore, DocumentStoreError, FixtureDocumentStore};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FixtureIdentityProvider, Identity, IdentityProvider, IdentityProviderError,
};
