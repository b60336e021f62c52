//! Dashboard domain service.
//!
//! This module implements the [`DashboardSession`] driving port on top of the
//! document store and identity provider ports. It owns the record store, so
//! every reload publishes one consistent snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;
use mockable::Clock;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::ports::{
    DashboardSession, DocumentStore, DocumentStoreError, IdentityProvider, IdentityProviderError,
};
use crate::domain::{
    CalendarDay, Collection, Document, DocumentFields, DomainError, FetchedCollections,
    PasswordChange, ProfileUpdate, RecordSnapshot, RecordStore, UserProfile,
};

/// Dashboard service implementing the driving port.
pub struct DashboardService<D, I> {
    documents: Arc<D>,
    identity: Arc<I>,
    records: RecordStore,
    clock: Arc<dyn Clock>,
}

impl<D, I> DashboardService<D, I> {
    /// Create a new service with an empty record store.
    #[must_use]
    pub fn new(documents: Arc<D>, identity: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            documents,
            identity,
            records: RecordStore::new(),
            clock,
        }
    }
}

impl<D, I> DashboardService<D, I>
where
    D: DocumentStore,
    I: IdentityProvider,
{
    fn map_store_error(error: DocumentStoreError) -> DomainError {
        match error {
            DocumentStoreError::Connection { message } => {
                DomainError::service_unavailable(format!("document store unavailable: {message}"))
            }
            DocumentStoreError::Query { message } => {
                DomainError::internal(format!("document store error: {message}"))
            }
            DocumentStoreError::NotFound { collection, id } => {
                DomainError::not_found(format!("document '{id}' not found in {collection}"))
            }
        }
    }

    fn map_identity_error(error: IdentityProviderError) -> DomainError {
        match error {
            IdentityProviderError::InvalidCredential { message } => {
                DomainError::unauthorized(message)
            }
            IdentityProviderError::WeakPassword { message } => {
                DomainError::invalid_request(message)
            }
            IdentityProviderError::NotSignedIn => DomainError::unauthorized("no user is signed in"),
            IdentityProviderError::Unavailable { message } => DomainError::service_unavailable(
                format!("identity provider unavailable: {message}"),
            ),
        }
    }

    async fn fetch(&self, collection: Collection) -> Result<Vec<Document>, DomainError> {
        self.documents
            .fetch_collection(collection)
            .await
            .map_err(|err| {
                warn!(%collection, error = %err, "collection fetch failed");
                Self::map_store_error(err)
            })
    }

    async fn sign_out_orphan(&self, error: DomainError) -> DomainError {
        if let Err(err) = self.identity.sign_out().await {
            warn!(error = %err, "failed to sign out identity without profile");
        }
        error
    }
}

#[async_trait]
impl<D, I> DashboardSession for DashboardService<D, I>
where
    D: DocumentStore,
    I: IdentityProvider,
{
    async fn sign_in(&self) -> Result<Option<UserProfile>, DomainError> {
        let Some(identity) = self
            .identity
            .current_identity()
            .await
            .map_err(Self::map_identity_error)?
        else {
            info!("no signed-in identity");
            return Ok(None);
        };

        let stored = self
            .documents
            .fetch_document(Collection::Users, identity.uid.as_ref())
            .await
            .map_err(Self::map_store_error)?;
        let Some(document) = stored else {
            warn!(user_id = %identity.uid, "signed-in identity has no profile; signing out");
            return Err(self
                .sign_out_orphan(DomainError::not_found("user profile not found"))
                .await);
        };
        match document.decode::<UserProfile>(Collection::Users) {
            Ok(profile) => {
                info!(user_id = %profile.id(), "signed in");
                Ok(Some(profile))
            }
            Err(err) => {
                warn!(user_id = %identity.uid, error = %err, "profile rejected; signing out");
                Err(self
                    .sign_out_orphan(DomainError::internal("user profile is invalid"))
                    .await)
            }
        }
    }

    async fn reload(&self) -> Result<Arc<RecordSnapshot>, DomainError> {
        let (transfers, completed_transfers, issues, scores, users, star_points) = try_join!(
            self.fetch(Collection::Transfers),
            self.fetch(Collection::CompletedTransfers),
            self.fetch(Collection::Issues),
            self.fetch(Collection::Scores),
            self.fetch(Collection::Users),
            self.fetch(Collection::StarPoints),
        )?;
        let snapshot = RecordSnapshot::from_documents(&FetchedCollections {
            transfers,
            completed_transfers,
            issues,
            scores,
            users,
            star_points,
        });
        info!(
            transfers = snapshot.transfers.len(),
            completed_transfers = snapshot.completed_transfers.len(),
            issues = snapshot.issues.len(),
            scores = snapshot.scores.len(),
            users = snapshot.users.len(),
            star_points = snapshot.star_points.len(),
            rejected = snapshot.rejected.len(),
            "snapshot loaded"
        );
        Ok(self.records.replace(snapshot))
    }

    fn snapshot(&self) -> Arc<RecordSnapshot> {
        self.records.snapshot()
    }

    fn today(&self) -> CalendarDay {
        CalendarDay::today(&*self.clock)
    }

    async fn update_profile(
        &self,
        profile: &UserProfile,
        update: ProfileUpdate,
    ) -> Result<UserProfile, DomainError> {
        let mut fields = DocumentFields::new();
        fields.insert(
            "firstName".to_owned(),
            Value::from(update.first_name().to_owned()),
        );
        fields.insert(
            "lastName".to_owned(),
            Value::from(update.last_name().to_owned()),
        );
        if let Some(picture) = update.picture() {
            fields.insert(
                "profilePictureUrl".to_owned(),
                Value::from(picture.url().to_owned()),
            );
        }

        self.documents
            .update_document(Collection::Users, profile.id().as_ref(), fields)
            .await
            .map_err(Self::map_store_error)?;
        info!(user_id = %profile.id(), "profile updated");

        let picture_url = update.picture().map(|chosen| chosen.url().to_owned());
        Ok(profile.with_names_and_picture(update.first_name(), update.last_name(), picture_url))
    }

    async fn change_password(
        &self,
        email: &str,
        change: PasswordChange,
    ) -> Result<(), DomainError> {
        self.identity
            .reauthenticate(email, change.current())
            .await
            .map_err(Self::map_identity_error)?;
        self.identity
            .update_password(change.new_password())
            .await
            .map_err(Self::map_identity_error)?;
        info!("password changed");
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        self.identity
            .sign_out()
            .await
            .map_err(Self::map_identity_error)?;
        info!("signed out");
        Ok(())
    }
}
