use std::sync::Arc;

use burrow_core::UrlStore;

use crate::auth::BasicCredentials;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn UrlStore>,
    credentials: Option<BasicCredentials>,
}

impl AppState {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self {
            store,
            credentials: None,
        }
    }

    /// Requires basic auth on the mutating `/url` routes.
    pub fn with_credentials(mut self, credentials: BasicCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn store(&self) -> &dyn UrlStore {
        self.store.as_ref()
    }

    pub fn credentials(&self) -> Option<&BasicCredentials> {
        self.credentials.as_ref()
    }
}
