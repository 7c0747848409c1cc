use ::domain::ApiKey;

use crate::gateways::CredentialProvider;
use crate::models::failures::MissingCredential;
use crate::utils::aliases::Fallible;

/// Holds the API key for the lifetime of the process once it has been entered.
pub struct Session {
    credentials: ::std::sync::Arc<dyn CredentialProvider>,
    api_key: ::tokio::sync::Mutex<Option<ApiKey>>,
}

impl Session {
    pub fn new(credentials: ::std::sync::Arc<dyn CredentialProvider>) -> Self {
        Self { credentials, api_key: ::tokio::sync::Mutex::new(None) }
    }

    pub fn with_api_key(credentials: ::std::sync::Arc<dyn CredentialProvider>, api_key: Option<ApiKey>) -> Self {
        Self { credentials, api_key: ::tokio::sync::Mutex::new(api_key) }
    }

    /// The held key, asking the credential provider first when there is none.
    pub async fn api_key(&self) -> Fallible<ApiKey> {
        let mut api_key = self.api_key.lock().await;

        if let Some(api_key) = api_key.as_ref() {
            return Ok(api_key.clone());
        }

        let provided = ::std::sync::Arc::clone(&self.credentials).provide().await?;

        match provided {
            Some(provided) => {
                ::tracing::debug!("API key entered");
                *api_key = Some(provided.clone());

                Ok(provided)
            },
            None => Err(MissingCredential.into()),
        }
    }

    pub async fn set_api_key(&self, api_key: Option<ApiKey>) {
        *self.api_key.lock().await = api_key;
    }

    pub async fn invalidate(&self) {
        if self.api_key.lock().await.take().is_some() {
            ::tracing::info!("API key discarded");
        }
    }

    pub async fn has_api_key(&self) -> bool {
        self.api_key.lock().await.is_some()
    }
}
