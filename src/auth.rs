// Use 3rd party
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// Use built-in library
use std::collections::HashMap;

// Use internal modules
use crate::client::{ClientError, ClientResult};
use crate::config::CatalogConfig;

#[derive(Clone, Debug)]
pub struct CatalogCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl CatalogCredentials {
    #[must_use]
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
        }
    }

    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.client_id, &config.client_secret)
    }

    /// Exchanges the credential pair for a short-lived bearer token using the
    /// client-credentials grant.
    pub async fn request_token(&self, accounts_url: &str) -> ClientResult<AccessToken> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(ClientError::Auth("client id and secret need to be set".to_owned()));
        }

        let client = Client::new();
        let url = format!("{}/api/token", accounts_url.trim_end_matches('/'));

        let mut payload: HashMap<&str, &str> = HashMap::new();
        payload.insert("grant_type", "client_credentials");

        let response = client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("response content: {:?}", response);
            let token: AccessToken = response.json().await?;
            Ok(token)
        } else {
            error!("token request failed for client id {:?}: {}", &self.client_id, status);
            let reason = response
                .json::<TokenError>()
                .await
                .map(|err| err.to_string())
                .unwrap_or_else(|_| status.to_string());
            Err(ClientError::Auth(reason))
        }
    }
}

//Token response example:
//{
    //"access_token": "BQDf2o...",
    //"token_type": "Bearer",
    //"expires_in": 3600
//}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl AccessToken {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenError {
    error: String,
    error_description: Option<String>,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_description {
            Some(description) => write!(f, "{}: {}", self.error, description),
            None => write!(f, "{}", self.error),
        }
    }
}
