// Use 3rd party
use log::debug;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

// Use built-in library
use std::borrow::Cow;
use std::collections::HashMap;

// Use internal modules
use crate::auth::{AccessToken, CatalogCredentials};
use crate::config::CatalogConfig;

// Possible errors returned from the catalog client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request unauthorized")]
    Unauthorized,
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("catalog error: {0}")]
    Api(#[from] ApiError),
    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    #[error("json parse error: {0}")]
    ParseJSON(#[from] serde_json::Error),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("status code: {0}")]
    StatusCode(StatusCode),
}

impl ClientError {
    async fn from_response(response: Response) -> Self {
        match response.status() {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            status @ StatusCode::FORBIDDEN | status @ StatusCode::NOT_FOUND => response
                .json::<ApiError>()
                .await
                .map_or_else(|_| status.into(), Into::into),
            status => status.into(),
        }
    }
}

impl From<StatusCode> for ClientError {
    fn from(code: StatusCode) -> Self {
        Self::StatusCode(code)
    }
}

//Error body example:
//{
    //"error": {
        //"status": 404,
        //"message": "Non existing id"
    //}
//}
#[derive(Debug, Error, Deserialize)]
pub enum ApiError {
    #[error("{status}: {message}")]
    #[serde(rename = "error")]
    Regular { status: u16, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Default, Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

/// An authenticated handle to the catalog service.
///
/// A `Catalog` holds one bearer token and is meant to live for a single
/// resolution. It carries no request scoping, so it must not be shared
/// between concurrent callers.
pub struct Catalog {
    client: Client,
    token: AccessToken,
    api_url: String,
    market: String,
}

impl Catalog {
    #[must_use]
    pub fn new(config: &CatalogConfig, token: AccessToken) -> Self {
        Self {
            client: Client::new(),
            token,
            api_url: config.api_url.to_owned(),
            market: config.market.to_owned(),
        }
    }

    /// Runs the credential exchange and returns a ready-to-use session.
    pub async fn connect(config: &CatalogConfig) -> ClientResult<Self> {
        let credentials = CatalogCredentials::from_config(config);
        let token = credentials.request_token(&config.accounts_url).await?;
        debug!("catalog session established, expires in {}s", token.expires_in);
        Ok(Self::new(config, token))
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    async fn api_call(
        &self,
        method: Method,
        url: &str,
        query: Option<&HashMap<String, String>>,
    ) -> ClientResult<Response> {
        let mut url: Cow<str> = url.into();
        if !url.starts_with("http") {
            url = [self.api_url.as_str(), &url].concat().into();
        }

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.token.bearer().parse()?);
        headers.insert(ACCEPT, "application/json".parse()?);

        let response = {
            let builder = self.client.request(method, &url.into_owned()).headers(headers);

            // Only add query parameters when sent
            let builder = if let Some(query) = query {
                builder.query(query)
            } else {
                builder
            };

            builder.send().await.map_err(ClientError::from)?
        };

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    pub async fn get(&self, url: &str, params: &HashMap<String, String>) -> ClientResult<String> {
        let text = self.api_call(Method::GET, url, Some(params)).await?.text().await?;
        debug!("response content: {}", text);
        Ok(text)
    }

    pub(crate) fn convert_result<'a, T: Deserialize<'a>>(input: &'a str) -> ClientResult<T> {
        serde_json::from_str::<T>(input).map_err(Into::into)
    }
}
