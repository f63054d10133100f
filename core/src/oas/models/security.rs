#![deny(missing_docs)]

//! # Security Entities

use super::{Extensions, ParameterLocation};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Scheme names to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Kind of a security scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SecuritySchemeType {
    /// API key in a header, query parameter or cookie.
    #[serde(rename = "apiKey")]
    ApiKey,
    /// HTTP authentication (basic, bearer, ...).
    #[serde(rename = "http")]
    Http,
    /// Mutual TLS.
    #[serde(rename = "mutualTLS")]
    MutualTls,
    /// OAuth 2.
    #[serde(rename = "oauth2")]
    OAuth2,
    /// OpenID Connect discovery.
    #[serde(rename = "openIdConnect")]
    OpenIdConnect,
}

impl SecuritySchemeType {
    /// Every accepted value.
    pub const ALL: [Self; 5] = [
        Self::ApiKey,
        Self::Http,
        Self::MutualTls,
        Self::OAuth2,
        Self::OpenIdConnect,
    ];

    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey => "apiKey",
            Self::Http => "http",
            Self::MutualTls => "mutualTLS",
            Self::OAuth2 => "oauth2",
            Self::OpenIdConnect => "openIdConnect",
        }
    }
}

impl fmt::Display for SecuritySchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A security scheme operations can require.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// Scheme kind, serialized as `type`.
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Header/query/cookie name (`apiKey`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Key location (`apiKey`), serialized as `in`.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    /// HTTP authorization scheme (`http`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Bearer token format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    /// OAuth flows (`oauth2`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flows: Option<OAuthFlows>,
    /// Discovery URL (`openIdConnect`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<String>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl SecurityScheme {
    /// A scheme of `scheme_type` with no other fields set.
    pub fn new(scheme_type: SecuritySchemeType) -> Self {
        Self {
            scheme_type,
            description: None,
            name: None,
            location: None,
            scheme: None,
            bearer_format: None,
            flows: None,
            open_id_connect_url: None,
            extensions: Extensions::new(),
        }
    }
}

/// The supported OAuth flows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    /// Implicit flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,
    /// Resource owner password flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,
    /// Client credentials flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,
    /// Authorization code flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Configuration of a single OAuth flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// Authorization endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// Token endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// Refresh endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    /// Scope names to descriptions.
    pub scopes: IndexMap<String, String>,
    /// Unknown keys.
    #[serde(flatten)]
    pub extensions: Extensions,
}
