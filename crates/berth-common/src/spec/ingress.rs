//! Ingress configuration for exposing a service externally.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Ingress configuration.
///
/// Only consulted when a service was composed; host names are normalized
/// (lower-cased, scheme-stripped) before they reach the resource.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressConfig {
    /// Ingress controller class (defaults to nginx)
    #[serde(default)]
    pub class: IngressClass,

    /// Host names (URL or bare hostname form)
    pub host_names: Vec<String>,

    /// Serve plain HTTP only — no TLS section is emitted
    #[serde(default)]
    pub allow_http: bool,

    /// Explicit TLS secret name; derived from the first host when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_secret_name: Option<String>,

    /// Use an ACME/cert-manager issuer for the TLS certificate; affects the
    /// derived secret name
    #[serde(default)]
    pub cert_manager_issuer: bool,

    /// Emit CORS annotations with the default allowed-header list
    #[serde(default)]
    pub enable_cors: bool,

    /// Extra annotations merged onto the resource
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl IngressConfig {
    /// Validate the ingress configuration
    pub fn validate(&self) -> Result<(), Error> {
        if self.host_names.is_empty() {
            return Err(Error::validation_for_field(
                "ingress.hostNames",
                "at least one host name is required",
            ));
        }
        for host in &self.host_names {
            if host.trim().is_empty() {
                return Err(Error::validation_for_field(
                    "ingress.hostNames",
                    "host name cannot be empty",
                ));
            }
        }
        Ok(())
    }
}

/// Ingress controller class
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IngressClass {
    /// ingress-nginx
    #[default]
    Nginx,
    /// Traefik
    Traefik,
}

impl IngressClass {
    /// The ingressClassName value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nginx => "nginx",
            Self::Traefik => "traefik",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_host_list_fails() {
        let cfg = IngressConfig::default();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_host_fails() {
        let cfg = IngressConfig {
            host_names: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn class_defaults_to_nginx() {
        assert_eq!(IngressClass::default().as_str(), "nginx");
    }

    #[test]
    fn class_deserializes_lowercase() {
        let class: IngressClass = serde_json::from_value(serde_json::json!("traefik")).unwrap();
        assert_eq!(class, IngressClass::Traefik);
    }
}
