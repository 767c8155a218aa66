//! Ingress binding.
//!
//! Derived only when a service exists and ingress configuration was
//! supplied. Hosts are normalized, the TLS secret name is resolved (explicit
//! name, or derived from the first host's domain), and the resulting
//! networking/v1 Ingress depends on the service.

use std::collections::BTreeMap;

use berth_common::error::Error;
use berth_common::spec::{IngressClass, IngressConfig};
use berth_common::{
    naming, urls, ObjectMeta, ProviderHandle, ResourceOptions, ResourceRef, ResourceRequest,
};

use crate::k8s::{
    HttpIngressPath, HttpIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, IngressTls, ServiceBackendPort,
};

/// Security response headers applied to every nginx-class ingress.
pub const DEFAULT_RESPONSE_HEADERS: &[(&str, &str)] = &[
    (
        "Strict-Transport-Security",
        "max-age=86400; includeSubDomains",
    ),
    ("X-XSS-Protection", "1; mode=block"),
    ("X-Frame-Options", "SAMEORIGIN"),
    (
        "Content-Security-Policy",
        "default-src 'self' data: 'unsafe-inline' 'unsafe-eval'; frame-ancestors 'self'",
    ),
    ("X-Content-Type-Options", "nosniff"),
    ("Expect-Ct", "max-age=604800,enforce"),
    ("Cache-Control", "max-age=10"),
];

/// Allowed request headers advertised when CORS is enabled.
pub const CORS_DEFAULT_HEADERS: &str = "DNT,X-CustomHeader,Keep-Alive,User-Agent,\
X-Requested-With,If-Modified-Since,Cache-Control,Content-Type,Authorization";

/// Resolve the TLS secret name for an ingress configuration.
///
/// HTTP-only requests get no secret. Otherwise the explicit name wins; when
/// absent, the name derives from the first host — its full domain for
/// cert-manager mode, its registrable root domain for imported certificates.
pub fn resolve_tls_secret(config: &IngressConfig) -> Option<String> {
    if config.allow_http {
        return None;
    }
    if let Some(ref explicit) = config.tls_secret_name {
        return Some(explicit.clone());
    }
    let first_host = config.host_names.first()?;
    let domain = if config.cert_manager_issuer {
        urls::domain_from_host(first_host)
    } else {
        urls::root_domain_from_host(first_host)
    };
    Some(naming::tls_secret_name(&domain, config.cert_manager_issuer))
}

/// Build the Ingress for a composed service.
pub fn build(
    name: &str,
    namespace: &str,
    service_name: &str,
    service_port: u16,
    config: &IngressConfig,
    provider: &ProviderHandle,
) -> Result<ResourceRequest<Ingress>, Error> {
    config.validate()?;

    let hosts: Vec<String> = config
        .host_names
        .iter()
        .map(|host| urls::normalize_host(host))
        .collect();

    let backend = IngressBackend {
        service: IngressServiceBackend {
            name: service_name.to_string(),
            port: ServiceBackendPort { number: service_port },
        },
    };

    let rules = hosts
        .iter()
        .map(|host| IngressRule {
            host: host.clone(),
            http: HttpIngressRuleValue {
                paths: vec![HttpIngressPath {
                    path: "/".to_string(),
                    path_type: "Prefix".to_string(),
                    backend: backend.clone(),
                }],
            },
        })
        .collect();

    let tls = resolve_tls_secret(config)
        .map(|secret_name| {
            vec![IngressTls {
                hosts: hosts.clone(),
                secret_name,
            }]
        })
        .unwrap_or_default();

    let mut metadata = ObjectMeta::new(naming::ingress_name(name), namespace);
    for (key, value) in annotations(config) {
        metadata = metadata.with_annotation(key, value);
    }

    let ingress = Ingress::new(
        metadata,
        IngressSpec {
            ingress_class_name: Some(config.class.as_str().to_string()),
            tls,
            rules,
        },
    );

    Ok(ResourceRequest::new(
        ingress,
        ResourceOptions::new(provider.clone())
            .with_depends_on([ResourceRef::new("Service", service_name)]),
    ))
}

/// Annotations for the ingress: controller-specific header handling plus the
/// caller's extra annotations.
fn annotations(config: &IngressConfig) -> BTreeMap<String, String> {
    let mut annotations = config.annotations.clone();
    if config.class == IngressClass::Nginx {
        annotations.insert(
            "nginx.ingress.kubernetes.io/configuration-snippet".to_string(),
            header_snippet(),
        );
        if config.enable_cors {
            annotations.insert(
                "nginx.ingress.kubernetes.io/enable-cors".to_string(),
                "true".to_string(),
            );
            annotations.insert(
                "nginx.ingress.kubernetes.io/cors-allow-headers".to_string(),
                CORS_DEFAULT_HEADERS.to_string(),
            );
        }
    }
    annotations
}

/// The `more_set_headers` snippet carrying [`DEFAULT_RESPONSE_HEADERS`].
fn header_snippet() -> String {
    DEFAULT_RESPONSE_HEADERS
        .iter()
        .map(|(key, value)| format!("more_set_headers \"{key}: {value}\";"))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config(hosts: &[&str]) -> IngressConfig {
        IngressConfig {
            host_names: hosts.iter().map(|h| h.to_string()).collect(),
            ..Default::default()
        }
    }

    fn build_for(config: &IngressConfig) -> Ingress {
        build("api", "prod", "api", 80, config, &ProviderHandle::new("k8s"))
            .expect("ingress should build")
            .resource
    }

    #[test]
    fn hosts_are_normalized() {
        let ingress = build_for(&config(&["https://App.Example.COM"]));
        assert_eq!(ingress.spec.rules[0].host, "app.example.com");
        assert_eq!(ingress.spec.tls[0].hosts, vec!["app.example.com"]);
    }

    #[test]
    fn allow_http_emits_no_tls() {
        let mut cfg = config(&["app.example.com"]);
        cfg.allow_http = true;
        let ingress = build_for(&cfg);
        assert!(ingress.spec.tls.is_empty());
    }

    #[test]
    fn explicit_tls_secret_wins() {
        let mut cfg = config(&["app.example.com"]);
        cfg.tls_secret_name = Some("my-cert".to_string());
        assert_eq!(resolve_tls_secret(&cfg), Some("my-cert".to_string()));
    }

    #[test]
    fn cert_manager_mode_derives_from_full_domain() {
        let mut cfg = config(&["https://app.example.co.uk"]);
        cfg.cert_manager_issuer = true;
        assert_eq!(
            resolve_tls_secret(&cfg),
            Some("tls-app-example-co-uk-lets".to_string())
        );
    }

    #[test]
    fn imported_mode_derives_from_root_domain() {
        let cfg = config(&["https://app.example.co.uk"]);
        assert_eq!(
            resolve_tls_secret(&cfg),
            Some("tls-example-co-uk-imported".to_string())
        );
    }

    #[test]
    fn ingress_depends_on_the_service() {
        let request = build(
            "api",
            "prod",
            "api",
            80,
            &config(&["app.example.com"]),
            &ProviderHandle::new("k8s"),
        )
        .unwrap();
        assert_eq!(
            request.options.depends_on,
            vec![ResourceRef::new("Service", "api")]
        );
    }

    #[test]
    fn name_and_class_are_set() {
        let ingress = build_for(&config(&["app.example.com"]));
        assert_eq!(ingress.metadata.name, "api-ingress");
        assert_eq!(ingress.spec.ingress_class_name.as_deref(), Some("nginx"));
    }

    #[test]
    fn nginx_class_carries_response_headers() {
        let ingress = build_for(&config(&["app.example.com"]));
        let snippet = ingress
            .metadata
            .annotations
            .get("nginx.ingress.kubernetes.io/configuration-snippet")
            .expect("snippet should be present");
        assert!(snippet.contains("X-Content-Type-Options: nosniff"));
    }

    #[test]
    fn traefik_class_skips_nginx_annotations() {
        let mut cfg = config(&["app.example.com"]);
        cfg.class = IngressClass::Traefik;
        let ingress = build_for(&cfg);
        assert!(ingress
            .metadata
            .annotations
            .keys()
            .all(|k| !k.starts_with("nginx.ingress.kubernetes.io/")));
    }

    #[test]
    fn cors_annotations_applied_when_enabled() {
        let mut cfg = config(&["app.example.com"]);
        cfg.enable_cors = true;
        let ingress = build_for(&cfg);
        assert_eq!(
            ingress
                .metadata
                .annotations
                .get("nginx.ingress.kubernetes.io/enable-cors")
                .map(String::as_str),
            Some("true")
        );
    }
}
