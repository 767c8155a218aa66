//! Deterministic resource-name derivation.
//!
//! Every name here is a pure function of its inputs so that re-composing an
//! unchanged spec yields the same resource set — the external engine relies
//! on name stability for zero-downtime updates.

/// TLS secret name for a domain.
///
/// Replaces every `.` with `-`; ACME-issued certificates get a `-lets`
/// suffix, imported ones `-imported`.
pub fn tls_secret_name(domain: &str, use_acme_issuer: bool) -> String {
    let flat = domain.replace('.', "-");
    if use_acme_issuer {
        format!("tls-{flat}-lets")
    } else {
        format!("tls-{flat}-imported")
    }
}

/// Ingress resource name for a workload.
pub fn ingress_name(workload: &str) -> String {
    format!("{workload}-ingress").to_lowercase()
}

/// ConfigMap name for a workload's environment configuration.
pub fn config_map_name(workload: &str) -> String {
    format!("{workload}-config")
}

/// Secret name for a workload's environment secrets.
pub fn secret_name(workload: &str) -> String {
    format!("{workload}-secret")
}

/// Autoscaler name for a workload.
pub fn autoscaler_name(workload: &str) -> String {
    format!("{workload}-hpa")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tls_name_flattens_dots_with_acme_suffix() {
        assert_eq!(
            tls_secret_name("app.example.com", true),
            "tls-app-example-com-lets"
        );
    }

    #[test]
    fn tls_name_flattens_dots_with_imported_suffix() {
        assert_eq!(
            tls_secret_name("example.co.uk", false),
            "tls-example-co-uk-imported"
        );
    }

    #[test]
    fn tls_name_handles_bare_labels() {
        assert_eq!(tls_secret_name("localhost", true), "tls-localhost-lets");
    }

    #[test]
    fn ingress_name_is_lowercased() {
        assert_eq!(ingress_name("MyApp"), "myapp-ingress");
    }

    #[test]
    fn config_and_secret_names_are_stable() {
        assert_eq!(config_map_name("api"), "api-config");
        assert_eq!(secret_name("api"), "api-secret");
    }
}
