//! Host and domain helpers for ingress bindings.
//!
//! Ingress host names arrive as anything from a bare hostname to a full URL.
//! These helpers normalize them and extract the pieces TLS naming needs: the
//! full domain component and the registrable root domain (public-suffix
//! aware, so `app.example.co.uk` roots at `example.co.uk`).

use url::Url;

/// Lower-case a host and strip a leading `http://` or `https://` scheme.
pub fn normalize_host(host: &str) -> String {
    let lowered = host.trim().to_ascii_lowercase();
    lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered)
        .to_string()
}

/// The full domain component of a URL-or-hostname string.
///
/// `https://API.Example.com/path` and `api.example.com` both yield
/// `api.example.com`.
pub fn domain_from_host(host: &str) -> String {
    let normalized = normalize_host(host);
    match Url::parse(&format!("https://{normalized}")) {
        Ok(url) => url
            .host_str()
            .map(str::to_string)
            .unwrap_or(normalized),
        // Not parseable as an authority; best effort is to cut at the first
        // path/port separator.
        Err(_) => normalized
            .split(['/', ':'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// The registrable root domain of a URL-or-hostname string.
///
/// Uses the public-suffix list, so multi-label suffixes are handled:
/// `app.example.co.uk` → `example.co.uk`. Falls back to the full domain when
/// the host is not under a known suffix (e.g., `localhost`).
pub fn root_domain_from_host(host: &str) -> String {
    let domain = domain_from_host(host);
    psl::domain_str(&domain)
        .map(str::to_string)
        .unwrap_or(domain)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips_scheme() {
        assert_eq!(normalize_host("https://App.Example.COM"), "app.example.com");
        assert_eq!(normalize_host("http://app.example.com"), "app.example.com");
        assert_eq!(normalize_host("app.example.com"), "app.example.com");
    }

    #[test]
    fn domain_drops_path_and_port() {
        assert_eq!(
            domain_from_host("https://api.example.com/v1/health"),
            "api.example.com"
        );
        assert_eq!(domain_from_host("api.example.com:8443"), "api.example.com");
    }

    #[test]
    fn root_domain_respects_public_suffixes() {
        assert_eq!(root_domain_from_host("app.example.co.uk"), "example.co.uk");
        assert_eq!(
            root_domain_from_host("https://www.app.example.com"),
            "example.com"
        );
    }

    #[test]
    fn root_domain_falls_back_for_unknown_hosts() {
        assert_eq!(root_domain_from_host("localhost"), "localhost");
    }
}
