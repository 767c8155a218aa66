//! Service derivation from the workload's port map.
//!
//! Only reached when a workload exists and service creation was not
//! suppressed; the composer enforces both.

use std::collections::BTreeMap;

use berth_common::spec::{PortMap, ServiceConfig};
use berth_common::{ObjectMeta, ProviderHandle, ResourceOptions, ResourceRef, ResourceRequest, LABEL_APP};

use crate::k8s::{Service, ServicePort, ServiceSpec};

/// External port used for single-port services unless "use pod port" is set.
const DEFAULT_EXTERNAL_PORT: u16 = 80;

/// Derive the Service for a workload.
///
/// Port rule: exactly one declared port yields a single `http`-named service
/// port targeting the container port, published on 80 (or the container port
/// itself when `use_pod_port`); multiple declared ports are each published
/// under their own name with external port equal to the container port.
pub fn derive(
    name: &str,
    namespace: &str,
    ports: &PortMap,
    config: &ServiceConfig,
    provider: &ProviderHandle,
    workload: &ResourceRef,
) -> ResourceRequest<Service> {
    let service_ports: Vec<ServicePort> = if ports.len() == 1 {
        ports
            .values()
            .map(|container_port| ServicePort {
                name: "http".to_string(),
                port: if config.use_pod_port {
                    *container_port
                } else {
                    DEFAULT_EXTERNAL_PORT
                },
                target_port: Some(*container_port),
                protocol: Some("TCP".to_string()),
            })
            .collect()
    } else {
        ports
            .iter()
            .map(|(port_name, container_port)| ServicePort {
                name: port_name.clone(),
                port: *container_port,
                target_port: None,
                protocol: Some("TCP".to_string()),
            })
            .collect()
    };

    let mut selector = BTreeMap::new();
    selector.insert(LABEL_APP.to_string(), name.to_string());

    let service = Service::new(
        ObjectMeta::new(name, namespace),
        ServiceSpec {
            type_: config.load_balancer.then(|| "LoadBalancer".to_string()),
            selector,
            ports: service_ports,
        },
    );

    ResourceRequest::new(
        service,
        ResourceOptions::new(provider.clone()).with_depends_on([workload.clone()]),
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn derive_with(ports: &[(&str, u16)], config: ServiceConfig) -> Service {
        let map: PortMap = ports
            .iter()
            .map(|(name, port)| (name.to_string(), *port))
            .collect();
        derive(
            "api",
            "prod",
            &map,
            &config,
            &ProviderHandle::new("k8s"),
            &ResourceRef::new("Deployment", "api"),
        )
        .resource
    }

    #[test]
    fn single_port_is_named_http_on_80() {
        let service = derive_with(&[("metrics", 9100)], ServiceConfig::default());
        assert_eq!(service.spec.ports.len(), 1);
        let port = &service.spec.ports[0];
        assert_eq!(port.name, "http");
        assert_eq!(port.port, 80);
        assert_eq!(port.target_port, Some(9100));
    }

    #[test]
    fn single_port_uses_pod_port_when_requested() {
        let service = derive_with(
            &[("http", 8080)],
            ServiceConfig {
                use_pod_port: true,
                load_balancer: false,
            },
        );
        let port = &service.spec.ports[0];
        assert_eq!(port.port, 8080);
        assert_eq!(port.target_port, Some(8080));
    }

    #[test]
    fn multiple_ports_keep_their_names_and_numbers() {
        let service = derive_with(&[("http", 8080), ("grpc", 9090)], ServiceConfig::default());
        assert_eq!(service.spec.ports.len(), 2);
        for port in &service.spec.ports {
            assert!(port.target_port.is_none());
        }
        assert!(service
            .spec
            .ports
            .iter()
            .any(|p| p.name == "grpc" && p.port == 9090));
        assert!(service
            .spec
            .ports
            .iter()
            .any(|p| p.name == "http" && p.port == 8080));
    }

    #[test]
    fn load_balancer_flag_sets_service_type() {
        let service = derive_with(
            &[("http", 8080)],
            ServiceConfig {
                use_pod_port: false,
                load_balancer: true,
            },
        );
        assert_eq!(service.spec.type_.as_deref(), Some("LoadBalancer"));

        let cluster_ip = derive_with(&[("http", 8080)], ServiceConfig::default());
        assert!(cluster_ip.spec.type_.is_none());
    }

    #[test]
    fn selector_matches_the_workload_label() {
        let service = derive_with(&[("http", 8080)], ServiceConfig::default());
        assert_eq!(
            service.spec.selector.get(LABEL_APP),
            Some(&"api".to_string())
        );
    }
}
