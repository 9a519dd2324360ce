//! Tests for asset model types

#![allow(clippy::expect_used, clippy::panic)]

use rstest::rstest;

use crate::asset::{
    flatten, Asset, AssetId, AssetKind, EnvironmentPrefix, Package, Properties, Service,
};
use crate::fingerprint::Fingerprint;

fn fp(seed: char) -> Option<Fingerprint> {
    Fingerprint::from_hex(&seed.to_string().repeat(64))
}

#[test]
fn test_asset_kind_display() {
    assert_eq!(format!("{}", AssetKind::Package), "package");
    assert_eq!(format!("{}", AssetKind::Service), "service");
    assert_eq!(format!("{}", AssetKind::Properties), "properties");
}

#[test]
fn test_asset_id_format() {
    let service = Asset::from(Service::new("orders.api:getOrder", "Orders", "/p", fp('a')));
    assert_eq!(service.asset_id().as_str(), "service:orders.api:getOrder");

    let package = Asset::from(Package::new("Orders", "/p", fp('a')));
    assert_eq!(package.asset_id(), AssetId::new(AssetKind::Package, "Orders"));
    assert_eq!(package.asset_id().to_string(), "package:Orders");
}

#[test]
fn test_asset_id_ignores_path_and_fingerprint() {
    let a = Asset::from(Package::new("Orders", "/base/Orders", fp('1')));
    let b = Asset::from(Package::new("Orders", "/head/Orders", fp('2')));
    assert_eq!(a.asset_id(), b.asset_id());
}

#[test]
fn test_asset_id_distinguishes_kinds_with_same_name() {
    let package = Asset::from(Package::new("Common", "/p", None));
    let service = Asset::from(Service::new("Common", "Common", "/p/ns/Common", None));
    assert_ne!(package.asset_id(), service.asset_id());
}

#[rstest]
#[case("DV_server.cnf", Some(EnvironmentPrefix::Development))]
#[case("IT_server.cnf", Some(EnvironmentPrefix::Integration))]
#[case("UA_server.cnf", Some(EnvironmentPrefix::Acceptance))]
#[case("PD_global_vars.cnf", Some(EnvironmentPrefix::Production))]
#[case("QA_config.dat", None)]
#[case("DVserver.cnf", None)]
#[case("dv_server.cnf", None)]
#[case("DEV_server.cnf", None)]
#[case("server.cnf", None)]
fn test_environment_prefix_from_file_name(
    #[case] name: &str,
    #[case] expected: Option<EnvironmentPrefix>,
) {
    assert_eq!(EnvironmentPrefix::from_file_name(name), expected);
}

#[test]
fn test_environment_prefix_round_trips_token() {
    for prefix in EnvironmentPrefix::ALL {
        assert_eq!(EnvironmentPrefix::from_token(prefix.as_str()), Some(prefix));
    }
}

#[test]
fn test_same_content_requires_known_equal_fingerprints() {
    let known = Asset::from(Properties::new(
        "DV_a.cnf",
        "/a",
        fp('c'),
        EnvironmentPrefix::Development,
    ));
    let same = Asset::from(Properties::new(
        "DV_a.cnf",
        "/b",
        fp('c'),
        EnvironmentPrefix::Development,
    ));
    let unknown = Asset::from(Properties::new(
        "DV_a.cnf",
        "/c",
        None,
        EnvironmentPrefix::Development,
    ));

    assert!(known.same_content(&same));
    assert!(!known.same_content(&unknown));
    assert!(!unknown.same_content(&known));
    assert!(!unknown.same_content(&unknown.clone()));
}

#[test]
fn test_flatten_expands_packages_in_order() {
    let package = Package::new("Orders", "/Orders", fp('1')).with_services(vec![
        Service::new("orders:create", "Orders", "/Orders/ns/orders/create", fp('2')),
        Service::new("orders:delete", "Orders", "/Orders/ns/orders/delete", fp('3')),
    ]);
    let props = Properties::new("PD_x.cnf", "/PD_x.cnf", fp('4'), EnvironmentPrefix::Production);

    let flat = flatten(vec![package.into(), props.into()]);

    let ids: Vec<String> = flat.iter().map(|a| a.asset_id().to_string()).collect();
    assert_eq!(
        ids,
        vec![
            "package:Orders",
            "service:orders:create",
            "service:orders:delete",
            "properties:PD_x.cnf",
        ]
    );
    // The package keeps its children after flattening
    match &flat[0] {
        Asset::Package(p) => assert_eq!(p.services().len(), 2),
        other => panic!("expected package, got {other:?}"),
    }
}

#[test]
fn test_flatten_empty() {
    assert!(flatten(Vec::new()).is_empty());
}

#[test]
fn test_fingerprint_from_hex_validation() {
    assert!(Fingerprint::from_hex("abc").is_none());
    assert!(Fingerprint::from_hex(&"g".repeat(64)).is_none());
    let upper = Fingerprint::from_hex(&"A".repeat(64)).expect("valid hex");
    assert_eq!(upper.as_str(), "a".repeat(64));
}

#[test]
fn test_asset_serializes_with_kind_tag() {
    let asset = Asset::from(Service::new("a.b:c", "Pkg", "/x", None));
    let json = serde_json::to_value(&asset).expect("serialize");
    assert_eq!(json["kind"], "service");
    assert_eq!(json["name"], "a.b:c");
    assert_eq!(json["package_name"], "Pkg");
    assert!(json["fingerprint"].is_null());
}
