use ipcalc_cidr::{Cidr, SubnetReport};
use ipcalc_core::{AddressClass, IpCalcError};

#[test]
fn test_point_to_point_slash_30() {
    let cidr = Cidr::parse("91.124.230.205/30").expect("valid CIDR");
    let report = SubnetReport::from_cidr(&cidr);

    assert_eq!(report.address, "91.124.230.205");
    assert_eq!(report.network, "91.124.230.204");
    assert_eq!(report.broadcast, "91.124.230.207");
    assert_eq!(report.mask, "255.255.255.252");
    assert_eq!(report.host_count, 2);
}

#[test]
fn test_last_usable_is_broadcast_minus_one() {
    // Older calculators printed the first usable host twice for this block
    let cidr = Cidr::parse("91.124.230.205/30").expect("valid CIDR");

    let first = cidr.first_usable().expect("has hosts");
    let last = cidr.last_usable().expect("has hosts");
    assert_ne!(first, last);
    assert_eq!(last.to_string(), "91.124.230.206");
    assert_eq!(last.0, cidr.broadcast().0 - 1);
}

#[test]
fn test_private_class_c() {
    let cidr = Cidr::parse("192.168.1.1/24").expect("valid CIDR");

    assert_eq!(cidr.network().to_string(), "192.168.1.0");
    assert_eq!(cidr.broadcast().to_string(), "192.168.1.255");
    assert_eq!(cidr.address().class(), AddressClass::C);
    assert!(cidr.address().is_private());
}

#[test]
fn test_host_route_has_no_usable_hosts() {
    let cidr = Cidr::parse("8.8.8.8/32").expect("valid CIDR");

    assert_eq!(cidr.network().to_string(), "8.8.8.8");
    assert_eq!(cidr.broadcast().to_string(), "8.8.8.8");
    assert_eq!(cidr.host_count(), 0);
    assert_eq!(cidr.usable_range(), None);
}

#[test]
fn test_out_of_range_octet_is_invalid_input() {
    let err = Cidr::parse("300.1.1.1/24").unwrap_err();
    assert!(matches!(err, IpCalcError::InvalidInput(_)));
}

#[test]
fn test_out_of_range_prefix_is_invalid_input() {
    let err = Cidr::parse("10.0.0.1/33").unwrap_err();
    assert!(matches!(err, IpCalcError::InvalidInput(_)));
}

#[test]
fn test_malformed_inputs_are_invalid_input() {
    let inputs = [
        "",
        "10.0.0.1",
        "10.0.0/8",
        "10.0.0.0.1/8",
        "ten.0.0.1/8",
        "10.0.0.1/eight",
        "10.0.0.1/8/8",
        "10.0.0.-1/8",
    ];

    for input in inputs {
        let err = Cidr::parse(input).unwrap_err();
        assert!(
            matches!(err, IpCalcError::InvalidInput(_)),
            "{:?} should be rejected",
            input
        );
    }
}

#[test]
fn test_class_is_independent_of_prefix() {
    for prefix in [0, 8, 16, 24, 32] {
        let cidr = Cidr::new("172.16.5.4".parse().unwrap(), prefix).unwrap();
        assert_eq!(cidr.address().class(), AddressClass::B);
    }
}
