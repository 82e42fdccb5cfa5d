use crate::packet::{Ipv4, MacAddr, ParseError};

#[test]
fn mac_parses_and_prints_lowercase() {
    let mac: MacAddr = "00:1A:2b:3C:4d:5E".parse().expect("mac");
    assert_eq!(mac.octets(), &[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
    assert_eq!(mac.to_string(), "00:1a:2b:3c:4d:5e");
}

#[test]
fn mac_rejects_wrong_shape() {
    assert!(matches!("00:1a:2b:3c:4d".parse::<MacAddr>(), Err(ParseError::BadMac(_))));
    assert!(matches!("00:1a:2b:3c:4d:5e:6f".parse::<MacAddr>(), Err(ParseError::BadMac(_))));
    assert!(matches!("0:1a:2b:3c:4d:5e".parse::<MacAddr>(), Err(ParseError::BadMac(_))));
    assert!(matches!("zz:1a:2b:3c:4d:5e".parse::<MacAddr>(), Err(ParseError::BadMac(_))));
}

#[test]
fn ipv4_parses_and_prints_dotted_decimal() {
    let ip: Ipv4 = "192.168.001.10".parse().expect("ip");
    assert_eq!(ip.octets(), &[192, 168, 1, 10]);
    assert_eq!(ip.to_string(), "192.168.1.10");
}

#[test]
fn ipv4_rejects_out_of_range_octets_and_bad_shape() {
    assert!(matches!("256.0.0.1".parse::<Ipv4>(), Err(ParseError::BadIpv4(_))));
    assert!(matches!("1.2.3".parse::<Ipv4>(), Err(ParseError::BadIpv4(_))));
    assert!(matches!("1.2.3.4.5".parse::<Ipv4>(), Err(ParseError::BadIpv4(_))));
    assert!(matches!("1..3.4".parse::<Ipv4>(), Err(ParseError::BadIpv4(_))));
}

#[test]
fn same_net_honors_prefix_length() {
    let nic: Ipv4 = "10.0.0.5".parse().expect("ip");
    let near: Ipv4 = "10.0.0.200".parse().expect("ip");
    let far: Ipv4 = "10.0.1.1".parse().expect("ip");

    assert!(near.same_net(&nic, 24));
    assert!(!far.same_net(&nic, 24));
    assert!(far.same_net(&nic, 16));
    // 非整字节掩码
    let odd: Ipv4 = "10.0.0.130".parse().expect("ip");
    assert!(!odd.same_net(&nic, 25));
    assert!(near.same_net(&"10.0.0.129".parse().expect("ip"), 25));
}

#[test]
fn same_net_mask_edges() {
    let a: Ipv4 = "1.2.3.4".parse().expect("ip");
    let b: Ipv4 = "200.100.50.25".parse().expect("ip");
    assert!(a.same_net(&b, 0));
    assert!(a.same_net(&a, 32));
    assert!(!a.same_net(&"1.2.3.5".parse().expect("ip"), 32));
}

#[test]
fn addresses_serialize_as_strings() {
    let mac: MacAddr = "aa:bb:cc:dd:ee:ff".parse().expect("mac");
    let raw = serde_json::to_string(&mac).expect("serialize mac");
    assert_eq!(raw, "\"aa:bb:cc:dd:ee:ff\"");
    let decoded: Ipv4 = serde_json::from_str("\"172.16.0.1\"").expect("deserialize ip");
    assert_eq!(decoded.octets(), &[172, 16, 0, 1]);
    assert!(serde_json::from_str::<Ipv4>("\"172.16.0\"").is_err());
}
