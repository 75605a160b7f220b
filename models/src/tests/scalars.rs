use crate::{Color, IpNetwork};

use std::net::{IpAddr, Ipv4Addr};

#[test]
fn given_cidr_text_when_parsed_then_round_trips_to_string() {
    let net: IpNetwork = "10.0.0.0/8".parse().unwrap();

    assert_eq!(net.addr(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)));
    assert_eq!(net.prefix(), 8);
    assert_eq!(net.to_string(), "10.0.0.0/8");
    assert_eq!("::1".parse::<IpNetwork>().unwrap().to_string(), "::1/128");
}

#[test]
fn given_oversized_prefix_when_parsed_then_returns_error() {
    assert!("10.0.0.0/33".parse::<IpNetwork>().is_err());
    assert!("not-an-ip/8".parse::<IpNetwork>().is_err());
}

#[test]
fn given_hex_color_when_parsed_then_displays_as_lowercase_hex() {
    assert_eq!("#FFF".parse::<Color>().unwrap(), Color::rgb(255, 255, 255));
    assert_eq!("#0a0B0c".parse::<Color>().unwrap().to_string(), "#0a0b0c");
    assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    assert!("#12345".parse::<Color>().is_err());
}
