//! Port-spec parser properties

use portsweep::parse_ports;
use proptest::prelude::*;

#[test]
fn parses_mixed_singles_and_ranges() {
    assert_eq!(
        parse_ports("22,80,8000-8002").unwrap(),
        vec![22, 80, 8000, 8001, 8002]
    );
}

#[test]
fn inverted_range_contributes_nothing() {
    assert_eq!(parse_ports("5-3").unwrap(), Vec::<u16>::new());
    assert_eq!(parse_ports("80,5-3,443").unwrap(), vec![80, 443]);
}

#[test]
fn garbage_is_rejected() {
    assert!(parse_ports("abc").is_err());
    assert!(parse_ports("1-2-3").is_err());
    assert!(parse_ports("65536").is_err());
}

#[test]
fn whitespace_and_trailing_commas_are_tolerated() {
    assert_eq!(parse_ports(" 22 , 80 ,").unwrap(), vec![22, 80]);
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<u16>().prop_map(|p| p.to_string()),
        (any::<u16>(), 0u16..64).prop_map(|(a, span)| {
            let b = a.saturating_add(span);
            format!("{}-{}", a, b)
        }),
    ]
}

proptest! {
    #[test]
    fn output_is_sorted_and_deduplicated(tokens in prop::collection::vec(token_strategy(), 0..12)) {
        let spec = tokens.join(",");
        let ports = parse_ports(&spec).unwrap();
        prop_assert!(ports.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn every_single_port_token_is_present(ports in prop::collection::vec(any::<u16>(), 1..20)) {
        let spec = ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let parsed = parse_ports(&spec).unwrap();
        for port in &ports {
            prop_assert!(parsed.contains(port));
        }
    }

    #[test]
    fn forward_ranges_are_fully_covered(a in 0u16..60000, span in 0u16..50) {
        let b = a + span;
        let parsed = parse_ports(&format!("{}-{}", a, b)).unwrap();
        prop_assert_eq!(parsed, (a..=b).collect::<Vec<u16>>());
    }
}
