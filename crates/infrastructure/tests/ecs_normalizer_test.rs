use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::opt::{ClientSubnet, EdnsCode, EdnsOption};
use hickory_proto::rr::rdata::NULL;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use zns_application::ports::QueryNormalizer;
use zns_domain::{DomainError, EcsConfig, EcsPolicy};
use zns_infrastructure::dns::{EcsNormalizer, EcsOutcome};

fn build_query(name: &str) -> Message {
    let mut message = Message::new(0x1234, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), RecordType::A));
    message
}

fn with_options(mut message: Message, options: Vec<EdnsOption>) -> Message {
    let mut edns = Edns::new();
    for option in options {
        edns.options_mut().insert(option);
    }
    message.set_edns(edns);
    message
}

fn subnets(wire: &[u8]) -> Vec<ClientSubnet> {
    let message = Message::from_vec(wire).unwrap();
    message
        .extensions()
        .as_ref()
        .map(|edns| {
            edns.options()
                .as_ref()
                .iter()
                .filter_map(|(_, option)| match option {
                    EdnsOption::Subnet(subnet) => Some(*subnet),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn additional_count(wire: &[u8]) -> u16 {
    u16::from_be_bytes([wire[10], wire[11]])
}

fn normalizer(policy: EcsPolicy) -> EcsNormalizer {
    EcsNormalizer::new(EcsConfig {
        policy,
        ..EcsConfig::default()
    })
}

#[test]
fn test_query_without_opt_gets_one_opt_with_ipv4_anchor() {
    let wire = build_query("www.example.com.").to_vec().unwrap();
    assert_eq!(additional_count(&wire), 0);

    let normalized = normalizer(EcsPolicy::Preserve).normalize(&wire, false).unwrap();

    assert_eq!(additional_count(&normalized.wire), 1);
    let found = subnets(&normalized.wire);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].addr(), IpAddr::V4(Ipv4Addr::new(218, 85, 157, 0)));
    assert_eq!(found[0].source_prefix(), 24);
    assert_eq!(found[0].scope_prefix(), 0);
    assert_eq!(normalized.question_name.as_deref(), Some("www.example.com."));
}

#[test]
fn test_ipv6_caller_gets_ipv6_anchor() {
    let wire = build_query("example.com.").to_vec().unwrap();

    let normalized = normalizer(EcsPolicy::Preserve).normalize(&wire, true).unwrap();

    let found = subnets(&normalized.wire);
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].addr(),
        IpAddr::V6(Ipv6Addr::new(0x240e, 0x14, 0x6000, 0, 0, 0, 0, 0))
    );
    assert_eq!(found[0].source_prefix(), 56);
}

#[test]
fn test_preserve_keeps_caller_subnet_byte_for_byte() {
    let caller = ClientSubnet::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 0)), 24, 0);
    let wire = with_options(build_query("example.com."), vec![EdnsOption::Subnet(caller)])
        .to_vec()
        .unwrap();

    let normalized = normalizer(EcsPolicy::Preserve).normalize(&wire, false).unwrap();

    assert_eq!(normalized.wire, wire);
    assert_eq!(subnets(&normalized.wire), vec![caller]);
}

#[test]
fn test_preserve_replaces_zero_prefix_subnet() {
    let caller = ClientSubnet::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0, 0);
    let mut message = with_options(build_query("example.com."), vec![EdnsOption::Subnet(caller)]);

    let outcome = normalizer(EcsPolicy::Preserve).apply_policy(&mut message, false);

    assert_eq!(outcome, EcsOutcome::Replaced);
    let found = subnets(&message.to_vec().unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].source_prefix(), 24);
}

#[test]
fn test_force_replaces_caller_subnet() {
    let caller = ClientSubnet::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 0)), 24, 0);
    let mut message = with_options(build_query("example.com."), vec![EdnsOption::Subnet(caller)]);

    let outcome = normalizer(EcsPolicy::Force).apply_policy(&mut message, false);

    assert_eq!(outcome, EcsOutcome::Replaced);
    let found = subnets(&message.to_vec().unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].addr(), IpAddr::V4(Ipv4Addr::new(218, 85, 157, 0)));
}

#[test]
fn test_duplicate_subnets_collapse_to_first_non_empty() {
    let empty = ClientSubnet::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0, 0);
    let first = ClientSubnet::new(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 0)), 24, 0);
    let second = ClientSubnet::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 0)), 24, 0);
    let mut message = with_options(
        build_query("example.com."),
        vec![
            EdnsOption::Subnet(empty),
            EdnsOption::Subnet(first),
            EdnsOption::Subnet(second),
        ],
    );

    let outcome = normalizer(EcsPolicy::Preserve).apply_policy(&mut message, false);

    assert_eq!(outcome, EcsOutcome::Preserved);
    assert_eq!(subnets(&message.to_vec().unwrap()), vec![first]);
}

#[test]
fn test_other_edns_options_survive() {
    let cookie = EdnsOption::Unknown(u16::from(EdnsCode::Cookie), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    let wire = with_options(build_query("example.com."), vec![cookie.clone()])
        .to_vec()
        .unwrap();

    let normalized = normalizer(EcsPolicy::Preserve).normalize(&wire, false).unwrap();

    let message = Message::from_vec(&normalized.wire).unwrap();
    let edns = message.extensions().as_ref().unwrap();
    assert!(edns.option(EdnsCode::Cookie).is_some());
    assert_eq!(subnets(&normalized.wire).len(), 1);
}

#[test]
fn test_custom_prefixes_are_applied() {
    let normalizer = EcsNormalizer::new(EcsConfig {
        ipv4_prefix: 16,
        ipv6_prefix: 48,
        ..EcsConfig::default()
    });
    let wire = build_query("example.com.").to_vec().unwrap();

    let v4 = subnets(&normalizer.normalize(&wire, false).unwrap().wire);
    let v6 = subnets(&normalizer.normalize(&wire, true).unwrap().wire);

    assert_eq!(v4[0].source_prefix(), 16);
    assert_eq!(v4[0].addr(), IpAddr::V4(Ipv4Addr::new(218, 85, 0, 0)));
    assert_eq!(v6[0].source_prefix(), 48);
}

#[test]
fn test_malformed_input_is_decode_error() {
    let result = normalizer(EcsPolicy::Preserve).normalize(&[0x12, 0x34, 0x01], false);

    assert!(matches!(result, Err(DomainError::DecodeError(_))));
}

#[test]
fn test_round_trip_without_mutation_is_byte_identical() {
    let original = with_options(
        build_query("round.trip.example."),
        vec![EdnsOption::Subnet(ClientSubnet::new(
            IpAddr::V4(Ipv4Addr::new(10, 1, 2, 0)),
            24,
            0,
        ))],
    );
    let wire = original.to_vec().unwrap();

    let reencoded = Message::from_vec(&wire).unwrap().to_vec().unwrap();

    assert_eq!(reencoded, wire);
}

#[test]
fn test_oversized_rewrite_is_encode_error() {
    // 12 header + 17 question + 12 answer overhead + rdata = 65 532 bytes.
    let mut message = build_query("big.example.");
    message.add_answer(Record::from_rdata(
        Name::from_ascii("big.example.").unwrap(),
        60,
        RData::NULL(NULL::with(vec![0xAB; 65_491])),
    ));
    let wire = message.to_vec().unwrap();
    assert!(wire.len() > 65_500);

    let result = normalizer(EcsPolicy::Force).normalize(&wire, false);

    assert!(matches!(result, Err(DomainError::EncodeError(_))));
}

/// Query as sent by `dig +dnssec +cookie WwW.ExAmple.COM`.
fn dig_style_wire() -> Vec<u8> {
    let mut wire = vec![
        0x5a, 0x3c, // id
        0x01, 0x20, // RD, AD
        0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    ];
    for label in ["WwW", "ExAmple", "COM"] {
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.as_bytes());
    }
    wire.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x01]);
    // OPT: root name, type 41, payload 1232, DO bit, one COOKIE option
    wire.extend_from_slice(&[0x00, 0x00, 0x29, 0x04, 0xd0, 0x00, 0x00, 0x80, 0x00]);
    wire.extend_from_slice(&[0x00, 0x0c, 0x00, 0x0a, 0x00, 0x08]);
    wire.extend_from_slice(&[0x0b, 0x64, 0xb4, 0xdc, 0xd7, 0xb0, 0xcc, 0x8f]);
    wire
}

#[test]
fn test_dig_style_wire_round_trips_byte_identically() {
    let wire = dig_style_wire();

    let reencoded = Message::from_vec(&wire).unwrap().to_vec().unwrap();

    assert_eq!(reencoded, wire);
}

#[test]
fn test_dig_style_wire_keeps_edns_fields_after_rewrite() {
    let normalized = normalizer(EcsPolicy::Force)
        .normalize(&dig_style_wire(), false)
        .unwrap();

    let message = Message::from_vec(&normalized.wire).unwrap();
    let edns = message.extensions().as_ref().unwrap();
    assert_eq!(edns.max_payload(), 1232);
    assert!(edns.flags().dnssec_ok);
    assert!(edns.option(EdnsCode::Cookie).is_some());
    assert_eq!(subnets(&normalized.wire).len(), 1);
    assert_eq!(
        normalized.question_name.as_deref().map(|n| n.trim_end_matches('.')),
        Some("WwW.ExAmple.COM")
    );
}
