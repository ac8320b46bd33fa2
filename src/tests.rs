//! Integration tests for PDU encoding and decoding

use std::io::Cursor;

use bytes::Bytes;

use crate::codec::{CodecError, DecodeOptions, DuplicateTlvPolicy};
use crate::datatypes::*;
use crate::fields::FieldValue;
use crate::operations;
use crate::pdu::Pdu;

fn hex(s: &str) -> Vec<u8> {
    assert!(s.len() % 2 == 0, "odd hex literal");
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

// deliver_sm captured from a live SMSC session
const DELIVER_SM_HEX: &str = "0000004d00000005000000009f88f12441575342440001013136353035353531\
                              3233340001013137373335353534303730000000000000000003001174686572\
                              65206973206e6f2073706f6f6e";

const SUBMIT_SM_HEX: &str = "000000360000000400000000000024440005006d6f62696c65776179000101313\
                             230383233300000000000000100f2000548454c4c4f";

#[test]
fn deliver_sm_reference_decode() {
    let bytes = hex(DELIVER_SM_HEX);
    let pdu = Pdu::decode(&bytes).unwrap();

    assert_eq!(pdu.command_id(), u32::from(CommandId::DeliverSm));
    assert_eq!(pdu.command_name(), "deliver_sm");
    assert_eq!(pdu.command_status(), 0);
    assert_eq!(pdu.sequence_number(), 2_676_551_972);
    assert_eq!(pdu.field("service_type").unwrap().as_str(), Some("AWSBD"));
    assert_eq!(pdu.field("source_addr").unwrap().as_str(), Some("16505551234"));
    assert_eq!(
        pdu.field("destination_addr").unwrap().as_str(),
        Some("17735554070")
    );
    assert_eq!(
        pdu.field("data_coding").unwrap(),
        &FieldValue::DataCoding(DataCoding::Default(DataCodingDefault::Latin1))
    );
    assert_eq!(pdu.field("sm_length").unwrap().as_int(), Some(17));
    assert_eq!(
        pdu.field("short_message").unwrap().as_bytes().map(|b| b.as_ref()),
        Some(&b"there is no spoon"[..])
    );

    // byte-exact round trip
    assert_eq!(pdu.to_bytes().unwrap().as_ref(), bytes.as_slice());
}

#[test]
fn submit_sm_reference_construction() {
    let pdu = operations::submit_sm()
        .sequence_number(9284)
        .field("source_addr_ton", TypeOfNumber::Alphanumeric)
        .field("source_addr", "mobileway")
        .field("dest_addr_ton", TypeOfNumber::International)
        .field("dest_addr_npi", NumericPlanIndicator::Isdn)
        .field("destination_addr", "1208230")
        .field(
            "registered_delivery",
            RegisteredDelivery::receipt(ReceiptRequest::SuccessOrFailure),
        )
        .field(
            "data_coding",
            DataCoding::GsmMessageClass {
                coding: GsmMsgCoding::DefaultAlphabet,
                class: GsmMsgClass::Class2,
            },
        )
        .field("short_message", &b"HELLO"[..])
        .build()
        .unwrap();

    assert_eq!(pdu.to_bytes().unwrap().as_ref(), hex(SUBMIT_SM_HEX).as_slice());

    let decoded = Pdu::decode(&hex(SUBMIT_SM_HEX)).unwrap();
    assert_eq!(decoded, pdu);
}

#[test]
fn every_strict_prefix_fails_to_decode() {
    let bytes = hex(DELIVER_SM_HEX);
    for cut in 0..bytes.len() {
        let err = Pdu::decode(&bytes[..cut])
            .expect_err("a strict prefix must never decode");
        if cut >= 16 {
            // header context survives body-level failures
            assert_eq!(err.sequence_number, Some(2_676_551_972), "prefix {cut}");
        }
    }
}

#[test]
fn corrupt_length_word_rejected() {
    let mut bytes = hex(DELIVER_SM_HEX);
    bytes[3] = 0x4c; // one short of the actual frame
    let err = Pdu::decode(&bytes).unwrap_err();
    assert!(matches!(err.kind, CodecError::TrailingBytes { count: 1 }));

    bytes[3] = 0x4e; // one beyond
    let err = Pdu::decode(&bytes).unwrap_err();
    assert!(matches!(err.kind, CodecError::TruncatedBody { .. }));
}

#[test]
fn unknown_command_round_trips_opaque() {
    let mut bytes = vec![
        0x00, 0x00, 0x00, 0x1A, // 16 header + 10 body
        0x00, 0x00, 0x01, 0xFF, // no such command
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09,
    ];
    bytes.extend_from_slice(b"0123456789");

    let pdu = Pdu::decode(&bytes).unwrap();
    assert_eq!(pdu.command_name(), "unknown");
    assert_eq!(pdu.opaque_body().map(|b| b.as_ref()), Some(&b"0123456789"[..]));
    assert!(pdu.field("short_message").is_none());
    assert_eq!(pdu.to_bytes().unwrap().as_ref(), bytes.as_slice());
}

#[test]
fn unknown_tlv_tag_retained_verbatim() {
    let mut bytes = hex(DELIVER_SM_HEX);
    bytes.extend_from_slice(&[0x14, 0x00, 0x00, 0x03, 0xAA, 0xBB, 0xCC]);
    let len = bytes.len() as u32;
    bytes[..4].copy_from_slice(&len.to_be_bytes());

    let pdu = Pdu::decode(&bytes).unwrap();
    let tlv = pdu.tlv(0x1400u16).unwrap();
    assert_eq!(tlv.decoded, None);
    assert_eq!(tlv.value.as_ref(), &[0xAA, 0xBB, 0xCC]);
    assert_eq!(pdu.to_bytes().unwrap().as_ref(), bytes.as_slice());
}

#[test]
fn recognized_tlv_decoded_and_validated() {
    let mut bytes = hex(DELIVER_SM_HEX);
    // message_state = DELIVERED(2)
    bytes.extend_from_slice(&[0x04, 0x27, 0x00, 0x01, 0x02]);
    let len = bytes.len() as u32;
    bytes[..4].copy_from_slice(&len.to_be_bytes());

    let pdu = Pdu::decode(&bytes).unwrap();
    assert!(pdu.has_tlv(Tag::MessageState));
    assert_eq!(
        pdu.tlv(Tag::MessageState).unwrap().decoded,
        Some(FieldValue::Int(2))
    );

    // out-of-domain state is corruption, not data
    let last = bytes.len() - 1;
    bytes[last] = 0x0C;
    let err = Pdu::decode(&bytes).unwrap_err();
    assert!(matches!(err.kind, CodecError::TlvValue { tag: 0x0427, .. }));
}

#[test]
fn tlv_length_disagreement_is_an_error() {
    let mut bytes = hex(DELIVER_SM_HEX);
    // message_state declaring two octets
    bytes.extend_from_slice(&[0x04, 0x27, 0x00, 0x02, 0x02, 0x00]);
    let len = bytes.len() as u32;
    bytes[..4].copy_from_slice(&len.to_be_bytes());
    let err = Pdu::decode(&bytes).unwrap_err();
    assert!(matches!(err.kind, CodecError::TlvValue { tag: 0x0427, .. }));

    // declared length running past the frame
    let mut bytes = hex(DELIVER_SM_HEX);
    bytes.extend_from_slice(&[0x04, 0x27, 0x00, 0x09, 0x02]);
    let len = bytes.len() as u32;
    bytes[..4].copy_from_slice(&len.to_be_bytes());
    let err = Pdu::decode(&bytes).unwrap_err();
    assert!(matches!(
        err.kind,
        CodecError::TlvLengthOverrun {
            tag: 0x0427,
            declared: 9,
            available: 1,
        }
    ));
}

#[test]
fn duplicate_tags_follow_the_configured_policy() {
    let mut bytes = hex(DELIVER_SM_HEX);
    bytes.extend_from_slice(&[0x04, 0x27, 0x00, 0x01, 0x02]); // DELIVERED
    bytes.extend_from_slice(&[0x04, 0x27, 0x00, 0x01, 0x05]); // UNDELIVERABLE
    let len = bytes.len() as u32;
    bytes[..4].copy_from_slice(&len.to_be_bytes());

    let first = Pdu::decode(&bytes).unwrap();
    assert_eq!(
        first.tlv(Tag::MessageState).unwrap().decoded,
        Some(FieldValue::Int(2))
    );

    let last = Pdu::decode_with_options(
        &bytes,
        DecodeOptions {
            duplicate_tlv: DuplicateTlvPolicy::LastWins,
        },
    )
    .unwrap();
    assert_eq!(
        last.tlv(Tag::MessageState).unwrap().decoded,
        Some(FieldValue::Int(5))
    );
}

#[test]
fn length_fields_derive_from_the_data() {
    // the caller-supplied sm_length is ignored in favor of the payload
    let pdu = operations::submit_sm()
        .field("sm_length", 99u32)
        .field("short_message", &b"four"[..])
        .build()
        .unwrap();
    assert_eq!(pdu.field("sm_length").unwrap().as_int(), Some(4));

    let decoded = Pdu::decode(&pdu.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.field("sm_length").unwrap().as_int(), Some(4));
}

#[test]
fn error_response_carries_no_body() {
    let pdu = operations::submit_sm_resp()
        .sequence_number(7)
        .command_status(CommandStatus::SubmitMultiFailed)
        .build()
        .unwrap();
    let bytes = pdu.to_bytes().unwrap();
    assert_eq!(bytes.len(), 16);
    assert!(pdu.field("message_id").is_none());

    let decoded = Pdu::decode(&bytes).unwrap();
    assert!(decoded.field("message_id").is_none());
    assert_eq!(decoded, pdu);

    // explicitly setting a field on an error response is refused
    let err = operations::submit_sm_resp()
        .command_status(CommandStatus::SubmitMultiFailed)
        .field("message_id", "abc")
        .build()
        .unwrap_err();
    assert!(matches!(err, CodecError::FieldValidation { .. }));
}

#[test]
fn error_response_may_still_carry_parameters() {
    let pdu = operations::data_sm_resp()
        .sequence_number(3)
        .command_status(CommandStatus::InvalidDestinationAddress)
        .tlv(Tag::DeliveryFailureReason, 2u32)
        .build()
        .unwrap();
    let bytes = pdu.to_bytes().unwrap();

    let decoded = Pdu::decode(&bytes).unwrap();
    assert!(decoded.field("message_id").is_none());
    assert_eq!(
        decoded.tlv(Tag::DeliveryFailureReason).unwrap().decoded,
        Some(FieldValue::Int(2))
    );
    assert_eq!(decoded, pdu);
}

#[test]
fn deliver_sm_resp_keeps_its_body_on_error() {
    // deliver_sm_resp is the one response that always carries message_id
    let pdu = operations::deliver_sm_resp()
        .command_status(CommandStatus::SystemError)
        .build()
        .unwrap();
    let bytes = pdu.to_bytes().unwrap();
    assert_eq!(bytes.len(), 17); // header + empty message_id
    let decoded = Pdu::decode(&bytes).unwrap();
    assert_eq!(decoded.field("message_id").unwrap().as_str(), Some(""));
}

#[test]
fn vendor_status_codes_round_trip() {
    let pdu = operations::generic_nack()
        .sequence_number(1)
        .command_status(0x0000_0500u32)
        .build()
        .unwrap();
    let bytes = pdu.to_bytes().unwrap();
    let decoded = Pdu::decode(&bytes).unwrap();
    assert_eq!(decoded.command_status(), 0x0500);
}

#[test]
fn bind_round_trip_with_interface_version() {
    let pdu = operations::bind_transceiver()
        .sequence_number(11)
        .field("system_id", "smppclient1")
        .field("password", "password")
        .field("interface_version", 0x34u32)
        .field("addr_ton", TypeOfNumber::International)
        .field("addr_npi", NumericPlanIndicator::Isdn)
        .build()
        .unwrap();
    let decoded = Pdu::decode(&pdu.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, pdu);

    let resp = operations::bind_transceiver_resp()
        .sequence_number(11)
        .field("system_id", "SMSC")
        .tlv(Tag::ScInterfaceVersion, 0x34u32)
        .build()
        .unwrap();
    let decoded = Pdu::decode(&resp.to_bytes().unwrap()).unwrap();
    assert_eq!(
        decoded.tlv(Tag::ScInterfaceVersion).unwrap().decoded,
        Some(FieldValue::Int(0x34))
    );
}

#[test]
fn submit_multi_lists_round_trip() {
    let dests = vec![
        DestAddress::sme(
            TypeOfNumber::International,
            NumericPlanIndicator::Isdn,
            "16505551234",
        ),
        DestAddress::distribution_list("ops-oncall"),
        DestAddress::sme(TypeOfNumber::National, NumericPlanIndicator::Isdn, "5551234"),
    ];
    let pdu = operations::submit_multi()
        .sequence_number(21)
        .field("dest_addresses", dests.clone())
        .field("short_message", &b"fanout"[..])
        .build()
        .unwrap();
    assert_eq!(pdu.field("number_of_dests").unwrap().as_int(), Some(3));

    let decoded = Pdu::decode(&pdu.to_bytes().unwrap()).unwrap();
    assert_eq!(
        decoded.field("dest_addresses").unwrap(),
        &FieldValue::DestAddresses(dests)
    );

    let resp = operations::submit_multi_resp()
        .sequence_number(21)
        .field("message_id", "msg0001")
        .field(
            "unsuccess_sme",
            vec![UnsuccessSme {
                ton: TypeOfNumber::National,
                npi: NumericPlanIndicator::Isdn,
                addr: "5551234".to_owned(),
                error_status_code: 0x0000_000B,
            }],
        )
        .build()
        .unwrap();
    let decoded = Pdu::decode(&resp.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.field("no_unsuccess").unwrap().as_int(), Some(1));
    assert_eq!(decoded, resp);
}

#[test]
fn parameters_encode_in_ascending_tag_order() {
    let pdu = operations::submit_sm()
        .tlv(Tag::MessagePayload, Bytes::from_static(b"pl"))
        .tlv(Tag::SourcePort, 4000u32)
        .tlv(Tag::UserMessageReference, 7u32)
        .build()
        .unwrap();
    let tags: Vec<u16> = pdu.tlvs().map(|t| t.tag).collect();
    assert_eq!(tags, vec![0x0204, 0x020A, 0x0424]);

    // and the wire form agrees
    let bytes = pdu.to_bytes().unwrap();
    let decoded = Pdu::decode(&bytes).unwrap();
    assert_eq!(decoded.to_bytes().unwrap(), bytes);
}

#[test]
fn construction_rejects_bad_values() {
    // over-long address (21 octets including the terminator)
    let err = operations::submit_sm()
        .field("source_addr", "123456789012345678901")
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::CStringTooLong {
            field: "source_addr",
            max: 21,
        }
    ));

    // value outside the field's enumerated domain
    let err = operations::submit_sm()
        .field("source_addr_ton", 7u32)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::OutOfDomain {
            field: "source_addr_ton",
            ..
        }
    ));

    // field that does not belong to the operation
    let err = operations::enquire_link()
        .field("short_message", &b"x"[..])
        .build()
        .unwrap_err();
    assert!(matches!(err, CodecError::FieldValidation { .. }));

    // parameter the operation does not recognize
    let err = operations::enquire_link()
        .tlv(Tag::MessagePayload, Bytes::from_static(b"x"))
        .build()
        .unwrap_err();
    assert!(matches!(err, CodecError::TlvValue { tag: 0x0424, .. }));

    // raw parameters are exempt from recognition
    let pdu = operations::enquire_link()
        .tlv_raw(0x1400, Bytes::from_static(&[0x01]))
        .build()
        .unwrap();
    assert!(pdu.has_tlv(0x1400u16));
}

#[test]
fn corrupted_mandatory_fields_name_the_field() {
    let reference = hex(DELIVER_SM_HEX);

    // overwrite the destination_addr terminator; the scan absorbs the
    // following zero fields and a later field lands on the 0x03 data_coding
    // octet, which its own domain rejects
    let mut bytes = reference.clone();
    bytes[49] = 0x41;
    let err = Pdu::decode(&bytes).unwrap_err();
    assert_eq!(err.sequence_number, Some(2_676_551_972));
    assert!(matches!(err.kind, CodecError::OutOfDomain { .. }));

    // out-of-domain priority_flag
    let mut bytes = reference.clone();
    bytes[52] = 0x09;
    let err = Pdu::decode(&bytes).unwrap_err();
    assert!(matches!(
        err.kind,
        CodecError::OutOfDomain {
            field: "priority_flag",
            ..
        }
    ));

    // reserved receipt pattern in registered_delivery
    let mut bytes = reference;
    bytes[55] = 0x03;
    let err = Pdu::decode(&bytes).unwrap_err();
    assert!(matches!(
        err.kind,
        CodecError::InvalidBitField {
            field: "registered_delivery",
            subfield: "receipt_request",
            ..
        }
    ));
}

#[test]
fn back_to_back_frames_decode_from_one_buffer() {
    let mut stream = hex(DELIVER_SM_HEX);
    stream.extend_from_slice(&hex(SUBMIT_SM_HEX));
    let mut cursor = Cursor::new(stream.as_slice());

    let first = Pdu::decode_next(&mut cursor).unwrap();
    assert_eq!(first.command_name(), "deliver_sm");
    assert_eq!(cursor.position(), 0x4d);

    let second = Pdu::decode_next(&mut cursor).unwrap();
    assert_eq!(second.command_name(), "submit_sm");
    assert_eq!(cursor.position() as usize, stream.len());

    // a partial third frame fails and leaves the cursor in place
    let mut stream = hex(DELIVER_SM_HEX);
    stream.extend_from_slice(&hex(SUBMIT_SM_HEX)[..20]);
    let mut cursor = Cursor::new(stream.as_slice());
    Pdu::decode_next(&mut cursor).unwrap();
    let err = Pdu::decode_next(&mut cursor).unwrap_err();
    assert!(matches!(err.kind, CodecError::TruncatedBody { .. }));
    assert_eq!(cursor.position(), 0x4d);
}

#[test]
fn display_renders_one_line_per_field() {
    let pdu = Pdu::decode(&hex(DELIVER_SM_HEX)).unwrap();
    let rendered = pdu.to_string();
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("deliver_sm"));
    assert!(rendered.contains("  sequence_number: 2676551972\n"));
    assert!(rendered.contains("  source_addr: \"16505551234\"\n"));
}
