//! The operation registry: one declarative descriptor per standard SMPP
//! v3.4 command, listing its mandatory fields in wire order and the
//! optional-parameter tags it recognizes. Both the decoder and the encoder
//! walk these tables; nothing about an operation's layout lives anywhere
//! else.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::datatypes::{CommandId, Tag};
use crate::fields::{Domain, FieldSpec, FieldType, TlvType};

/// Everything the codec knows about one command.
#[derive(Debug)]
pub struct OperationDescriptor {
    pub command_id: CommandId,
    /// Wire-format name, as rendered in diagnostics.
    pub name: &'static str,
    /// Mandatory fields in their exact wire order.
    pub fields: &'static [FieldSpec],
    /// Recognized optional parameters and their typed decode rules.
    pub tlvs: &'static [(Tag, TlvType)],
    /// When true, a non-zero command_status means the PDU carries no
    /// mandatory fields (SMPP v3.4 §4.1.4, §4.4.2).
    pub no_body_on_error: bool,
}

impl OperationDescriptor {
    pub fn tlv_type(&self, tag: u16) -> Option<TlvType> {
        self.tlvs
            .iter()
            .find(|(t, _)| u16::from(*t) == tag)
            .map(|(_, ty)| *ty)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

const BIND_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("system_id", 16),
    FieldSpec::cstring("password", 9),
    FieldSpec::cstring("system_type", 13),
    FieldSpec::int1("interface_version"),
    FieldSpec::enumerated("addr_ton", Domain::Ton),
    FieldSpec::enumerated("addr_npi", Domain::Npi),
    FieldSpec::cstring("address_range", 41),
];

const BIND_RESP_FIELDS: &[FieldSpec] = &[FieldSpec::cstring("system_id", 16)];

const OUTBIND_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("system_id", 16),
    FieldSpec::cstring("password", 9),
];

const NO_FIELDS: &[FieldSpec] = &[];

// submit_sm and deliver_sm share one body layout.
const SUBMIT_SM_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("service_type", 6),
    FieldSpec::enumerated("source_addr_ton", Domain::Ton),
    FieldSpec::enumerated("source_addr_npi", Domain::Npi),
    FieldSpec::cstring("source_addr", 21),
    FieldSpec::enumerated("dest_addr_ton", Domain::Ton),
    FieldSpec::enumerated("dest_addr_npi", Domain::Npi),
    FieldSpec::cstring("destination_addr", 21),
    FieldSpec::esm_class(),
    FieldSpec::int1("protocol_id"),
    FieldSpec::enumerated("priority_flag", Domain::Priority),
    FieldSpec::cstring("schedule_delivery_time", 17),
    FieldSpec::cstring("validity_period", 17),
    FieldSpec::registered_delivery(),
    FieldSpec::enumerated("replace_if_present_flag", Domain::ReplaceIfPresent),
    FieldSpec::data_coding(),
    FieldSpec::int1("sm_default_msg_id"),
    FieldSpec::int1("sm_length"),
    FieldSpec::octets_var("short_message", "sm_length"),
];

const MESSAGE_ID_RESP_FIELDS: &[FieldSpec] = &[FieldSpec::cstring("message_id", 65)];

// data_sm and alert_notification carry 65-octet addresses where the other
// message operations carry 21-octet ones.
const DATA_SM_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("service_type", 6),
    FieldSpec::enumerated("source_addr_ton", Domain::Ton),
    FieldSpec::enumerated("source_addr_npi", Domain::Npi),
    FieldSpec::cstring("source_addr", 65),
    FieldSpec::enumerated("dest_addr_ton", Domain::Ton),
    FieldSpec::enumerated("dest_addr_npi", Domain::Npi),
    FieldSpec::cstring("destination_addr", 65),
    FieldSpec::esm_class(),
    FieldSpec::registered_delivery(),
    FieldSpec::data_coding(),
];

const QUERY_SM_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("message_id", 65),
    FieldSpec::enumerated("source_addr_ton", Domain::Ton),
    FieldSpec::enumerated("source_addr_npi", Domain::Npi),
    FieldSpec::cstring("source_addr", 21),
];

const QUERY_SM_RESP_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("message_id", 65),
    FieldSpec::cstring("final_date", 17),
    FieldSpec::enumerated("message_state", Domain::MessageState),
    FieldSpec::int1("error_code"),
];

const CANCEL_SM_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("service_type", 6),
    FieldSpec::cstring("message_id", 65),
    FieldSpec::enumerated("source_addr_ton", Domain::Ton),
    FieldSpec::enumerated("source_addr_npi", Domain::Npi),
    FieldSpec::cstring("source_addr", 21),
    FieldSpec::enumerated("dest_addr_ton", Domain::Ton),
    FieldSpec::enumerated("dest_addr_npi", Domain::Npi),
    FieldSpec::cstring("destination_addr", 21),
];

const REPLACE_SM_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("message_id", 65),
    FieldSpec::enumerated("source_addr_ton", Domain::Ton),
    FieldSpec::enumerated("source_addr_npi", Domain::Npi),
    FieldSpec::cstring("source_addr", 21),
    FieldSpec::cstring("schedule_delivery_time", 17),
    FieldSpec::cstring("validity_period", 17),
    FieldSpec::registered_delivery(),
    FieldSpec::int1("sm_default_msg_id"),
    FieldSpec::int1("sm_length"),
    FieldSpec::octets_var("short_message", "sm_length"),
];

const SUBMIT_MULTI_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("service_type", 6),
    FieldSpec::enumerated("source_addr_ton", Domain::Ton),
    FieldSpec::enumerated("source_addr_npi", Domain::Npi),
    FieldSpec::cstring("source_addr", 21),
    FieldSpec::int1("number_of_dests"),
    FieldSpec::dest_addresses("dest_addresses", "number_of_dests"),
    FieldSpec::esm_class(),
    FieldSpec::int1("protocol_id"),
    FieldSpec::enumerated("priority_flag", Domain::Priority),
    FieldSpec::cstring("schedule_delivery_time", 17),
    FieldSpec::cstring("validity_period", 17),
    FieldSpec::registered_delivery(),
    FieldSpec::enumerated("replace_if_present_flag", Domain::ReplaceIfPresent),
    FieldSpec::data_coding(),
    FieldSpec::int1("sm_default_msg_id"),
    FieldSpec::int1("sm_length"),
    FieldSpec::octets_var("short_message", "sm_length"),
];

const SUBMIT_MULTI_RESP_FIELDS: &[FieldSpec] = &[
    FieldSpec::cstring("message_id", 65),
    FieldSpec::int1("no_unsuccess"),
    FieldSpec::unsuccess_smes("unsuccess_sme", "no_unsuccess"),
];

const ALERT_NOTIFICATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumerated("source_addr_ton", Domain::Ton),
    FieldSpec::enumerated("source_addr_npi", Domain::Npi),
    FieldSpec::cstring("source_addr", 65),
    FieldSpec::enumerated("esme_addr_ton", Domain::Ton),
    FieldSpec::enumerated("esme_addr_npi", Domain::Npi),
    FieldSpec::cstring("esme_addr", 65),
];

const NO_TLVS: &[(Tag, TlvType)] = &[];

const BIND_RESP_TLVS: &[(Tag, TlvType)] = &[(Tag::ScInterfaceVersion, TlvType::Int1)];

const SUBMIT_SM_TLVS: &[(Tag, TlvType)] = &[
    (Tag::UserMessageReference, TlvType::Int2),
    (Tag::SourcePort, TlvType::Int2),
    (Tag::SourceAddrSubunit, TlvType::Enum(Domain::AddrSubunit)),
    (Tag::DestinationPort, TlvType::Int2),
    (Tag::DestAddrSubunit, TlvType::Enum(Domain::AddrSubunit)),
    (Tag::SarMsgRefNum, TlvType::Int2),
    (Tag::SarTotalSegments, TlvType::Int1),
    (Tag::SarSegmentSeqnum, TlvType::Int1),
    (Tag::MoreMessagesToSend, TlvType::Enum(Domain::MoreMessagesToSend)),
    (Tag::PayloadType, TlvType::Enum(Domain::PayloadType)),
    (Tag::MessagePayload, TlvType::Octets),
    (Tag::PrivacyIndicator, TlvType::Enum(Domain::PrivacyIndicator)),
    (Tag::CallbackNum, TlvType::Octets),
    (Tag::SourceSubaddress, TlvType::Octets),
    (Tag::DestSubaddress, TlvType::Octets),
    (Tag::UserResponseCode, TlvType::Int1),
    (Tag::DisplayTime, TlvType::Enum(Domain::DisplayTime)),
    (Tag::SmsSignal, TlvType::Octets),
    (Tag::MsValidity, TlvType::Int1),
    (Tag::MsMsgWaitFacilities, TlvType::Int1),
    (Tag::NumberOfMessages, TlvType::Enum(Domain::NumberOfMessages)),
    (Tag::AlertOnMessageDelivery, TlvType::Empty),
    (Tag::LanguageIndicator, TlvType::Enum(Domain::LanguageIndicator)),
    (Tag::CallbackNumPresInd, TlvType::Int1),
    (Tag::CallbackNumAtag, TlvType::Octets),
    (Tag::UssdServiceOp, TlvType::Int1),
    (Tag::ItsReplyType, TlvType::Int1),
    (Tag::ItsSessionInfo, TlvType::Int2),
];

const DELIVER_SM_TLVS: &[(Tag, TlvType)] = &[
    (Tag::UserMessageReference, TlvType::Int2),
    (Tag::SourcePort, TlvType::Int2),
    (Tag::DestinationPort, TlvType::Int2),
    (Tag::SarMsgRefNum, TlvType::Int2),
    (Tag::SarTotalSegments, TlvType::Int1),
    (Tag::SarSegmentSeqnum, TlvType::Int1),
    (Tag::UserResponseCode, TlvType::Int1),
    (Tag::PrivacyIndicator, TlvType::Enum(Domain::PrivacyIndicator)),
    (Tag::PayloadType, TlvType::Enum(Domain::PayloadType)),
    (Tag::MessagePayload, TlvType::Octets),
    (Tag::CallbackNum, TlvType::Octets),
    (Tag::SourceSubaddress, TlvType::Octets),
    (Tag::DestSubaddress, TlvType::Octets),
    (Tag::LanguageIndicator, TlvType::Enum(Domain::LanguageIndicator)),
    (Tag::ItsSessionInfo, TlvType::Int2),
    (Tag::NetworkErrorCode, TlvType::Octets),
    (Tag::ReceiptedMessageId, TlvType::CString { max: 65 }),
    (Tag::MessageState, TlvType::Enum(Domain::MessageState)),
];

const DATA_SM_TLVS: &[(Tag, TlvType)] = &[
    (Tag::SourcePort, TlvType::Int2),
    (Tag::SourceAddrSubunit, TlvType::Enum(Domain::AddrSubunit)),
    (Tag::SourceNetworkType, TlvType::Enum(Domain::NetworkType)),
    (Tag::SourceBearerType, TlvType::Enum(Domain::BearerType)),
    (Tag::SourceTelematicsId, TlvType::Int2),
    (Tag::DestinationPort, TlvType::Int2),
    (Tag::DestAddrSubunit, TlvType::Enum(Domain::AddrSubunit)),
    (Tag::DestNetworkType, TlvType::Enum(Domain::NetworkType)),
    (Tag::DestBearerType, TlvType::Enum(Domain::BearerType)),
    (Tag::DestTelematicsId, TlvType::Int2),
    (Tag::SarMsgRefNum, TlvType::Int2),
    (Tag::SarTotalSegments, TlvType::Int1),
    (Tag::SarSegmentSeqnum, TlvType::Int1),
    (Tag::MoreMessagesToSend, TlvType::Enum(Domain::MoreMessagesToSend)),
    (Tag::QosTimeToLive, TlvType::Int4),
    (Tag::SetDpf, TlvType::Int1),
    (Tag::ReceiptedMessageId, TlvType::CString { max: 65 }),
    (Tag::MessageState, TlvType::Enum(Domain::MessageState)),
    (Tag::NetworkErrorCode, TlvType::Octets),
    (Tag::PayloadType, TlvType::Enum(Domain::PayloadType)),
    (Tag::MessagePayload, TlvType::Octets),
    (Tag::PrivacyIndicator, TlvType::Enum(Domain::PrivacyIndicator)),
    (Tag::CallbackNum, TlvType::Octets),
    (Tag::CallbackNumPresInd, TlvType::Int1),
    (Tag::CallbackNumAtag, TlvType::Octets),
    (Tag::SourceSubaddress, TlvType::Octets),
    (Tag::DestSubaddress, TlvType::Octets),
    (Tag::UserMessageReference, TlvType::Int2),
    (Tag::UserResponseCode, TlvType::Int1),
    (Tag::LanguageIndicator, TlvType::Enum(Domain::LanguageIndicator)),
    (Tag::DisplayTime, TlvType::Enum(Domain::DisplayTime)),
    (Tag::SmsSignal, TlvType::Octets),
    (Tag::MsValidity, TlvType::Int1),
    (Tag::MsMsgWaitFacilities, TlvType::Int1),
    (Tag::NumberOfMessages, TlvType::Enum(Domain::NumberOfMessages)),
    (Tag::AlertOnMessageDelivery, TlvType::Empty),
    (Tag::ItsReplyType, TlvType::Int1),
    (Tag::ItsSessionInfo, TlvType::Int2),
];

const DATA_SM_RESP_TLVS: &[(Tag, TlvType)] = &[
    (Tag::DeliveryFailureReason, TlvType::Enum(Domain::DeliveryFailureReason)),
    (Tag::AdditionalStatusInfoText, TlvType::CString { max: 256 }),
    (Tag::NetworkErrorCode, TlvType::Octets),
    (Tag::DpfResult, TlvType::Int1),
];

const ALERT_NOTIFICATION_TLVS: &[(Tag, TlvType)] =
    &[(Tag::MsAvailabilityStatus, TlvType::Enum(Domain::MsAvailabilityStatus))];

macro_rules! descriptor {
    ($id:ident, $name:literal, $fields:expr, $tlvs:expr, $no_body:expr) => {
        OperationDescriptor {
            command_id: CommandId::$id,
            name: $name,
            fields: $fields,
            tlvs: $tlvs,
            no_body_on_error: $no_body,
        }
    };
}

/// All 27 standard operations. Declarative data only; the decode/encode
/// machinery never special-cases a command.
static DESCRIPTORS: &[OperationDescriptor] = &[
    descriptor!(BindReceiver, "bind_receiver", BIND_FIELDS, NO_TLVS, false),
    descriptor!(BindReceiverResp, "bind_receiver_resp", BIND_RESP_FIELDS, BIND_RESP_TLVS, true),
    descriptor!(BindTransmitter, "bind_transmitter", BIND_FIELDS, NO_TLVS, false),
    descriptor!(
        BindTransmitterResp,
        "bind_transmitter_resp",
        BIND_RESP_FIELDS,
        BIND_RESP_TLVS,
        true
    ),
    descriptor!(BindTransceiver, "bind_transceiver", BIND_FIELDS, NO_TLVS, false),
    descriptor!(
        BindTransceiverResp,
        "bind_transceiver_resp",
        BIND_RESP_FIELDS,
        BIND_RESP_TLVS,
        true
    ),
    descriptor!(Outbind, "outbind", OUTBIND_FIELDS, NO_TLVS, false),
    descriptor!(QuerySm, "query_sm", QUERY_SM_FIELDS, NO_TLVS, false),
    descriptor!(QuerySmResp, "query_sm_resp", QUERY_SM_RESP_FIELDS, NO_TLVS, true),
    descriptor!(SubmitSm, "submit_sm", SUBMIT_SM_FIELDS, SUBMIT_SM_TLVS, false),
    descriptor!(SubmitSmResp, "submit_sm_resp", MESSAGE_ID_RESP_FIELDS, NO_TLVS, true),
    descriptor!(DeliverSm, "deliver_sm", SUBMIT_SM_FIELDS, DELIVER_SM_TLVS, false),
    descriptor!(DeliverSmResp, "deliver_sm_resp", MESSAGE_ID_RESP_FIELDS, NO_TLVS, false),
    descriptor!(Unbind, "unbind", NO_FIELDS, NO_TLVS, false),
    descriptor!(UnbindResp, "unbind_resp", NO_FIELDS, NO_TLVS, true),
    descriptor!(ReplaceSm, "replace_sm", REPLACE_SM_FIELDS, NO_TLVS, false),
    descriptor!(ReplaceSmResp, "replace_sm_resp", NO_FIELDS, NO_TLVS, true),
    descriptor!(CancelSm, "cancel_sm", CANCEL_SM_FIELDS, NO_TLVS, false),
    descriptor!(CancelSmResp, "cancel_sm_resp", NO_FIELDS, NO_TLVS, true),
    descriptor!(EnquireLink, "enquire_link", NO_FIELDS, NO_TLVS, false),
    descriptor!(EnquireLinkResp, "enquire_link_resp", NO_FIELDS, NO_TLVS, true),
    descriptor!(SubmitMulti, "submit_multi", SUBMIT_MULTI_FIELDS, SUBMIT_SM_TLVS, false),
    descriptor!(
        SubmitMultiResp,
        "submit_multi_resp",
        SUBMIT_MULTI_RESP_FIELDS,
        NO_TLVS,
        true
    ),
    descriptor!(
        AlertNotification,
        "alert_notification",
        ALERT_NOTIFICATION_FIELDS,
        ALERT_NOTIFICATION_TLVS,
        false
    ),
    descriptor!(DataSm, "data_sm", DATA_SM_FIELDS, DATA_SM_TLVS, false),
    descriptor!(DataSmResp, "data_sm_resp", MESSAGE_ID_RESP_FIELDS, DATA_SM_RESP_TLVS, true),
    descriptor!(GenericNack, "generic_nack", NO_FIELDS, NO_TLVS, true),
];

fn registry() -> &'static HashMap<u32, &'static OperationDescriptor> {
    static REGISTRY: OnceLock<HashMap<u32, &'static OperationDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        DESCRIPTORS
            .iter()
            .map(|desc| (u32::from(desc.command_id), desc))
            .collect()
    })
}

/// Looks up the descriptor for a raw command id. `None` means the command
/// is unknown and the caller takes the opaque pass-through path.
pub fn lookup(command_id: u32) -> Option<&'static OperationDescriptor> {
    registry().get(&command_id).copied()
}

/// Diagnostic name for a raw command id.
pub fn command_name(command_id: u32) -> &'static str {
    lookup(command_id).map_or("unknown", |desc| desc.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_standard_command_registered() {
        assert_eq!(registry().len(), 27);
        assert!(lookup(u32::from(CommandId::SubmitSm)).is_some());
        assert!(lookup(u32::from(CommandId::GenericNack)).is_some());
        assert!(lookup(0x0000_000A).is_none());
    }

    #[test]
    fn length_governed_fields_reference_a_preceding_integer() {
        for desc in DESCRIPTORS {
            for (idx, spec) in desc.fields.iter().enumerate() {
                let governing = match spec.kind {
                    FieldType::OctetsVar { len_field } => len_field,
                    FieldType::DestAddresses { count_field } => count_field,
                    FieldType::UnsuccessSmes { count_field } => count_field,
                    _ => continue,
                };
                let position = desc
                    .fields
                    .iter()
                    .position(|s| s.name == governing)
                    .unwrap_or_else(|| {
                        panic!("{}: '{}' names a missing field", desc.name, spec.name)
                    });
                assert!(
                    position < idx,
                    "{}: '{}' must follow its length field",
                    desc.name,
                    spec.name
                );
                assert!(matches!(
                    desc.fields[position].kind,
                    FieldType::Int { .. }
                ));
            }
        }
    }

    #[test]
    fn submit_and_deliver_share_layout() {
        let submit = lookup(u32::from(CommandId::SubmitSm)).unwrap();
        let deliver = lookup(u32::from(CommandId::DeliverSm)).unwrap();
        assert_eq!(submit.fields.len(), deliver.fields.len());
        assert!(!submit.no_body_on_error);
    }

    #[test]
    fn recognized_tlv_lookup() {
        let deliver = lookup(u32::from(CommandId::DeliverSm)).unwrap();
        assert_eq!(
            deliver.tlv_type(u16::from(Tag::MessageState)),
            Some(TlvType::Enum(Domain::MessageState))
        );
        assert_eq!(deliver.tlv_type(0x1400), None);
    }
}
