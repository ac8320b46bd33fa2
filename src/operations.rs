//! Builder entry points, one per standard operation.
//!
//! Each constructor returns a [`PduBuilder`] preloaded with neutral
//! defaults for every mandatory field that has one (empty strings, zero
//! integers, default composites), so callers only set what they care
//! about. Fields with no neutral value in their domain, such as
//! query_sm_resp's message_state, must be set explicitly before `build`.

use bytes::Bytes;

use crate::datatypes::{CommandId, DataCoding, EsmClass, RegisteredDelivery};
use crate::fields::{FieldType, FieldValue};
use crate::pdu::PduBuilder;
use crate::registry;

fn default_value(kind: FieldType) -> Option<FieldValue> {
    match kind {
        FieldType::Int { .. } => Some(FieldValue::Int(0)),
        FieldType::Enum { domain } => domain.contains(0).then_some(FieldValue::Int(0)),
        FieldType::CString { .. } => Some(FieldValue::Str(String::new())),
        FieldType::OctetsFixed { .. } => None,
        FieldType::OctetsVar { .. } => Some(FieldValue::Bytes(Bytes::new())),
        FieldType::EsmClass => Some(FieldValue::EsmClass(EsmClass::default())),
        FieldType::RegisteredDelivery => {
            Some(FieldValue::RegisteredDelivery(RegisteredDelivery::default()))
        }
        FieldType::DataCoding => Some(FieldValue::DataCoding(DataCoding::default())),
        FieldType::DestAddresses { .. } => Some(FieldValue::DestAddresses(Vec::new())),
        FieldType::UnsuccessSmes { .. } => Some(FieldValue::UnsuccessSmes(Vec::new())),
    }
}

fn builder(command_id: CommandId) -> PduBuilder {
    let mut builder = PduBuilder::new(command_id);
    if let Some(desc) = registry::lookup(command_id.into()) {
        for spec in desc.fields {
            if let Some(value) = default_value(spec.kind) {
                builder = builder.default_field(spec.name, value);
            }
        }
    }
    builder
}

pub fn bind_receiver() -> PduBuilder {
    builder(CommandId::BindReceiver)
}

pub fn bind_receiver_resp() -> PduBuilder {
    builder(CommandId::BindReceiverResp)
}

pub fn bind_transmitter() -> PduBuilder {
    builder(CommandId::BindTransmitter)
}

pub fn bind_transmitter_resp() -> PduBuilder {
    builder(CommandId::BindTransmitterResp)
}

pub fn bind_transceiver() -> PduBuilder {
    builder(CommandId::BindTransceiver)
}

pub fn bind_transceiver_resp() -> PduBuilder {
    builder(CommandId::BindTransceiverResp)
}

pub fn outbind() -> PduBuilder {
    builder(CommandId::Outbind)
}

pub fn query_sm() -> PduBuilder {
    builder(CommandId::QuerySm)
}

pub fn query_sm_resp() -> PduBuilder {
    builder(CommandId::QuerySmResp)
}

pub fn submit_sm() -> PduBuilder {
    builder(CommandId::SubmitSm)
}

pub fn submit_sm_resp() -> PduBuilder {
    builder(CommandId::SubmitSmResp)
}

pub fn deliver_sm() -> PduBuilder {
    builder(CommandId::DeliverSm)
}

pub fn deliver_sm_resp() -> PduBuilder {
    builder(CommandId::DeliverSmResp)
}

pub fn unbind() -> PduBuilder {
    builder(CommandId::Unbind)
}

pub fn unbind_resp() -> PduBuilder {
    builder(CommandId::UnbindResp)
}

pub fn replace_sm() -> PduBuilder {
    builder(CommandId::ReplaceSm)
}

pub fn replace_sm_resp() -> PduBuilder {
    builder(CommandId::ReplaceSmResp)
}

pub fn cancel_sm() -> PduBuilder {
    builder(CommandId::CancelSm)
}

pub fn cancel_sm_resp() -> PduBuilder {
    builder(CommandId::CancelSmResp)
}

pub fn enquire_link() -> PduBuilder {
    builder(CommandId::EnquireLink)
}

pub fn enquire_link_resp() -> PduBuilder {
    builder(CommandId::EnquireLinkResp)
}

pub fn submit_multi() -> PduBuilder {
    builder(CommandId::SubmitMulti)
}

pub fn submit_multi_resp() -> PduBuilder {
    builder(CommandId::SubmitMultiResp)
}

pub fn alert_notification() -> PduBuilder {
    builder(CommandId::AlertNotification)
}

pub fn data_sm() -> PduBuilder {
    builder(CommandId::DataSm)
}

pub fn data_sm_resp() -> PduBuilder {
    builder(CommandId::DataSmResp)
}

pub fn generic_nack() -> PduBuilder {
    builder(CommandId::GenericNack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_without_further_input() {
        // Every operation whose fields all have neutral defaults builds
        // as-is; query_sm_resp needs an explicit message_state.
        assert!(enquire_link().build().is_ok());
        assert!(submit_sm().build().is_ok());
        assert!(bind_transceiver().build().is_ok());
        assert!(query_sm_resp().build().is_err());
    }
}
