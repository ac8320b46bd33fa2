//! Protocol datatypes: command identifiers, statuses, optional-parameter
//! tags, the closed enumerated domains and the bit-packed composite fields.

mod command_id;
mod command_status;
mod data_coding;
mod dest_address;
mod esm_class;
mod message_state;
mod numeric_plan_indicator;
mod priority_flag;
mod registered_delivery;
mod tag;
mod tlv;
mod tlv_domains;
mod type_of_number;

pub use command_id::CommandId;
pub use command_status::CommandStatus;
pub use data_coding::{DataCoding, DataCodingDefault, GsmMsgClass, GsmMsgCoding};
pub use dest_address::{DestAddress, UnsuccessSme};
pub use esm_class::{EsmClass, EsmFeatures, EsmMessageType, EsmMode};
pub use message_state::MessageState;
pub use numeric_plan_indicator::NumericPlanIndicator;
pub use priority_flag::PriorityFlag;
pub use registered_delivery::{ReceiptRequest, RegisteredDelivery, SmeAcks};
pub use tag::Tag;
pub use tlv::Tlv;
pub use tlv_domains::{
    AddrSubunit, BearerType, DeliveryFailureReason, DisplayTime, LanguageIndicator,
    MoreMessagesToSend, MsAvailabilityStatus, NetworkType, PayloadType, PrivacyIndicator,
};
pub use type_of_number::TypeOfNumber;
