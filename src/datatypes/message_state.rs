use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Final or intermediate state of a message, carried in query_sm_resp and
/// in the message_state optional parameter of delivery receipts.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageState {
    Enroute = 0x01,
    Delivered = 0x02,
    Expired = 0x03,
    Deleted = 0x04,
    Undeliverable = 0x05,
    Accepted = 0x06,
    Unknown = 0x07,
    Rejected = 0x08,
}
