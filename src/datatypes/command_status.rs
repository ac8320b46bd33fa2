use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Well-known SMPP error status codes for the `command_status` header field.
///
/// The codec itself carries `command_status` as a raw u32 so that vendor
/// codes round-trip untouched; this enum exists for constructing responses
/// and for readable diagnostics.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandStatus {
    /// No error
    Ok = 0x0000_0000,
    /// Message length is invalid
    InvalidMsgLength = 0x0000_0001,
    /// Command length is invalid
    InvalidCommandLength = 0x0000_0002,
    /// Invalid command ID
    InvalidCommandId = 0x0000_0003,
    /// Incorrect BIND status for given command
    IncorrectBindStatus = 0x0000_0004,
    /// ESME already in bound state
    AlreadyBound = 0x0000_0005,
    /// Invalid priority flag
    InvalidPriorityFlag = 0x0000_0006,
    /// Invalid registered delivery flag
    InvalidRegisteredDeliveryFlag = 0x0000_0007,
    /// System error
    SystemError = 0x0000_0008,
    /// Invalid source address
    InvalidSourceAddress = 0x0000_000A,
    /// Invalid destination address
    InvalidDestinationAddress = 0x0000_000B,
    /// Message ID is invalid
    InvalidMessageId = 0x0000_000C,
    /// Bind failed
    BindFailed = 0x0000_000D,
    /// Invalid password
    InvalidPassword = 0x0000_000E,
    /// Invalid system ID
    InvalidSystemId = 0x0000_000F,
    /// cancel_sm failed
    CancelSmFailed = 0x0000_0011,
    /// replace_sm failed
    ReplaceSmFailed = 0x0000_0013,
    /// Message queue full
    MessageQueueFull = 0x0000_0014,
    /// Invalid service type
    InvalidServiceType = 0x0000_0015,
    /// Invalid number of destinations
    InvalidNumberOfDestinations = 0x0000_0033,
    /// Invalid distribution list name
    InvalidDistributionListName = 0x0000_0034,
    /// Invalid destination flag
    InvalidDestFlag = 0x0000_0040,
    /// Invalid esm_class field
    InvalidEsmClass = 0x0000_0043,
    /// submit_multi failed
    SubmitMultiFailed = 0x0000_0045,
    /// Invalid source address TON
    InvalidSourceTon = 0x0000_0048,
    /// Invalid source address NPI
    InvalidSourceNpi = 0x0000_0049,
    /// Invalid destination address TON
    InvalidDestTon = 0x0000_0050,
    /// Invalid destination address NPI
    InvalidDestNpi = 0x0000_0051,
    /// Invalid system_type field
    InvalidSystemType = 0x0000_0053,
    /// Invalid replace_if_present flag
    InvalidReplaceIfPresentFlag = 0x0000_0054,
    /// Invalid number of messages
    InvalidNumberOfMessages = 0x0000_0055,
    /// Throttling error: ESME has exceeded allowed message limits
    ThrottlingError = 0x0000_0058,
    /// Invalid scheduled delivery time
    InvalidScheduledDeliveryTime = 0x0000_0061,
    /// Invalid message validity period
    InvalidValidityPeriod = 0x0000_0062,
    /// Predefined message invalid or not found
    InvalidDefaultMsgId = 0x0000_0063,
    /// ESME receiver temporary app error
    ReceiverTemporaryError = 0x0000_0064,
    /// ESME receiver permanent app error
    ReceiverPermanentError = 0x0000_0065,
    /// ESME receiver reject message error
    ReceiverRejectError = 0x0000_0066,
    /// query_sm request failed
    QuerySmFailed = 0x0000_0067,
    /// Error in the optional part of the PDU body
    InvalidOptionalPartStream = 0x0000_00C0,
    /// Optional parameter not allowed
    OptionalParamNotAllowed = 0x0000_00C1,
    /// Invalid parameter length
    InvalidParamLength = 0x0000_00C2,
    /// Expected optional parameter missing
    MissingOptionalParam = 0x0000_00C3,
    /// Invalid optional parameter value
    InvalidOptionalParamValue = 0x0000_00C4,
    /// Delivery failure (used for data_sm_resp)
    DeliveryFailure = 0x0000_00FE,
    /// Unknown error
    UnknownError = 0x0000_00FF,
}
