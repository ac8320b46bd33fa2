//! Single-byte enumerated domains that only occur as optional-parameter
//! values. Each is a closed set; a wire byte outside the set is a
//! corruption error at decode time.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Subcomponent of an address within a mobile station (dest/source_addr_subunit).
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddrSubunit {
    Unknown = 0x00,
    MsDisplay = 0x01,
    MobileEquipment = 0x02,
    SmartCard1 = 0x03,
    ExternalUnit1 = 0x04,
}

/// Network type associated with an address (dest/source_network_type).
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NetworkType {
    Unknown = 0x00,
    Gsm = 0x01,
    TdmaAnsi136 = 0x02,
    CdmaIs95 = 0x03,
    Pdc = 0x04,
    Phs = 0x05,
    Iden = 0x06,
    Amps = 0x07,
    PagingNetwork = 0x08,
}

/// Bearer type associated with an address (dest/source_bearer_type).
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BearerType {
    Unknown = 0x00,
    Sms = 0x01,
    Csd = 0x02,
    PacketData = 0x03,
    Ussd = 0x04,
    Cdpd = 0x05,
    DataTac = 0x06,
    FlexReFlex = 0x07,
    CellBroadcast = 0x08,
}

/// payload_type optional parameter.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PayloadType {
    Default = 0x00,
    Wcmp = 0x01,
}

/// privacy_indicator optional parameter.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrivacyIndicator {
    NotRestricted = 0x00,
    Restricted = 0x01,
    Confidential = 0x02,
    Secret = 0x03,
}

/// language_indicator optional parameter.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LanguageIndicator {
    Unspecified = 0x00,
    English = 0x01,
    French = 0x02,
    Spanish = 0x03,
    German = 0x04,
    Portuguese = 0x05,
}

/// display_time optional parameter.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisplayTime {
    Temporary = 0x00,
    Default = 0x01,
    Invoke = 0x02,
}

/// ms_availability_status optional parameter (alert_notification).
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MsAvailabilityStatus {
    Available = 0x00,
    Denied = 0x01,
    Unavailable = 0x02,
}

/// delivery_failure_reason optional parameter (data_sm_resp).
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeliveryFailureReason {
    DestinationUnavailable = 0x00,
    DestinationAddressInvalid = 0x01,
    PermanentNetworkError = 0x02,
    TemporaryNetworkError = 0x03,
}

/// more_messages_to_send optional parameter.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoreMessagesToSend {
    NoMoreMessages = 0x00,
    MoreMessages = 0x01,
}
