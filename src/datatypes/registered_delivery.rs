use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::codec::CodecError;

/// Bit-packed registered_delivery field: receipt request kind (bits 1-0),
/// SME-originated acknowledgement requests (bits 3-2, a bitset) and the
/// intermediate notification flag (bit 4).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegisteredDelivery {
    pub receipt: ReceiptRequest,
    pub acks: SmeAcks,
    pub intermediate_notification: bool,
}

/// SMSC delivery receipt request, bits 1-0. Pattern 0x03 is reserved and
/// rejected as corruption.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReceiptRequest {
    #[default]
    None = 0x00,
    SuccessOrFailure = 0x01,
    FailureOnly = 0x02,
}

/// SME-originated acknowledgement requests, bits 3-2.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SmeAcks {
    /// Bit 2: delivery acknowledgement requested.
    pub delivery: bool,
    /// Bit 3: manual/user acknowledgement requested.
    pub manual: bool,
}

impl RegisteredDelivery {
    const RECEIPT_MASK: u8 = 0x03;
    const DELIVERY_ACK_BIT: u8 = 0x04;
    const MANUAL_ACK_BIT: u8 = 0x08;
    const INTERMEDIATE_BIT: u8 = 0x10;

    pub fn receipt(receipt: ReceiptRequest) -> Self {
        RegisteredDelivery {
            receipt,
            ..Default::default()
        }
    }

    pub fn to_byte(self) -> u8 {
        let mut value = u8::from(self.receipt);
        if self.acks.delivery {
            value |= Self::DELIVERY_ACK_BIT;
        }
        if self.acks.manual {
            value |= Self::MANUAL_ACK_BIT;
        }
        if self.intermediate_notification {
            value |= Self::INTERMEDIATE_BIT;
        }
        value
    }

    /// Decodes the byte. Reserved bits 7-5 are ignored; receipt pattern
    /// 0x03 is a corruption error.
    pub fn from_byte(value: u8, field: &'static str) -> Result<Self, CodecError> {
        let receipt = ReceiptRequest::try_from(value & Self::RECEIPT_MASK).map_err(|_| {
            CodecError::InvalidBitField {
                field,
                subfield: "receipt_request",
                value,
            }
        })?;
        Ok(RegisteredDelivery {
            receipt,
            acks: SmeAcks {
                delivery: value & Self::DELIVERY_ACK_BIT != 0,
                manual: value & Self::MANUAL_ACK_BIT != 0,
            },
            intermediate_notification: value & Self::INTERMEDIATE_BIT != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip() {
        let rd = RegisteredDelivery {
            receipt: ReceiptRequest::SuccessOrFailure,
            acks: SmeAcks {
                delivery: true,
                manual: false,
            },
            intermediate_notification: true,
        };
        assert_eq!(rd.to_byte(), 0x15);
        assert_eq!(RegisteredDelivery::from_byte(0x15, "registered_delivery").unwrap(), rd);
    }

    #[test]
    fn reserved_receipt_pattern_rejected() {
        let err = RegisteredDelivery::from_byte(0x03, "registered_delivery").unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidBitField {
                subfield: "receipt_request",
                ..
            }
        ));
    }
}
