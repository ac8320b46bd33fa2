use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The data_coding scheme byte. Decoding never fails: bytes that are
/// neither a known default-alphabet code point nor a GSM message-class
/// pattern round-trip through the `Raw` arm, since charset interpretation
/// is outside the codec's contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataCoding {
    /// One of the standard alphabet code points (scheme nibble 0x0).
    Default(DataCodingDefault),
    /// GSM message-class scheme, nibble 0xF.
    GsmMessageClass {
        coding: GsmMsgCoding,
        class: GsmMsgClass,
    },
    /// Any other byte, preserved verbatim.
    Raw(u8),
}

/// Standard data_coding alphabet code points.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataCodingDefault {
    #[default]
    SmscDefaultAlphabet = 0x00,
    Ia5Ascii = 0x01,
    OctetUnspecified = 0x02,
    Latin1 = 0x03,
    OctetUnspecifiedCommon = 0x04,
    Jis = 0x05,
    Cyrillic = 0x06,
    LatinHebrew = 0x07,
    Ucs2 = 0x08,
    Pictogram = 0x09,
    Iso2022Jp = 0x0A,
    ExtendedKanjiJis = 0x0D,
    KsC5601 = 0x0E,
}

/// Message coding bit (bit 2) of the GSM message-class scheme.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GsmMsgCoding {
    #[default]
    DefaultAlphabet = 0x00,
    Data8Bit = 0x04,
}

/// Message class bits (bits 1-0) of the GSM message-class scheme.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GsmMsgClass {
    #[default]
    Class0 = 0x00,
    Class1 = 0x01,
    Class2 = 0x02,
    Class3 = 0x03,
}

impl DataCoding {
    const GSM_SCHEME: u8 = 0xF0;
    const GSM_CODING_MASK: u8 = 0x04;
    const GSM_CLASS_MASK: u8 = 0x03;

    pub fn to_byte(self) -> u8 {
        match self {
            DataCoding::Default(code) => code.into(),
            DataCoding::GsmMessageClass { coding, class } => {
                Self::GSM_SCHEME | u8::from(coding) | u8::from(class)
            }
            DataCoding::Raw(value) => value,
        }
    }

    pub fn from_byte(value: u8) -> Self {
        if value & Self::GSM_SCHEME == Self::GSM_SCHEME {
            // Bit 3 of the scheme data is reserved; a set bit falls back to Raw
            // so the byte still round-trips exactly.
            if value & 0x08 != 0 {
                return DataCoding::Raw(value);
            }
            let coding = match value & Self::GSM_CODING_MASK {
                0x00 => GsmMsgCoding::DefaultAlphabet,
                _ => GsmMsgCoding::Data8Bit,
            };
            let class = match value & Self::GSM_CLASS_MASK {
                0x00 => GsmMsgClass::Class0,
                0x01 => GsmMsgClass::Class1,
                0x02 => GsmMsgClass::Class2,
                _ => GsmMsgClass::Class3,
            };
            return DataCoding::GsmMessageClass { coding, class };
        }
        match DataCodingDefault::try_from(value) {
            Ok(code) => DataCoding::Default(code),
            Err(_) => DataCoding::Raw(value),
        }
    }
}

impl Default for DataCoding {
    fn default() -> Self {
        DataCoding::Default(DataCodingDefault::SmscDefaultAlphabet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_code_points() {
        assert_eq!(
            DataCoding::from_byte(0x03),
            DataCoding::Default(DataCodingDefault::Latin1)
        );
        assert_eq!(DataCoding::from_byte(0x03).to_byte(), 0x03);
    }

    #[test]
    fn gsm_message_class() {
        let dc = DataCoding::from_byte(0xF2);
        assert_eq!(
            dc,
            DataCoding::GsmMessageClass {
                coding: GsmMsgCoding::DefaultAlphabet,
                class: GsmMsgClass::Class2,
            }
        );
        assert_eq!(dc.to_byte(), 0xF2);
    }

    #[test]
    fn unknown_bytes_round_trip_raw() {
        for value in [0x0Bu8, 0x10, 0x7F, 0xC3, 0xF8] {
            let dc = DataCoding::from_byte(value);
            assert_eq!(dc.to_byte(), value);
        }
    }
}
