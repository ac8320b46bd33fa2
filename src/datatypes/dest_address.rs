use crate::datatypes::{NumericPlanIndicator, TypeOfNumber};

/// One entry of a submit_multi destination list: either a single SME
/// address or the name of a distribution list, discriminated on the wire
/// by a leading dest_flag byte (0x01 SME, 0x02 distribution list).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DestAddress {
    Sme {
        ton: TypeOfNumber,
        npi: NumericPlanIndicator,
        /// destination_addr, max 20 characters.
        addr: String,
    },
    DistributionList {
        /// dl_name, max 20 characters.
        name: String,
    },
}

impl DestAddress {
    pub const FLAG_SME: u8 = 0x01;
    pub const FLAG_DISTRIBUTION_LIST: u8 = 0x02;

    pub fn sme(ton: TypeOfNumber, npi: NumericPlanIndicator, addr: &str) -> Self {
        DestAddress::Sme {
            ton,
            npi,
            addr: addr.to_owned(),
        }
    }

    pub fn distribution_list(name: &str) -> Self {
        DestAddress::DistributionList {
            name: name.to_owned(),
        }
    }
}

/// One entry of a submit_multi_resp unsuccess list: the SME address the
/// submission failed for plus the SMPP error status for that destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsuccessSme {
    pub ton: TypeOfNumber,
    pub npi: NumericPlanIndicator,
    pub addr: String,
    pub error_status_code: u32,
}
