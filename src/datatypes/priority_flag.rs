use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Message priority. The four levels map onto bearer-specific semantics
/// (GSM: non-priority/priority, TDMA: bulk/normal/urgent/very urgent).
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PriorityFlag {
    Level0 = 0x00,
    Level1 = 0x01,
    Level2 = 0x02,
    Level3 = 0x03,
}
