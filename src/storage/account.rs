//! SCALE layout of the system account record.
//!
//! Only the fields the audit flows read are modelled; the layout matches the
//! standard FRAME system + balances configuration.

use parity_scale_codec::{Decode, Encode};

/// The value stored under `System.Account` for each account.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct AccountInfo {
    pub nonce: u32,
    pub consumers: u32,
    pub providers: u32,
    pub sufficients: u32,
    pub data: AccountData,
}

/// Balance fields of the account record.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct AccountData {
    pub free: u128,
    pub reserved: u128,
    pub frozen: u128,
    pub flags: u128,
}

/// Decode a raw `System.Account` storage value.
pub fn decode_account_info(bytes: &[u8]) -> Result<AccountInfo, parity_scale_codec::Error> {
    AccountInfo::decode(&mut &bytes[..])
}

/// Decode a raw `u128` storage value (e.g. `Balances.TotalIssuance`).
pub fn decode_balance(bytes: &[u8]) -> Result<u128, parity_scale_codec::Error> {
    u128::decode(&mut &bytes[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_info_round_trip() {
        let info = AccountInfo {
            nonce: 7,
            consumers: 0,
            providers: 1,
            sufficients: 0,
            data: AccountData {
                free: 1_500_000_000_000_000_000,
                reserved: 25,
                frozen: 0,
                flags: 0,
            },
        };
        let decoded = decode_account_info(&info.encode()).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn test_balance_round_trip() {
        let raw: u128 = 21_000_000_000_000_000_000_000_000;
        assert_eq!(decode_balance(&raw.encode()).unwrap(), raw);
    }

    #[test]
    fn test_truncated_record_fails() {
        assert!(decode_account_info(&[0u8; 4]).is_err());
    }
}
