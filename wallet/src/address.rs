//! StrKey validation for the account (`G...`) and contract (`C...`) addresses
//! typed into the forms.
//!
//! A StrKey is the RFC 4648 base32 encoding of
//! `version byte || 32-byte payload || CRC16-XModem (little endian)`.

use crate::error::AddressError;
use crc::{Crc, CRC_16_XMODEM};
use data_encoding::BASE32;

const STRKEY_LEN: usize = 56;
const DECODED_LEN: usize = 35;

const VERSION_ACCOUNT: u8 = 6 << 3;
const VERSION_CONTRACT: u8 = 2 << 3;

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    Account,
    Contract,
}

/// Check that `address` is a well-formed account or contract StrKey.
///
/// `field` names the input in the returned error.
pub fn validate_address(address: &str, field: &str) -> Result<AddressKind, AddressError> {
    let field = field.to_string();
    if address.len() != STRKEY_LEN {
        return Err(AddressError::Length { field });
    }

    let decoded = match BASE32.decode(address.as_bytes()) {
        Ok(bytes) if bytes.len() == DECODED_LEN => bytes,
        _ => return Err(AddressError::Encoding { field }),
    };

    let kind = match decoded[0] {
        VERSION_ACCOUNT => AddressKind::Account,
        VERSION_CONTRACT => AddressKind::Contract,
        _ => return Err(AddressError::Version { field }),
    };

    let (body, checksum) = decoded.split_at(DECODED_LEN - 2);
    let expected = u16::from_le_bytes([checksum[0], checksum[1]]);
    if XMODEM.checksum(body) != expected {
        return Err(AddressError::Checksum { field });
    }

    Ok(kind)
}
