use core::fmt;
use core::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use borsh::{BorshDeserialize, BorshSerialize};
use derive_more::Display;

use crate::error::Bech32ParseError;

const HRP: &str = "sov";

/// Human readable form of an [`Address`]: a bech32m string with the `sov` prefix.
#[derive(Debug, PartialEq, Clone, Eq, Display)]
#[display(fmt = "{}", "value")]
pub struct AddressBech32 {
    value: String,
    bytes: [u8; 32],
}

impl AddressBech32 {
    /// Returns the raw address bytes behind this string.
    pub fn to_byte_array(&self) -> [u8; 32] {
        self.bytes
    }
}

impl TryFrom<&Address> for AddressBech32 {
    type Error = bech32::Error;

    fn try_from(addr: &Address) -> Result<Self, Self::Error> {
        let value = bech32::encode(HRP, addr.addr.to_base32(), Variant::Bech32m)?;
        Ok(Self {
            value,
            bytes: addr.addr,
        })
    }
}

impl FromStr for AddressBech32 {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, data, _) = bech32::decode(s)?;
        if hrp != HRP {
            return Err(Bech32ParseError::WrongHRP(hrp));
        }

        let data = Vec::<u8>::from_base32(&data)?;
        let bytes: [u8; 32] = data
            .try_into()
            .map_err(|data: Vec<u8>| Bech32ParseError::WrongLength(data.len()))?;

        Ok(Self {
            value: s.to_owned(),
            bytes,
        })
    }
}

/// The identity of a caller: 32 opaque bytes.
#[derive(PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize)]
pub struct Address {
    addr: [u8; 32],
}

impl Address {
    /// Creates a new address containing the given bytes.
    pub const fn new(addr: [u8; 32]) -> Self {
        Self { addr }
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.addr
    }
}

impl From<[u8; 32]> for Address {
    fn from(addr: [u8; 32]) -> Self {
        Self { addr }
    }
}

impl From<AddressBech32> for Address {
    fn from(addr: AddressBech32) -> Self {
        Self {
            addr: addr.to_byte_array(),
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for Address {
    type Error = anyhow::Error;

    fn try_from(addr: &'a [u8]) -> Result<Self, Self::Error> {
        if addr.len() != 32 {
            anyhow::bail!("Address must be 32 bytes long");
        }
        let mut addr_bytes = [0u8; 32];
        addr_bytes.copy_from_slice(addr);
        Ok(Self { addr: addr_bytes })
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressBech32::from_str(s)
            .map(Address::from)
            .map_err(|e| anyhow::anyhow!(e))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match AddressBech32::try_from(self) {
            Ok(bech32) => write!(f, "{bech32}"),
            Err(_) => write!(f, "0x{}", hex::encode(self.addr)),
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serde::Serialize::serialize(&self.addr, serializer)
        }
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = <String as serde::Deserialize>::deserialize(deserializer)?;
            Address::from_str(&s).map_err(serde::de::Error::custom)
        } else {
            let addr = <[u8; 32] as serde::Deserialize>::deserialize(deserializer)?;
            Ok(Address { addr })
        }
    }
}
