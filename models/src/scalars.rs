//! Domain scalar types without a suitable crate-level equivalent.

use crate::{ErrorLocation, ModelError};

use std::fmt;
use std::net::IpAddr;
use std::panic::Location;
use std::str::FromStr;

/// An IP network in CIDR notation, e.g. `10.0.0.0/8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpNetwork {
    addr: IpAddr,
    prefix: u8,
}

impl IpNetwork {
    /// # Errors
    ///
    /// Returns [`ModelError::ScalarParse`] if the prefix is longer than the address.
    #[track_caller]
    pub fn new(addr: IpAddr, prefix: u8) -> Result<Self, ModelError> {
        let max = if addr.is_ipv4() { 32 } else { 128 };
        if prefix > max {
            return Err(ModelError::ScalarParse {
                message: format!("prefix /{prefix} exceeds {max} bits for {addr}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self { addr, prefix })
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl FromStr for IpNetwork {
    type Err = ModelError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |message: String| ModelError::ScalarParse {
            message,
            location: ErrorLocation::from(Location::caller()),
        };

        let (addr, prefix) = match s.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (s, None),
        };
        let addr: IpAddr = addr
            .parse()
            .map_err(|e| parse_error(format!("invalid network address '{s}': {e}")))?;
        let prefix = match prefix {
            Some(p) => p
                .parse::<u8>()
                .map_err(|e| parse_error(format!("invalid prefix in '{s}': {e}")))?,
            None if addr.is_ipv4() => 32,
            None => 128,
        };

        Self::new(addr, prefix)
    }
}

/// An RGB(A) color. Renders as lowercase hex, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: Option<u8>,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: Some(alpha),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)?;
        if let Some(alpha) = self.alpha {
            write!(f, "{alpha:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ModelError;

    /// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` (leading `#` optional).
    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || ModelError::ScalarParse {
            message: format!("invalid color '{s}'"),
            location: ErrorLocation::from(Location::caller()),
        };
        let byte = |pair: &str| u8::from_str_radix(pair, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, digit) in channels.iter_mut().zip(hex.chars()) {
                    let doubled: String = [digit, digit].iter().collect();
                    *slot = byte(&doubled)?;
                }
                Ok(Color::rgb(channels[0], channels[1], channels[2]))
            }
            6 | 8 if hex.is_ascii() => {
                let red = byte(&hex[0..2])?;
                let green = byte(&hex[2..4])?;
                let blue = byte(&hex[4..6])?;
                let alpha = if hex.len() == 8 {
                    Some(byte(&hex[6..8])?)
                } else {
                    None
                };
                Ok(Color {
                    red,
                    green,
                    blue,
                    alpha,
                })
            }
            _ => Err(invalid()),
        }
    }
}
