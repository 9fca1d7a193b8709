#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use overgrowth_core::GridLayout;
use serde::{Deserialize, Serialize};

const SHARE_DOMAIN: &str = "overgrowth";
const SHARE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded grid payload.
pub(crate) const SHARE_HEADER: &str = "overgrowth:v1";
/// Delimiter separating the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableGrid {
    markers: Vec<u8>,
}

/// Encodes a grid layout into a single-line string suitable for clipboard
/// transfer.
pub(crate) fn encode(layout: &GridLayout) -> String {
    let rows = (layout.markers().len() / layout.columns().max(1) as usize) as u32;
    let payload = SerializableGrid {
        markers: layout.markers().to_vec(),
    };
    let json = serde_json::to_vec(&payload).expect("grid serialization never fails");
    let encoded = STANDARD_NO_PAD.encode(json);
    format!(
        "{SHARE_HEADER}:{}x{}:{encoded}",
        layout.columns(),
        rows
    )
}

/// Decodes a grid layout from its share-code representation.
pub(crate) fn decode(value: &str) -> Result<GridLayout, ShareCodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShareCodeError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
    let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
    let dimensions = parts.next().ok_or(ShareCodeError::MissingDimensions)?;
    let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

    if domain != SHARE_DOMAIN {
        return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
    }
    if version != SHARE_VERSION {
        return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
    }

    let (columns, rows) = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(ShareCodeError::InvalidEncoding)?;
    let decoded: SerializableGrid =
        serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)?;

    let expected = columns as usize * rows as usize;
    if decoded.markers.len() != expected {
        return Err(ShareCodeError::MarkerCountMismatch {
            expected,
            found: decoded.markers.len(),
        });
    }

    Ok(GridLayout::new(columns, decoded.markers))
}

/// Errors that can occur while decoding grid share codes.
#[derive(Debug)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the share code.
    MissingPrefix,
    /// The share code did not contain a version segment.
    MissingVersion,
    /// The share code did not include grid dimensions.
    MissingDimensions,
    /// The share code did not include the payload segment.
    MissingPayload,
    /// The share code used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The share code used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the share code.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
    /// The marker count disagrees with the declared dimensions.
    MarkerCountMismatch {
        /// Marker count implied by the dimensions.
        expected: usize,
        /// Marker count actually present in the payload.
        found: usize,
    },
}

impl fmt::Display for ShareCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "share code was empty"),
            Self::MissingPrefix => write!(f, "share code is missing the prefix"),
            Self::MissingVersion => write!(f, "share code is missing the version"),
            Self::MissingDimensions => write!(f, "share code is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "share code is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "share prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "share version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode share payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse share payload: {error}")
            }
            Self::MarkerCountMismatch { expected, found } => {
                write!(
                    f,
                    "share payload holds {found} markers but the dimensions require {expected}"
                )
            }
        }
    }
}

impl Error for ShareCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), ShareCodeError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(ShareCodeError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((columns, rows))
}
