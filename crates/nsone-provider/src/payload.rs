//! Request body for the NS1 record update

use nsone_core::traits::ResolvedAddress;
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/zones/:zone/:domain/A`
///
/// Serializes as `{"answers":[{"answer":["<ip>"]}]}`: one answer holding
/// one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    pub answers: Vec<Answer>,
}

/// A single record answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: Vec<String>,
}

impl UpdatePayload {
    /// Payload replacing the record's answers with `address`
    pub fn for_address(address: &ResolvedAddress) -> Self {
        Self {
            answers: vec![Answer {
                answer: vec![address.as_str().to_string()],
            }],
        }
    }
}
