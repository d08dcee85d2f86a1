//! Payment types and pure identifier parsers.
//!
//! A payable message carries a raw amount (euro cents) and a pagoPA notice
//! number. The payment CTA needs both converted into validated values: a
//! [`PaymentAmount`] and an [`RptId`] derived from the sender organization's
//! fiscal code plus the notice number. All constructors here are pure and
//! return `None` on malformed input; absence means "CTA disabled", never an
//! error surfaced to the user.

use serde::{Deserialize, Serialize};

use super::message::MessageId;
use crate::constants::{
    MAX_AMOUNT_CENTS, NOTICE_NUMBER_LENGTH, ORGANIZATION_FISCAL_CODE_LENGTH,
};

/// Payment block of a message, as received from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentData {
    /// Amount in euro cents, unvalidated
    pub amount: u64,
    /// Raw 18-digit notice number, unvalidated
    pub notice_number: String,
}

/// A validated payment amount in euro cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentAmount(u64);

impl PaymentAmount {
    /// Validate a raw backend amount. Zero and out-of-range values are
    /// rejected.
    pub fn from_cents(cents: u64) -> Option<Self> {
        if cents == 0 || cents > MAX_AMOUNT_CENTS {
            return None;
        }
        Some(Self(cents))
    }

    pub fn cents(self) -> u64 {
        self.0
    }
}

/// An 11-digit organization fiscal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationFiscalCode(String);

impl OrganizationFiscalCode {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != ORGANIZATION_FISCAL_CODE_LENGTH || !all_ascii_digits(raw) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrganizationFiscalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded pagoPA notice number.
///
/// The leading aux digit selects the layout of the remaining 17 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "aux", rename_all = "snake_case")]
pub enum NoticeNumber {
    /// aux 0: application code (2) + IUV (13) + check digits (2)
    Aux0 { application_code: String, iuv: String, check_digit: String },
    /// aux 1: IUV (17)
    Aux1 { iuv: String },
    /// aux 2: IUV (15) + check digits (2)
    Aux2 { iuv: String, check_digit: String },
    /// aux 3: segregation code (2) + IUV (13) + check digits (2)
    Aux3 { segregation_code: String, iuv: String, check_digit: String },
}

impl NoticeNumber {
    /// Decode an 18-digit notice number string.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != NOTICE_NUMBER_LENGTH || !all_ascii_digits(raw) {
            return None;
        }

        let rest = &raw[1..];
        match raw.as_bytes()[0] {
            b'0' => Some(Self::Aux0 {
                application_code: rest[..2].to_string(),
                iuv: rest[2..15].to_string(),
                check_digit: rest[15..].to_string(),
            }),
            b'1' => Some(Self::Aux1 { iuv: rest.to_string() }),
            b'2' => Some(Self::Aux2 {
                iuv: rest[..15].to_string(),
                check_digit: rest[15..].to_string(),
            }),
            b'3' => Some(Self::Aux3 {
                segregation_code: rest[..2].to_string(),
                iuv: rest[2..15].to_string(),
                check_digit: rest[15..].to_string(),
            }),
            _ => None,
        }
    }

    pub fn aux_digit(&self) -> u8 {
        match self {
            Self::Aux0 { .. } => 0,
            Self::Aux1 { .. } => 1,
            Self::Aux2 { .. } => 2,
            Self::Aux3 { .. } => 3,
        }
    }
}

impl std::fmt::Display for NoticeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aux0 { application_code, iuv, check_digit } => {
                write!(f, "0{application_code}{iuv}{check_digit}")
            }
            Self::Aux1 { iuv } => write!(f, "1{iuv}"),
            Self::Aux2 { iuv, check_digit } => write!(f, "2{iuv}{check_digit}"),
            Self::Aux3 { segregation_code, iuv, check_digit } => {
                write!(f, "3{segregation_code}{iuv}{check_digit}")
            }
        }
    }
}

/// The payment request identifier carried into the payment flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RptId {
    pub organization_fiscal_code: OrganizationFiscalCode,
    pub notice_number: NoticeNumber,
}

impl RptId {
    /// Derive the identifier from the sender organization's fiscal code and
    /// the raw notice number. Either side failing to validate yields `None`.
    pub fn from_notice_number(organization_fiscal_code: &str, notice_number: &str) -> Option<Self> {
        let organization_fiscal_code = OrganizationFiscalCode::parse(organization_fiscal_code)?;
        let notice_number = NoticeNumber::parse(notice_number)?;
        Some(Self { organization_fiscal_code, notice_number })
    }
}

impl std::fmt::Display for RptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.organization_fiscal_code, self.notice_number)
    }
}

/// Evidence that the payment attached to a message has been settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidReason {
    pub message_id: MessageId,
    /// Settled amount in euro cents
    pub amount: u64,
    pub reason: Option<String>,
}

fn all_ascii_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}
