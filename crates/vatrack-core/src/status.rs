//! Hire/payout domain types and the derived dashboard status.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A value did not match any known enum label.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized value: {0}")]
pub struct ParseError(pub String);

/// Which VA a client registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaName {
    Alpha,
    Beta,
    Gamma,
}

impl VaName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "VA Alpha",
            Self::Beta => "VA Beta",
            Self::Gamma => "VA Gamma",
        }
    }
}

impl fmt::Display for VaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VA Alpha" => Ok(Self::Alpha),
            "VA Beta" => Ok(Self::Beta),
            "VA Gamma" => Ok(Self::Gamma),
            other => Err(ParseError(other.to_string())),
        }
    }
}

/// Hire type; determines the affiliate payout amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HireType {
    PartTime,
    FullTime,
}

impl HireType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PartTime => "Part-Time",
            Self::FullTime => "Full-Time",
        }
    }

    /// Payout in dollars owed to the referring affiliate.
    pub const fn payout_amount(self) -> i64 {
        match self {
            Self::PartTime => 150,
            Self::FullTime => 300,
        }
    }
}

impl fmt::Display for HireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HireType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Part-Time" => Ok(Self::PartTime),
            "Full-Time" => Ok(Self::FullTime),
            other => Err(ParseError(other.to_string())),
        }
    }
}

/// Payout status derived from a client record.
///
/// Transitions are strictly forward: awaiting hire -> ready for payout ->
/// paid. Records without affiliate attribution never enter the payout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayoutStatus {
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "Awaiting Hire")]
    AwaitingHire,
    #[serde(rename = "Ready for Payout")]
    ReadyForPayout,
    #[serde(rename = "Paid")]
    Paid,
}

impl PayoutStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotApplicable => "N/A",
            Self::AwaitingHire => "Awaiting Hire",
            Self::ReadyForPayout => "Ready for Payout",
            Self::Paid => "Paid",
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the payout status for a record.
pub const fn payout_status(has_affiliate: bool, is_hired: bool, is_paid: bool) -> PayoutStatus {
    if !has_affiliate {
        PayoutStatus::NotApplicable
    } else if !is_hired {
        PayoutStatus::AwaitingHire
    } else if is_paid {
        PayoutStatus::Paid
    } else {
        PayoutStatus::ReadyForPayout
    }
}

/// The single admin action available for a record, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    ConfirmHire,
    TriggerPayout,
}

/// Which admin action a record currently admits.
///
/// Hire confirmation is offered for any unhired record; the payout trigger
/// only for hired, unpaid records with affiliate attribution.
pub const fn next_action(
    has_affiliate: bool,
    is_hired: bool,
    is_paid: bool,
) -> Option<AdminAction> {
    if !is_hired {
        Some(AdminAction::ConfirmHire)
    } else if has_affiliate && !is_paid {
        Some(AdminAction::TriggerPayout)
    } else {
        None
    }
}
