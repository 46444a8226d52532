use serde::{Deserialize, Serialize};
use std::fmt;

/// Способ внесения депозита
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositMethod {
    Cash,
    Card,
    BankTransfer,
}

impl DepositMethod {
    pub fn code(&self) -> &'static str {
        match self {
            DepositMethod::Cash => "cash",
            DepositMethod::Card => "card",
            DepositMethod::BankTransfer => "bank_transfer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DepositMethod::Cash => "Cash",
            DepositMethod::Card => "Card",
            DepositMethod::BankTransfer => "Bank transfer",
        }
    }

    pub fn all() -> Vec<DepositMethod> {
        vec![DepositMethod::Cash, DepositMethod::Card, DepositMethod::BankTransfer]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|m| m.code() == code)
    }
}

impl fmt::Display for DepositMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Состояние депозита
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    Received,
    Applied,
    Refunded,
}

impl DepositStatus {
    pub fn code(&self) -> &'static str {
        match self {
            DepositStatus::Received => "received",
            DepositStatus::Applied => "applied",
            DepositStatus::Refunded => "refunded",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DepositStatus::Received => "Received",
            DepositStatus::Applied => "Applied to folio",
            DepositStatus::Refunded => "Refunded",
        }
    }

    pub fn all() -> Vec<DepositStatus> {
        vec![DepositStatus::Received, DepositStatus::Applied, DepositStatus::Refunded]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
