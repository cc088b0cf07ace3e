//! Order status state machine
//!
//! Canonical states: `open → partial_paid → settled`, with `cancelled`
//! reachable from `open` only. Earlier data used `pending` for open orders
//! and both `paid` and `completed` for the terminal state; those spellings
//! are accepted on input and collapsed to the canonical variants.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Still accepting line-item changes
    #[default]
    #[serde(alias = "pending")]
    Open,
    /// Some but not all line items settled
    PartialPaid,
    /// Fully settled (legacy spellings: "paid", "completed")
    #[serde(alias = "paid", alias = "completed")]
    Settled,
    Cancelled,
}

impl OrderStatus {
    /// Canonical storage string
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::PartialPaid => "partial_paid",
            OrderStatus::Settled => "settled",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether line items may still be added or changed
    pub fn accepts_items(&self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::PartialPaid)
    }

    /// Whether the order can still be settled (fully or partially)
    pub fn accepts_payment(&self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::PartialPaid)
    }

    /// Cancellation is only allowed before any item has been settled
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Open)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Settled | OrderStatus::Cancelled)
    }

    /// Transition rule evaluated after a settlement batch: the order is
    /// settled exactly when no unpaid items remain.
    pub fn after_settlement(unpaid_remaining: usize) -> OrderStatus {
        if unpaid_remaining == 0 {
            OrderStatus::Settled
        } else {
            OrderStatus::PartialPaid
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_serialization() {
        let json = serde_json::to_string(&OrderStatus::Settled).unwrap();
        assert_eq!(json, "\"settled\"");
        let json = serde_json::to_string(&OrderStatus::PartialPaid).unwrap();
        assert_eq!(json, "\"partial_paid\"");
    }

    #[test]
    fn test_legacy_spellings_accepted() {
        for (input, expected) in [
            ("\"open\"", OrderStatus::Open),
            ("\"pending\"", OrderStatus::Open),
            ("\"paid\"", OrderStatus::Settled),
            ("\"completed\"", OrderStatus::Settled),
            ("\"settled\"", OrderStatus::Settled),
        ] {
            let status: OrderStatus = serde_json::from_str(input).unwrap();
            assert_eq!(status, expected, "input {input}");
        }
    }

    #[test]
    fn test_transition_rule() {
        assert_eq!(OrderStatus::after_settlement(0), OrderStatus::Settled);
        assert_eq!(OrderStatus::after_settlement(1), OrderStatus::PartialPaid);
        assert_eq!(OrderStatus::after_settlement(7), OrderStatus::PartialPaid);
    }

    #[test]
    fn test_state_predicates() {
        assert!(OrderStatus::Open.accepts_items());
        assert!(OrderStatus::PartialPaid.accepts_payment());
        assert!(!OrderStatus::Settled.accepts_items());
        assert!(!OrderStatus::Cancelled.accepts_payment());
        assert!(OrderStatus::Open.can_cancel());
        assert!(!OrderStatus::PartialPaid.can_cancel());
    }
}
