//! Order status lifecycle.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Orders move strictly forward through [`OrderStatus::FLOW`]. The wire
/// representation is the human-readable label (`"Out for delivery"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Created, awaiting payment.
    #[default]
    Pending,
    /// Paid and packed for shipping.
    Packed,
    Shipped,
    #[serde(rename = "Out for delivery")]
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Every status in lifecycle order.
    pub const FLOW: [Self; 5] = [
        Self::Pending,
        Self::Packed,
        Self::Shipped,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// The status that follows this one, or `None` once delivered.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Packed),
            Self::Packed => Some(Self::Shipped),
            Self::Shipped => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Zero-based position in [`OrderStatus::FLOW`].
    #[must_use]
    pub const fn step(self) -> usize {
        self as usize
    }

    /// Human-readable label, identical to the wire form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Packed => "Packed",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for delivery",
            Self::Delivered => "Delivered",
        }
    }

    /// Whether payment has been accepted for an order in this status.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::FLOW
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_advances_to_delivered() {
        let mut status = OrderStatus::Pending;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            seen.push(next);
            status = next;
        }
        assert_eq!(seen, OrderStatus::FLOW);
        assert_eq!(status, OrderStatus::Delivered);
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"Out for delivery\""
        );
        let status: OrderStatus = serde_json::from_str("\"Packed\"").unwrap();
        assert_eq!(status, OrderStatus::Packed);
    }

    #[test]
    fn test_from_str_round_trips_labels() {
        for status in OrderStatus::FLOW {
            assert_eq!(status.label().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("Lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_step_and_paid() {
        assert_eq!(OrderStatus::Pending.step(), 0);
        assert_eq!(OrderStatus::Delivered.step(), 4);
        assert!(!OrderStatus::Pending.is_paid());
        assert!(OrderStatus::Shipped.is_paid());
    }
}
