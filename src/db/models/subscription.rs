//! Subscription model and status state machine

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;

pub type SubscriptionId = RecordId;

/// Delivery cadence; a closed enum, so an unrecognized frequency is rejected
/// at the boundary instead of silently leaving the delivery date unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Monthly,
    BiMonthly,
    Quarterly,
}

impl Frequency {
    /// Calendar months between deliveries
    pub fn months(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::BiMonthly => 2,
            Frequency::Quarterly => 3,
        }
    }
}

/// Subscription lifecycle: `active ⇄ paused`, any state → `cancelled`,
/// `cancelled` terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn can_transition_to(&self, _target: SubscriptionStatus) -> bool {
        // active and paused may move anywhere (including a same-state no-op);
        // cancelled accepts nothing
        !matches!(self, SubscriptionStatus::Cancelled)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Product included in a subscription box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionProduct {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub quantity: u32,
}

/// Subscription record
///
/// `next_delivery_date` is derived from the frequency at creation and only
/// ever changes through explicit updates; there is no background scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<SubscriptionId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub pet_profile: Option<RecordId>,
    pub plan_name: String,
    #[serde(default)]
    pub products: Vec<SubscriptionProduct>,
    pub frequency: Frequency,
    pub price: Decimal,
    pub status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_delivery_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_delivery_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Create payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCreate {
    pub plan_name: String,
    pub price: Decimal,
    pub frequency: Frequency,
    #[serde(default)]
    pub pet_profile_id: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<SubscriptionProduct>>,
}

/// Owner-scoped partial update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_delivery_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_delivery_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::SubscriptionStatus::*;
    use super::*;

    #[test]
    fn pause_and_resume() {
        assert!(Active.can_transition_to(Paused));
        assert!(Paused.can_transition_to(Active));
    }

    #[test]
    fn cancel_from_anywhere_but_cancelled_is_terminal() {
        assert!(Active.can_transition_to(Cancelled));
        assert!(Paused.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Active));
        assert!(!Cancelled.can_transition_to(Paused));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn frequency_intervals() {
        assert_eq!(Frequency::Monthly.months(), 1);
        assert_eq!(Frequency::BiMonthly.months(), 2);
        assert_eq!(Frequency::Quarterly.months(), 3);
    }

    #[test]
    fn frequency_wire_names() {
        assert_eq!(
            serde_json::to_value(Frequency::BiMonthly).unwrap(),
            "bi-monthly"
        );
        assert!(serde_json::from_value::<Frequency>(serde_json::json!("weekly")).is_err());
    }
}
