//! The static rule set, loaded once at process startup. Risk rule CRUD is
//! out of scope (spec.md §4.3 Non-goals), so unlike the Python original's
//! DB-backed `risk_rules` table, these are compiled in rather than read
//! from storage — changing them means shipping a new build.
//!
//! Thresholds and blocklists below are a reasonable operator-tunable
//! starting point, not a requirement the original dictates exactly.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::domain::entities::{RiskDecision, RiskRule, RiskRuleConfig};

pub fn default_rules() -> Vec<RiskRule> {
    let mut currency_thresholds = BTreeMap::new();
    currency_thresholds.insert("USD".to_string(), Decimal::new(1_000_000, 2));
    currency_thresholds.insert("EUR".to_string(), Decimal::new(900_000, 2));

    vec![
        RiskRule {
            id: 1,
            name: "large_amount".to_string(),
            event_types: vec!["payment_intent".to_string()],
            action: RiskDecision::Review,
            weight: 40.0,
            enabled: true,
            config: RiskRuleConfig::AmountThreshold {
                default: Decimal::new(1_000_000, 2),
                currency_thresholds,
            },
        },
        RiskRule {
            id: 2,
            name: "very_large_amount".to_string(),
            event_types: vec!["payment_intent".to_string()],
            action: RiskDecision::Decline,
            weight: 80.0,
            enabled: true,
            config: RiskRuleConfig::AmountThreshold {
                default: Decimal::new(5_000_000, 2),
                currency_thresholds: BTreeMap::new(),
            },
        },
        RiskRule {
            id: 3,
            name: "country_mismatch".to_string(),
            event_types: vec!["payment_intent".to_string()],
            action: RiskDecision::Review,
            weight: 30.0,
            enabled: true,
            config: RiskRuleConfig::CountryMismatch,
        },
        RiskRule {
            id: 4,
            name: "blocklisted_country".to_string(),
            event_types: vec!["payment_intent".to_string()],
            action: RiskDecision::Decline,
            weight: 100.0,
            enabled: true,
            config: RiskRuleConfig::BlocklistCountry {
                blocked_countries: BTreeSet::from(["KP".to_string(), "IR".to_string(), "SY".to_string()]),
            },
        },
        RiskRule {
            id: 5,
            name: "blocked_email_domain".to_string(),
            event_types: vec!["payment_intent".to_string()],
            action: RiskDecision::Decline,
            weight: 60.0,
            enabled: true,
            config: RiskRuleConfig::EmailDomainBlock {
                blocked_domains: BTreeSet::from(["mailinator.com".to_string(), "tempmail.com".to_string()]),
            },
        },
    ]
}
