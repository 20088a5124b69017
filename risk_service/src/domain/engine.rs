//! The rule engine itself, grounded verbatim (in meaning, not in code) on
//! `original_source/services/risk_service/app/risk_engine.py`'s
//! `RiskEngine.evaluate`/`_evaluate_rule`/`_escalate`.

use crate::domain::entities::{
    EvaluationContext, EvaluationResult, RiskDecision, RiskRule, RiskRuleConfig, TriggeredRule,
};

/// `_escalate` in the original: decision only ever moves up the severity
/// order `approve < review < decline`, never back down once a stricter rule
/// has fired.
fn escalate(current: RiskDecision, candidate: RiskDecision) -> RiskDecision {
    if candidate > current {
        candidate
    } else {
        current
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Per-rule trigger check. Returns the reason string when the rule fires.
fn evaluate_rule(rule: &RiskRule, ctx: &EvaluationContext) -> Option<String> {
    match &rule.config {
        RiskRuleConfig::AmountThreshold {
            default,
            currency_thresholds,
        } => {
            let threshold = currency_thresholds
                .iter()
                .find(|(ccy, _)| eq_ignore_case(ccy, &ctx.currency))
                .map(|(_, amount)| *amount)
                .unwrap_or(*default);
            if ctx.amount >= threshold {
                Some(format!(
                    "amount {} {} meets or exceeds threshold {}",
                    ctx.amount, ctx.currency, threshold
                ))
            } else {
                None
            }
        }
        RiskRuleConfig::CountryMismatch => {
            let ip_country = ctx.metadata.get("ip_country")?;
            let user_country = ctx.metadata.get("user_country")?;
            if !eq_ignore_case(ip_country, user_country) {
                Some(format!(
                    "ip country {ip_country} does not match user country {user_country}"
                ))
            } else {
                None
            }
        }
        RiskRuleConfig::BlocklistCountry { blocked_countries } => {
            let ip_country = ctx.metadata.get("ip_country")?;
            blocked_countries
                .iter()
                .any(|blocked| eq_ignore_case(blocked, ip_country))
                .then(|| format!("ip country {ip_country} is on the blocklist"))
        }
        RiskRuleConfig::EmailDomainBlock { blocked_domains } => {
            let email_domain = ctx.metadata.get("email_domain")?;
            blocked_domains
                .iter()
                .any(|blocked| eq_ignore_case(blocked, email_domain))
                .then(|| format!("email domain {email_domain} is blocked"))
        }
    }
}

/// Holds the static rule set loaded at startup and runs every enabled rule
/// matching the event type against a request.
pub struct RiskEngine {
    rules: Vec<RiskRule>,
}

impl RiskEngine {
    pub fn new(rules: Vec<RiskRule>) -> Self {
        Self { rules }
    }

    pub fn evaluate(&self, ctx: &EvaluationContext) -> EvaluationResult {
        let mut decision = RiskDecision::Approve;
        let mut risk_score = 0.0;
        let mut triggered_rules = Vec::new();

        for rule in &self.rules {
            if !rule.enabled {
                continue;
            }
            if !rule.event_types.iter().any(|et| et == &ctx.event_type) {
                continue;
            }
            let Some(reason) = evaluate_rule(rule, ctx) else {
                continue;
            };

            risk_score += rule.weight;
            decision = escalate(decision, rule.action);
            triggered_rules.push(TriggeredRule {
                rule_id: rule.id,
                name: rule.name.clone(),
                action: rule.action,
                reason,
                weight: rule.weight,
            });
        }

        EvaluationResult {
            decision,
            risk_score,
            triggered_rules,
        }
    }
}
