//! Combat events: damage and healing applied to a hit point pool
//!
//! [`CombatEventProcessor`] resolves an amount (fixed or rolled), applies it
//! with clamping, and hands back a [`CombatEvent`] for the caller to append to
//! the audit log. Every operation validates before producing a new pool, so an
//! event is applied entirely or not at all.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{DiceFormula, HitPoints, RollOutcome};

/// Direction of a combat event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatEventKind {
    DamageTaken,
    HealingDone,
}

impl CombatEventKind {
    pub fn label(&self) -> &'static str {
        match self {
            CombatEventKind::DamageTaken => "damage",
            CombatEventKind::HealingDone => "healing",
        }
    }
}

/// Immutable audit record of one applied damage or healing amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatEvent {
    kind: CombatEventKind,
    amount: u32,
    source_detail: String,
}

impl CombatEvent {
    /// Fails with `NonPositiveAmount` for an amount of zero
    pub fn new(
        kind: CombatEventKind,
        amount: u32,
        source_detail: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if amount == 0 {
            return Err(DomainError::NonPositiveAmount(0));
        }
        Ok(Self {
            kind,
            amount,
            source_detail: source_detail.into(),
        })
    }

    pub fn kind(&self) -> CombatEventKind {
        self.kind
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn source_detail(&self) -> &str {
        &self.source_detail
    }
}

/// How the caller expressed the amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AmountInput {
    Fixed(i64),
    /// Dice expression such as "2d6+3"
    Formula(String),
}

/// A validated positive amount plus where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAmount {
    pub amount: u32,
    /// "7" for fixed amounts, the rendered roll ("2d6+3: [4, 2] + 3 = 9") for formulas
    pub detail: String,
    pub roll: Option<RollOutcome>,
}

/// Result of [`CombatEventProcessor::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatOutcome {
    pub hit_points: HitPoints,
    pub event: CombatEvent,
    /// Points actually removed or restored after clamping
    pub applied: u32,
    pub is_down: bool,
}

/// Stateless damage/healing rules
pub struct CombatEventProcessor;

impl CombatEventProcessor {
    /// `current' = max(0, current - amount)`
    pub fn apply_damage(hp: HitPoints, amount: u32) -> HitPoints {
        hp.apply_damage(amount)
    }

    /// `current' = min(max, current + amount)`
    pub fn apply_healing(hp: HitPoints, amount: u32) -> HitPoints {
        hp.apply_healing(amount)
    }

    /// Turn a fixed amount or formula into a positive amount.
    ///
    /// A formula whose total comes out below 1 is rejected like a fixed amount would be.
    pub fn resolve_amount(
        input: &AmountInput,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<ResolvedAmount, DomainError> {
        match input {
            AmountInput::Fixed(value) => Ok(ResolvedAmount {
                amount: positive(*value)?,
                detail: value.to_string(),
                roll: None,
            }),
            AmountInput::Formula(text) => {
                let formula = DiceFormula::parse(text)?;
                let outcome = formula.evaluate(rng);
                let amount = positive(outcome.total)?;
                Ok(ResolvedAmount {
                    amount,
                    detail: format!("{}: {}", formula, outcome.rendered_detail),
                    roll: Some(outcome),
                })
            }
        }
    }

    /// Resolve and apply in one all-or-nothing step.
    pub fn apply(
        hp: HitPoints,
        kind: CombatEventKind,
        input: &AmountInput,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<CombatOutcome, DomainError> {
        let resolved = Self::resolve_amount(input, rng)?;
        let event = CombatEvent::new(kind, resolved.amount, resolved.detail)?;

        let hit_points = match kind {
            CombatEventKind::DamageTaken => Self::apply_damage(hp, resolved.amount),
            CombatEventKind::HealingDone => Self::apply_healing(hp, resolved.amount),
        };
        let applied = hp.current().abs_diff(hit_points.current());

        Ok(CombatOutcome {
            hit_points,
            event,
            applied,
            is_down: hit_points.is_down(),
        })
    }
}

fn positive(value: i64) -> Result<u32, DomainError> {
    if value <= 0 {
        return Err(DomainError::NonPositiveAmount(value));
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(unit: f64) -> impl FnMut() -> f64 {
        move || unit
    }

    fn hp(current: i32, max: i32) -> HitPoints {
        HitPoints::new(current, max).unwrap()
    }

    mod damage {
        use super::*;

        #[test]
        fn reduces_current() {
            assert_eq!(CombatEventProcessor::apply_damage(hp(20, 30), 7), hp(13, 30));
        }

        #[test]
        fn clamps_at_zero() {
            assert_eq!(CombatEventProcessor::apply_damage(hp(5, 30), 50), hp(0, 30));
            assert_eq!(
                CombatEventProcessor::apply_damage(hp(5, 30), u32::MAX),
                hp(0, 30)
            );
        }
    }

    mod healing {
        use super::*;

        #[test]
        fn restores_current() {
            assert_eq!(CombatEventProcessor::apply_healing(hp(10, 30), 5), hp(15, 30));
        }

        #[test]
        fn clamps_at_max() {
            assert_eq!(CombatEventProcessor::apply_healing(hp(28, 30), 10), hp(30, 30));
            assert_eq!(
                CombatEventProcessor::apply_healing(hp(0, 30), u32::MAX),
                hp(30, 30)
            );
        }
    }

    #[test]
    fn bounds_hold_for_any_amount() {
        for max in [0, 1, 7, 30] {
            for current in 0..=max {
                for amount in [0u32, 1, 2, 10, 1_000, u32::MAX] {
                    let start = hp(current, max);
                    let damaged = CombatEventProcessor::apply_damage(start, amount);
                    let healed = CombatEventProcessor::apply_healing(start, amount);
                    assert!(damaged.current() >= 0 && damaged.current() <= max);
                    assert!(healed.current() >= 0 && healed.current() <= max);
                }
            }
        }
    }

    #[test]
    fn resolve_fixed_amount() {
        let resolved =
            CombatEventProcessor::resolve_amount(&AmountInput::Fixed(7), &mut fixed(0.5)).unwrap();
        assert_eq!(resolved.amount, 7);
        assert_eq!(resolved.detail, "7");
        assert!(resolved.roll.is_none());
    }

    #[test]
    fn resolve_rejects_non_positive_fixed_amount() {
        for value in [0, -3] {
            let err = CombatEventProcessor::resolve_amount(&AmountInput::Fixed(value), &mut fixed(0.5))
                .unwrap_err();
            assert_eq!(err, DomainError::NonPositiveAmount(value));
        }
    }

    #[test]
    fn resolve_formula_amount() {
        // 0.5 on a d6 -> 4, twice, +3
        let input = AmountInput::Formula("2d6+3".into());
        let resolved = CombatEventProcessor::resolve_amount(&input, &mut fixed(0.5)).unwrap();
        assert_eq!(resolved.amount, 11);
        assert_eq!(resolved.detail, "2d6+3: [4, 4] + 3 = 11");
        assert_eq!(resolved.roll.map(|r| r.rolls), Some(vec![4, 4]));
    }

    #[test]
    fn resolve_rejects_bad_formula() {
        let input = AmountInput::Formula("2d6 + 3".into());
        let err = CombatEventProcessor::resolve_amount(&input, &mut fixed(0.5)).unwrap_err();
        assert_eq!(err, DomainError::InvalidFormula("2d6 + 3".into()));
    }

    #[test]
    fn resolve_rejects_formula_total_below_one() {
        // 1d4-5 rolls at most -1
        let input = AmountInput::Formula("1d4-5".into());
        let err = CombatEventProcessor::resolve_amount(&input, &mut fixed(0.99)).unwrap_err();
        assert_eq!(err, DomainError::NonPositiveAmount(-1));
    }

    #[test]
    fn apply_reports_clamped_change() {
        let outcome = CombatEventProcessor::apply(
            hp(4, 12),
            CombatEventKind::DamageTaken,
            &AmountInput::Fixed(9),
            &mut fixed(0.5),
        )
        .unwrap();

        assert_eq!(outcome.hit_points, hp(0, 12));
        assert_eq!(outcome.applied, 4);
        assert!(outcome.is_down);
        assert_eq!(outcome.event.amount(), 9);
        assert_eq!(outcome.event.kind(), CombatEventKind::DamageTaken);
    }

    #[test]
    fn apply_healing_from_formula() {
        let outcome = CombatEventProcessor::apply(
            hp(3, 12),
            CombatEventKind::HealingDone,
            &AmountInput::Formula("1d8".into()),
            &mut fixed(0.0),
        )
        .unwrap();

        assert_eq!(outcome.hit_points, hp(4, 12));
        assert_eq!(outcome.applied, 1);
        assert!(!outcome.is_down);
        assert_eq!(outcome.event.source_detail(), "1d8: [1] = 1");
    }

    #[test]
    fn event_rejects_zero_amount() {
        assert_eq!(
            CombatEvent::new(CombatEventKind::HealingDone, 0, "noop"),
            Err(DomainError::NonPositiveAmount(0))
        );
    }

    #[test]
    fn event_serializes_kind_in_upper_snake_case() {
        let event = CombatEvent::new(CombatEventKind::DamageTaken, 5, "5").unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "DAMAGE_TAKEN");
        assert_eq!(json["sourceDetail"], "5");
    }
}
