//! Dice formulas and roll outcomes
//!
//! Supports the `NdM`, `NdM+K` and `NdM-K` forms, e.g. "1d20", "2d6+3", "1d100".
//! The `d` is case-insensitive; nothing else is forgiven (no whitespace, no
//! implicit dice count). Randomness is injected as a closure returning a float
//! in `[0, 1)` so every evaluation is reproducible under a scripted source.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

static DICE_FORMULA_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

fn dice_regex() -> &'static regex_lite::Regex {
    DICE_FORMULA_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"^(\d+)[dD](\d+)(?:([+-])(\d+))?$")
            .expect("DICE_FORMULA_REGEX pattern is invalid")
    })
}

/// Sign applied to the flat modifier of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DiceOperator {
    #[default]
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl DiceOperator {
    pub fn symbol(&self) -> char {
        match self {
            DiceOperator::Plus => '+',
            DiceOperator::Minus => '-',
        }
    }

    fn apply(&self, lhs: i64, rhs: i64) -> i64 {
        match self {
            DiceOperator::Plus => lhs + rhs,
            DiceOperator::Minus => lhs - rhs,
        }
    }
}

/// Most dice one formula may roll; every die is kept in the outcome
pub const MAX_DICE: u32 = 1_000;

/// A parsed dice formula like "2d6+3"
///
/// Fields are private so the `1 <= dice_count <= MAX_DICE` and `die_size > 0` invariants
/// cannot be bypassed; deserialization goes through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DiceFormulaRecord")]
pub struct DiceFormula {
    dice_count: u32,
    die_size: u32,
    operator: DiceOperator,
    modifier: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiceFormulaRecord {
    dice_count: u32,
    die_size: u32,
    #[serde(default)]
    operator: DiceOperator,
    #[serde(default)]
    modifier: u32,
}

impl TryFrom<DiceFormulaRecord> for DiceFormula {
    type Error = DomainError;

    fn try_from(record: DiceFormulaRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.dice_count,
            record.die_size,
            record.operator,
            record.modifier,
        )
    }
}

impl DiceFormula {
    /// Create a formula, rejecting zero dice, zero-sided dice, or more than [`MAX_DICE`] dice
    pub fn new(
        dice_count: u32,
        die_size: u32,
        operator: DiceOperator,
        modifier: u32,
    ) -> Result<Self, DomainError> {
        if dice_count == 0 || dice_count > MAX_DICE || die_size == 0 {
            return Err(DomainError::invalid_formula(format!(
                "{}d{}{}{}",
                dice_count,
                die_size,
                operator.symbol(),
                modifier
            )));
        }
        Ok(Self {
            dice_count,
            die_size,
            operator,
            modifier,
        })
    }

    /// A single die with no modifier ("1d20", "1d100")
    pub const fn single(die_size: u32) -> Self {
        // Zero-sided dice are bumped to d1 so the invariant holds for const callers
        let die_size = if die_size == 0 { 1 } else { die_size };
        Self {
            dice_count: 1,
            die_size,
            operator: DiceOperator::Plus,
            modifier: 0,
        }
    }

    /// Parse a formula string. Anything outside the grammar is `InvalidFormula`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let caps = dice_regex()
            .captures(input)
            .ok_or_else(|| DomainError::invalid_formula(input))?;

        let number = |idx: usize| -> Result<u32, DomainError> {
            caps.get(idx)
                .map(|m| m.as_str())
                .unwrap_or("0")
                .parse::<u32>()
                .map_err(|_| DomainError::invalid_formula(input))
        };

        let dice_count = number(1)?;
        let die_size = number(2)?;
        let (operator, modifier) = match caps.get(3).map(|m| m.as_str()) {
            Some("-") => (DiceOperator::Minus, number(4)?),
            Some(_) => (DiceOperator::Plus, number(4)?),
            None => (DiceOperator::Plus, 0),
        };

        Self::new(dice_count, die_size, operator, modifier)
            .map_err(|_| DomainError::invalid_formula(input))
    }

    pub fn dice_count(&self) -> u32 {
        self.dice_count
    }

    pub fn die_size(&self) -> u32 {
        self.die_size
    }

    pub fn operator(&self) -> DiceOperator {
        self.operator
    }

    pub fn modifier(&self) -> u32 {
        self.modifier
    }

    /// Modifier with its sign applied
    pub fn signed_modifier(&self) -> i64 {
        self.operator.apply(0, self.modifier as i64)
    }

    /// Get the minimum possible total
    pub fn min_total(&self) -> i64 {
        self.dice_count as i64 + self.signed_modifier()
    }

    /// Get the maximum possible total
    pub fn max_total(&self) -> i64 {
        self.dice_count as i64 * self.die_size as i64 + self.signed_modifier()
    }

    /// Roll every die through `rng` and combine with the modifier.
    ///
    /// Each die is `floor(rng() * die_size) + 1`. Values returned by `rng`
    /// outside `[0, 1)` are clamped onto the die's faces.
    pub fn evaluate(&self, rng: &mut dyn FnMut() -> f64) -> RollOutcome {
        let rolls: Vec<u32> = (0..self.dice_count)
            .map(|_| draw_face(self.die_size, rng()))
            .collect();

        let dice_total: i64 = rolls.iter().map(|r| *r as i64).sum();
        let total = self.operator.apply(dice_total, self.modifier as i64);

        let faces = rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let rendered_detail = if self.modifier == 0 {
            format!("[{}] = {}", faces, total)
        } else {
            format!(
                "[{}] {} {} = {}",
                faces,
                self.operator.symbol(),
                self.modifier,
                total
            )
        };

        RollOutcome {
            formula: *self,
            rolls,
            total,
            rendered_detail,
        }
    }
}

/// Map a unit float onto `[1, die_size]`
fn draw_face(die_size: u32, unit: f64) -> u32 {
    let scaled = (unit * die_size as f64).floor();
    // `as` saturates: negatives and NaN land on 0, overshoot on u32::MAX
    (scaled as u32).min(die_size - 1) + 1
}

/// Parse then evaluate in one step
pub fn roll(input: &str, rng: &mut dyn FnMut() -> f64) -> Result<RollOutcome, DomainError> {
    Ok(DiceFormula::parse(input)?.evaluate(rng))
}

impl FromStr for DiceFormula {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operator, self.modifier) {
            (DiceOperator::Plus, 0) => write!(f, "{}d{}", self.dice_count, self.die_size),
            (op, m) => write!(
                f,
                "{}d{}{}{}",
                self.dice_count,
                self.die_size,
                op.symbol(),
                m
            ),
        }
    }
}

/// Result of rolling dice. Created fresh on every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    /// The formula that was rolled
    pub formula: DiceFormula,
    /// Individual die results, in draw order
    pub rolls: Vec<u32>,
    /// Dice sum combined with the signed modifier
    pub total: i64,
    /// Human-readable breakdown, e.g. "[3, 5] + 2 = 10"
    pub rendered_detail: String,
}

impl RollOutcome {
    /// Single die showing its highest face (natural 20 on a d20)
    pub fn natural_max(&self) -> bool {
        self.rolls.len() == 1 && self.rolls[0] == self.formula.die_size
    }

    /// Single die showing 1
    pub fn natural_min(&self) -> bool {
        self.rolls.len() == 1 && self.rolls[0] == 1
    }

    /// Sum of the dice before the modifier
    pub fn dice_total(&self) -> i64 {
        self.rolls.iter().map(|r| *r as i64).sum()
    }
}
