//! Calculator session state
//!
//! `CalculatorState` is an immutable value owned by the application shell.
//! Every transition borrows the current state and returns the next one; the
//! shell swaps it in. Recomputation is a separate transition so the shell can
//! run it behind a [`Debouncer`](crate::debounce::Debouncer).
//!
//! Tips requests carry the generation they were issued in. Any edit, unit
//! switch, or changed result bumps the generation, and replies from an older
//! generation are dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bmi::{BmiResult, calculate};
use crate::category::BmiCategory;
use crate::tips::HealthTips;
use crate::units::{
    Height, HeightUnit, Weight, WeightUnit, cm_to_ft_in, ft_in_to_cm, kg_to_lbs, lbs_to_kg,
    parse_field,
};

/// Raw text of every input field
///
/// Both unit systems keep their own fields so switching back and forth does
/// not lose what was typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFields {
    pub weight_kg: String,
    pub weight_lbs: String,
    pub height_cm: String,
    pub height_ft: String,
    pub height_in: String,
}

impl Default for InputFields {
    fn default() -> Self {
        Self {
            weight_kg: "70".into(),
            weight_lbs: "154".into(),
            height_cm: "170".into(),
            height_ft: "5".into(),
            height_in: "7".into(),
        }
    }
}

/// Edit to one of the height fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeightEdit {
    Centimeters(String),
    Feet(String),
    Inches(String),
}

/// Request to change the display unit of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSwitch {
    Weight(WeightUnit),
    Height(HeightUnit),
}

/// Progress of the tips for the current result
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TipsState {
    #[default]
    Idle,
    Loading,
    Ready(HealthTips),
}

/// A tips fetch the shell should run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipsRequest {
    pub generation: u64,
    pub bmi: f64,
    pub category: BmiCategory,
}

impl TipsRequest {
    /// Pair fetched tips with this request's generation
    #[must_use]
    pub fn respond(&self, tips: HealthTips) -> TipsResponse {
        TipsResponse {
            generation: self.generation,
            tips,
        }
    }
}

/// Tips delivered back to the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipsResponse {
    pub generation: u64,
    pub tips: HealthTips,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalculatorState {
    weight_unit: WeightUnit,
    height_unit: HeightUnit,
    inputs: InputFields,
    result: Option<BmiResult>,
    tips: TipsState,
    generation: u64,
}

impl CalculatorState {
    #[must_use]
    pub fn weight_unit(&self) -> WeightUnit {
        self.weight_unit
    }

    #[must_use]
    pub fn height_unit(&self) -> HeightUnit {
        self.height_unit
    }

    #[must_use]
    pub fn inputs(&self) -> &InputFields {
        &self.inputs
    }

    /// Last computed result; `None` until computed or when input is incomplete
    #[must_use]
    pub fn result(&self) -> Option<&BmiResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn tips(&self) -> &TipsState {
        &self.tips
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Weight as currently entered
    #[must_use]
    pub fn weight(&self) -> Weight {
        match self.weight_unit {
            WeightUnit::Kilograms => Weight::Metric {
                kg: parse_field(&self.inputs.weight_kg),
            },
            WeightUnit::Pounds => Weight::Imperial {
                lbs: parse_field(&self.inputs.weight_lbs),
            },
        }
    }

    /// Height as currently entered
    #[must_use]
    pub fn height(&self) -> Height {
        match self.height_unit {
            HeightUnit::Centimeters => Height::Metric {
                cm: parse_field(&self.inputs.height_cm),
            },
            HeightUnit::FeetInches => Height::Imperial {
                feet: parse_field(&self.inputs.height_ft),
                inches: parse_field(&self.inputs.height_in),
            },
        }
    }

    /// Replace the weight field of the active unit
    #[must_use]
    pub fn apply_weight_edit(&self, text: impl Into<String>) -> Self {
        let mut inputs = self.inputs.clone();
        match self.weight_unit {
            WeightUnit::Kilograms => inputs.weight_kg = text.into(),
            WeightUnit::Pounds => inputs.weight_lbs = text.into(),
        }
        self.invalidated(inputs, self.result)
    }

    /// Replace one of the height fields
    #[must_use]
    pub fn apply_height_edit(&self, edit: HeightEdit) -> Self {
        let mut inputs = self.inputs.clone();
        match edit {
            HeightEdit::Centimeters(text) => inputs.height_cm = text,
            HeightEdit::Feet(text) => inputs.height_ft = text,
            HeightEdit::Inches(text) => inputs.height_in = text,
        }
        self.invalidated(inputs, self.result)
    }

    /// Change the display unit of one axis
    ///
    /// Switching to the active unit changes nothing. Otherwise the result and
    /// tips are cleared and the current value is converted into the target
    /// fields; when there is nothing positive to convert the target fields
    /// keep their previous text.
    #[must_use]
    pub fn switch_unit(&self, switch: UnitSwitch) -> Self {
        let mut inputs = self.inputs.clone();
        let mut next = match switch {
            UnitSwitch::Weight(unit) if unit == self.weight_unit => return self.clone(),
            UnitSwitch::Height(unit) if unit == self.height_unit => return self.clone(),
            UnitSwitch::Weight(WeightUnit::Pounds) => {
                if let Some(lbs) = kg_to_lbs(parse_field(&inputs.weight_kg)) {
                    inputs.weight_lbs = format!("{lbs:.1}");
                }
                self.invalidated(inputs, None)
            }
            UnitSwitch::Weight(WeightUnit::Kilograms) => {
                if let Some(kg) = lbs_to_kg(parse_field(&inputs.weight_lbs)) {
                    inputs.weight_kg = format!("{kg:.1}");
                }
                self.invalidated(inputs, None)
            }
            UnitSwitch::Height(HeightUnit::FeetInches) => {
                if let Some(ft_in) = cm_to_ft_in(parse_field(&inputs.height_cm)) {
                    inputs.height_ft = ft_in.feet.to_string();
                    inputs.height_in = ft_in.inches.to_string();
                }
                self.invalidated(inputs, None)
            }
            UnitSwitch::Height(HeightUnit::Centimeters) => {
                let feet = parse_field(&inputs.height_ft);
                let inches = parse_field(&inputs.height_in);
                if let Some(cm) = ft_in_to_cm(feet, inches) {
                    inputs.height_cm = format!("{cm:.1}");
                }
                self.invalidated(inputs, None)
            }
        };

        match switch {
            UnitSwitch::Weight(unit) => next.weight_unit = unit,
            UnitSwitch::Height(unit) => next.height_unit = unit,
        }
        next
    }

    /// Recompute the result from the current fields
    ///
    /// Meant to run once the debounce quiet period has elapsed. A changed
    /// result starts a new generation and clears tips; an unchanged one
    /// keeps them.
    #[must_use]
    pub fn recompute(&self) -> Self {
        let result = calculate(self.weight(), self.height());
        if result == self.result {
            return self.clone();
        }

        debug!(
            bmi = result.map(|r| r.bmi),
            category = result.map(|r| r.category.label()),
            "recomputed BMI"
        );
        self.invalidated(self.inputs.clone(), result)
    }

    /// Start fetching tips for the current result
    ///
    /// Returns the request to run, or `None` (and an unchanged state) when
    /// there is no result to ask about.
    #[must_use]
    pub fn request_tips(&self) -> (Self, Option<TipsRequest>) {
        let Some(result) = self.result else {
            return (self.clone(), None);
        };

        let request = TipsRequest {
            generation: self.generation,
            bmi: result.bmi,
            category: result.category,
        };
        let next = Self {
            tips: TipsState::Loading,
            ..self.clone()
        };
        (next, Some(request))
    }

    /// Accept fetched tips if they belong to the current generation
    #[must_use]
    pub fn receive_tips_result(&self, response: TipsResponse) -> Self {
        if response.generation != self.generation {
            debug!(
                response = response.generation,
                current = self.generation,
                "dropping stale health tips"
            );
            return self.clone();
        }

        Self {
            tips: TipsState::Ready(response.tips),
            ..self.clone()
        }
    }

    fn invalidated(&self, inputs: InputFields, result: Option<BmiResult>) -> Self {
        Self {
            weight_unit: self.weight_unit,
            height_unit: self.height_unit,
            inputs,
            result,
            tips: TipsState::Idle,
            generation: self.generation + 1,
        }
    }
}
