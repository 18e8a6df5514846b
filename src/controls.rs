use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

use crate::data::model::{Attribute, Species};

// ---------------------------------------------------------------------------
// Control identities and declarations
// ---------------------------------------------------------------------------

/// Every user-adjustable input on the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlId {
    SelectedAttribute,
    PlotlyBinCount,
    SeabornBinCount,
    SelectedSpecies,
}

impl ControlId {
    /// Sidebar order.
    pub const ALL: [ControlId; 4] = [
        ControlId::SelectedAttribute,
        ControlId::PlotlyBinCount,
        ControlId::SeabornBinCount,
        ControlId::SelectedSpecies,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ControlId::SelectedAttribute => "selected_attribute",
            ControlId::PlotlyBinCount => "Plotly_bin_count",
            ControlId::SeabornBinCount => "seaborn_bin_count",
            ControlId::SelectedSpecies => "Selected_Species_list",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlId::SelectedAttribute => "Select Attribute",
            ControlId::PlotlyBinCount => "Bin Count",
            ControlId::SeabornBinCount => "Seaborn Slider",
            ControlId::SelectedSpecies => "Species Checkbox",
        }
    }

    pub fn domain(self) -> ControlDomain {
        match self {
            ControlId::SelectedAttribute => ControlDomain::Choices(&Attribute::ALL),
            ControlId::PlotlyBinCount => ControlDomain::Numeric(PLOTLY_BIN_RANGE),
            ControlId::SeabornBinCount => ControlDomain::Slider(SEABORN_BIN_RANGE),
            ControlId::SelectedSpecies => ControlDomain::MultiSelect(&Species::ALL),
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlId {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, ControlError> {
        ControlId::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ControlError::Unknown(s.to_string()))
    }
}

pub const PLOTLY_BIN_RANGE: RangeInclusive<i64> = 1..=50;
pub const SEABORN_BIN_RANGE: RangeInclusive<i64> = 0..=100;

/// The value domain a control's widget enforces.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlDomain {
    /// Single choice from a fixed list (selectize).
    Choices(&'static [Attribute]),
    /// Integer typed into a numeric input.
    Numeric(RangeInclusive<i64>),
    /// Integer picked on a slider.
    Slider(RangeInclusive<i64>),
    /// Any subset of a fixed list (checkbox group).
    MultiSelect(&'static [Species]),
}

// ---------------------------------------------------------------------------
// Values and change messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    Attribute(Attribute),
    Count(i64),
    Species(BTreeSet<Species>),
}

impl ControlValue {
    fn kind(&self) -> &'static str {
        match self {
            ControlValue::Attribute(_) => "attribute",
            ControlValue::Count(_) => "count",
            ControlValue::Species(_) => "species set",
        }
    }
}

/// A widget edit, delivered to [`ControlState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControlChange {
    pub control: ControlId,
    pub value: ControlValue,
}

impl ControlChange {
    pub fn new(control: ControlId, value: ControlValue) -> Self {
        Self { control, value }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("unknown control '{0}'")]
    Unknown(String),
    #[error("control '{control}' does not accept a {got} value")]
    KindMismatch { control: ControlId, got: &'static str },
}

// ---------------------------------------------------------------------------
// ControlState
// ---------------------------------------------------------------------------

/// Current value of every control. Owned by the application state and
/// handed by reference to each view function.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub selected_attribute: Attribute,
    pub plotly_bin_count: i64,
    pub seaborn_bin_count: i64,
    pub selected_species: BTreeSet<Species>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            selected_attribute: Attribute::BillLength,
            plotly_bin_count: 1,
            seaborn_bin_count: 50,
            selected_species: BTreeSet::from([Species::Adelie]),
        }
    }
}

impl ControlState {
    pub fn get(&self, control: ControlId) -> ControlValue {
        match control {
            ControlId::SelectedAttribute => ControlValue::Attribute(self.selected_attribute),
            ControlId::PlotlyBinCount => ControlValue::Count(self.plotly_bin_count),
            ControlId::SeabornBinCount => ControlValue::Count(self.seaborn_bin_count),
            ControlId::SelectedSpecies => ControlValue::Species(self.selected_species.clone()),
        }
    }

    /// Store a new value, clamping counts into range.
    /// Returns whether the stored value actually changed.
    pub fn apply(&mut self, change: ControlChange) -> Result<bool, ControlError> {
        let ControlChange { control, value } = change;
        let mismatch = |v: &ControlValue| ControlError::KindMismatch {
            control,
            got: v.kind(),
        };

        match (control, value) {
            (ControlId::SelectedAttribute, ControlValue::Attribute(a)) => {
                Ok(replace(&mut self.selected_attribute, a))
            }
            (ControlId::PlotlyBinCount, ControlValue::Count(n)) => {
                let n = clamp_count(control, n, &PLOTLY_BIN_RANGE);
                Ok(replace(&mut self.plotly_bin_count, n))
            }
            (ControlId::SeabornBinCount, ControlValue::Count(n)) => {
                let n = clamp_count(control, n, &SEABORN_BIN_RANGE);
                Ok(replace(&mut self.seaborn_bin_count, n))
            }
            (ControlId::SelectedSpecies, ControlValue::Species(set)) => {
                Ok(replace(&mut self.selected_species, set))
            }
            (_, v) => Err(mismatch(&v)),
        }
    }
}

fn clamp_count(control: ControlId, n: i64, range: &RangeInclusive<i64>) -> i64 {
    let clamped = n.clamp(*range.start(), *range.end());
    if clamped != n {
        log::warn!("{control}: {n} outside {range:?}, clamped to {clamped}");
    }
    clamped
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_declarations() {
        let state = ControlState::default();
        assert_eq!(state.selected_species, BTreeSet::from([Species::Adelie]));
        assert_eq!(state.seaborn_bin_count, 50);
        assert_eq!(state.plotly_bin_count, 1);
        assert_eq!(state.selected_attribute, Attribute::BillLength);
    }

    #[test]
    fn numeric_bin_count_clamps_to_1_50() {
        let mut state = ControlState::default();
        let id = ControlId::PlotlyBinCount;
        state.apply(ControlChange::new(id, ControlValue::Count(0))).unwrap();
        assert_eq!(state.plotly_bin_count, 1);
        state.apply(ControlChange::new(id, ControlValue::Count(51))).unwrap();
        assert_eq!(state.plotly_bin_count, 50);
        state.apply(ControlChange::new(id, ControlValue::Count(-7))).unwrap();
        assert_eq!(state.plotly_bin_count, 1);
    }

    #[test]
    fn slider_clamps_to_0_100() {
        let mut state = ControlState::default();
        let id = ControlId::SeabornBinCount;
        state.apply(ControlChange::new(id, ControlValue::Count(150))).unwrap();
        assert_eq!(state.seaborn_bin_count, 100);
        state.apply(ControlChange::new(id, ControlValue::Count(-1))).unwrap();
        assert_eq!(state.seaborn_bin_count, 0);
    }

    #[test]
    fn apply_reports_whether_value_changed() {
        let mut state = ControlState::default();
        let id = ControlId::SeabornBinCount;
        assert!(!state.apply(ControlChange::new(id, ControlValue::Count(50))).unwrap());
        assert!(state.apply(ControlChange::new(id, ControlValue::Count(10))).unwrap());
        // 200 clamps to 100, which differs from 10
        assert!(state.apply(ControlChange::new(id, ControlValue::Count(200))).unwrap());
        assert!(!state.apply(ControlChange::new(id, ControlValue::Count(300))).unwrap());
    }

    #[test]
    fn wrong_value_kind_is_rejected() {
        let mut state = ControlState::default();
        let err = state
            .apply(ControlChange::new(
                ControlId::SelectedAttribute,
                ControlValue::Count(3),
            ))
            .unwrap_err();
        assert_eq!(
            err,
            ControlError::KindMismatch {
                control: ControlId::SelectedAttribute,
                got: "count"
            }
        );
        assert_eq!(state, ControlState::default());
    }

    #[test]
    fn controls_resolve_by_name() {
        for id in ControlId::ALL {
            assert_eq!(id.name().parse::<ControlId>().unwrap(), id);
        }
        assert_eq!(
            "bin_count".parse::<ControlId>(),
            Err(ControlError::Unknown("bin_count".into()))
        );
    }

    #[test]
    fn get_reflects_applied_species() {
        let mut state = ControlState::default();
        let set = BTreeSet::from([Species::Gentoo, Species::Chinstrap]);
        state
            .apply(ControlChange::new(
                ControlId::SelectedSpecies,
                ControlValue::Species(set.clone()),
            ))
            .unwrap();
        assert_eq!(state.get(ControlId::SelectedSpecies), ControlValue::Species(set));
    }

    #[test]
    fn domains_match_widgets() {
        assert_eq!(ControlId::PlotlyBinCount.domain(), ControlDomain::Numeric(1..=50));
        assert_eq!(ControlId::SeabornBinCount.domain(), ControlDomain::Slider(0..=100));
        match ControlId::SelectedAttribute.domain() {
            ControlDomain::Choices(c) => assert_eq!(c.len(), 4),
            other => panic!("unexpected domain {other:?}"),
        }
    }
}
