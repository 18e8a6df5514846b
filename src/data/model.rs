use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;

// ---------------------------------------------------------------------------
// Species – the categorical column
// ---------------------------------------------------------------------------

/// The three Palmer archipelago species. Ordered alphabetically so that
/// `BTreeSet<Species>` and every per-species series share one ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Adelie,
    Chinstrap,
    Gentoo,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Chinstrap, Species::Gentoo];

    pub fn name(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Chinstrap => "Chinstrap",
            Species::Gentoo => "Gentoo",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        // Some exports carry the long form, e.g. "Adelie Penguin (Pygoscelis adeliae)".
        let head = s.split_whitespace().next().unwrap_or("");
        match head {
            "Adelie" => Ok(Species::Adelie),
            "Chinstrap" => Ok(Species::Chinstrap),
            "Gentoo" => Ok(Species::Gentoo),
            _ => bail!("unknown species '{s}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute – the numeric measurement columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::BillLength,
        Attribute::BillDepth,
        Attribute::FlipperLength,
        Attribute::BodyMass,
    ];

    /// Column name as it appears in the source files.
    pub fn column(self) -> &'static str {
        match self {
            Attribute::BillLength => "bill_length_mm",
            Attribute::BillDepth => "bill_depth_mm",
            Attribute::FlipperLength => "flipper_length_mm",
            Attribute::BodyMass => "body_mass_g",
        }
    }

    /// Read this measurement from a record.
    pub fn value(self, record: &PenguinRecord) -> Option<f64> {
        match self {
            Attribute::BillLength => record.bill_length_mm,
            Attribute::BillDepth => record.bill_depth_mm,
            Attribute::FlipperLength => record.flipper_length_mm,
            Attribute::BodyMass => record.body_mass_g,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// PenguinRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single observation. Measurements are nullable at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct PenguinRecord {
    pub species: Species,
    pub island: String,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<String>,
    pub year: Option<i64>,
}

// ---------------------------------------------------------------------------
// PenguinDataset – the prepared, immutable dataset
// ---------------------------------------------------------------------------

/// Records that survived preparation. Every record has a `body_mass_g`.
#[derive(Debug, Clone)]
pub struct PenguinDataset {
    records: Vec<PenguinRecord>,
    /// Species that occur at least once, in `Species` order.
    pub species_present: BTreeSet<Species>,
    /// How many raw records were dropped for a missing body mass.
    pub dropped: usize,
}

impl PenguinDataset {
    /// Drop records without a body mass and index the species that remain.
    pub fn prepare(raw: Vec<PenguinRecord>) -> Self {
        let raw_len = raw.len();
        let records: Vec<PenguinRecord> = raw
            .into_iter()
            .filter(|r| r.body_mass_g.is_some())
            .collect();
        let species_present = records.iter().map(|r| r.species).collect();
        let dropped = raw_len - records.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} records with missing body_mass_g");
        }
        PenguinDataset {
            records,
            species_present,
            dropped,
        }
    }

    pub fn records(&self) -> &[PenguinRecord] {
        &self.records
    }

    /// Number of prepared records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{palmer_like, record};

    #[test]
    fn prepare_drops_missing_body_mass() {
        let ds = PenguinDataset::prepare(palmer_like());
        assert_eq!(ds.len(), 342);
        assert_eq!(ds.dropped, 2);
        assert!(ds.records().iter().all(|r| r.body_mass_g.is_some()));
        assert!(!ds.is_empty());
    }

    #[test]
    fn all_masses_missing_leaves_an_empty_dataset() {
        let ds = PenguinDataset::prepare(vec![
            record(Species::Adelie, None),
            record(Species::Gentoo, None),
        ]);
        assert!(ds.is_empty());
        assert_eq!(ds.dropped, 2);
        assert!(ds.species_present.is_empty());
    }

    #[test]
    fn prepare_keeps_record_order() {
        let mut a = record(Species::Gentoo, Some(5000.0));
        a.island = "Biscoe".into();
        let b = record(Species::Adelie, None);
        let c = record(Species::Chinstrap, Some(3700.0));
        let ds = PenguinDataset::prepare(vec![a, b, c]);
        let species: Vec<Species> = ds.records().iter().map(|r| r.species).collect();
        assert_eq!(species, vec![Species::Gentoo, Species::Chinstrap]);
    }

    #[test]
    fn species_present_reflects_prepared_records_only() {
        let ds = PenguinDataset::prepare(vec![
            record(Species::Adelie, Some(3800.0)),
            record(Species::Gentoo, None),
        ]);
        assert_eq!(ds.species_present.len(), 1);
        assert!(ds.species_present.contains(&Species::Adelie));
    }

    #[test]
    fn species_parses_short_and_long_forms() {
        assert_eq!("Gentoo".parse::<Species>().unwrap(), Species::Gentoo);
        assert_eq!(
            "Adelie Penguin (Pygoscelis adeliae)".parse::<Species>().unwrap(),
            Species::Adelie
        );
        assert!("Emperor".parse::<Species>().is_err());
    }
}
