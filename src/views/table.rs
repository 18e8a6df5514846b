use std::cmp::Ordering;
use std::fmt;

use crate::data::model::{PenguinDataset, PenguinRecord};

// ---------------------------------------------------------------------------
// Columns and cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Species,
    Island,
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
    Sex,
    Year,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Species,
        Column::Island,
        Column::BillLength,
        Column::BillDepth,
        Column::FlipperLength,
        Column::BodyMass,
        Column::Sex,
        Column::Year,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Species => "species",
            Column::Island => "island",
            Column::BillLength => "bill_length_mm",
            Column::BillDepth => "bill_depth_mm",
            Column::FlipperLength => "flipper_length_mm",
            Column::BodyMass => "body_mass_g",
            Column::Sex => "sex",
            Column::Year => "year",
        }
    }

    fn cell(self, r: &PenguinRecord) -> Cell {
        match self {
            Column::Species => Cell::Text(Some(r.species.name().to_string())),
            Column::Island => Cell::Text(Some(r.island.clone()).filter(|s| !s.is_empty())),
            Column::BillLength => Cell::Number(r.bill_length_mm),
            Column::BillDepth => Cell::Number(r.bill_depth_mm),
            Column::FlipperLength => Cell::Number(r.flipper_length_mm),
            Column::BodyMass => Cell::Number(r.body_mass_g),
            Column::Sex => Cell::Text(r.sex.clone()),
            Column::Year => Cell::Number(r.year.map(|y| y as f64)),
        }
    }
}

/// One table cell. `None` is a missing value, shown blank and sorted last.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(Option<String>),
    Number(Option<f64>),
}

impl Cell {
    fn is_null(&self) -> bool {
        matches!(self, Cell::Text(None) | Cell::Number(None))
    }

    /// Ordering between two non-null cells of the same column.
    fn cmp_values(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Text(Some(a)), Cell::Text(Some(b))) => a.cmp(b),
            (Cell::Number(Some(a)), Cell::Number(Some(b))) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(Some(s)) => f.write_str(s),
            Cell::Number(Some(v)) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            Cell::Number(Some(v)) => write!(f, "{v}"),
            Cell::Text(None) | Cell::Number(None) => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub ascending: bool,
}

impl SortSpec {
    /// Header-click cycle: ascending → descending → unsorted.
    pub fn cycle(current: Option<SortSpec>, clicked: Column) -> Option<SortSpec> {
        match current {
            Some(s) if s.column == clicked && s.ascending => Some(SortSpec {
                column: clicked,
                ascending: false,
            }),
            Some(s) if s.column == clicked => None,
            _ => Some(SortSpec {
                column: clicked,
                ascending: true,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// TableSnapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Sortable, shown one page at a time.
    Paginated,
    /// Every row in a scrolling grid.
    Grid,
}

/// Rendered copy of the dataset, one row per prepared record.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    pub style: TableStyle,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableSnapshot {
    pub fn paginated(dataset: &PenguinDataset) -> Self {
        Self::build(dataset, TableStyle::Paginated)
    }

    pub fn grid(dataset: &PenguinDataset) -> Self {
        Self::build(dataset, TableStyle::Grid)
    }

    fn build(dataset: &PenguinDataset, style: TableStyle) -> Self {
        let columns = Column::ALL.to_vec();
        let rows = dataset
            .records()
            .iter()
            .map(|r| columns.iter().map(|c| c.cell(r)).collect())
            .collect();
        TableSnapshot {
            style,
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row indices in display order. Stable; missing values always last.
    pub fn sorted_order(&self, sort: Option<SortSpec>) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        let Some(spec) = sort else {
            return order;
        };
        let Some(col) = self.columns.iter().position(|c| *c == spec.column) else {
            return order;
        };
        order.sort_by(|&a, &b| {
            let (ca, cb) = (&self.rows[a][col], &self.rows[b][col]);
            match (ca.is_null(), cb.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) if spec.ascending => ca.cmp_values(cb),
                (false, false) => cb.cmp_values(ca),
            }
        });
        order
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        self.rows.len().div_ceil(page_size.max(1)).max(1)
    }

    /// Slice of `order` shown on `page` (zero-based, clamped to the last page).
    pub fn page<'a>(&self, order: &'a [usize], page: usize, page_size: usize) -> &'a [usize] {
        let size = page_size.max(1);
        let page = page.min(self.page_count(size) - 1);
        let start = (page * size).min(order.len());
        let end = (start + size).min(order.len());
        &order[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{palmer_like, record};
    use crate::data::model::Species;

    #[test]
    fn table_and_grid_hold_every_prepared_record() {
        let ds = PenguinDataset::prepare(palmer_like());
        assert_eq!(TableSnapshot::paginated(&ds).len(), ds.len());
        assert_eq!(TableSnapshot::grid(&ds).len(), ds.len());
    }

    #[test]
    fn cells_format_like_the_source_table() {
        let mut r = record(Species::Adelie, Some(3750.0));
        r.bill_length_mm = Some(39.1);
        r.sex = None;
        let ds = PenguinDataset::prepare(vec![r]);
        let t = TableSnapshot::grid(&ds);
        let shown: Vec<String> = t.rows[0].iter().map(|c| c.to_string()).collect();
        assert_eq!(shown[0], "Adelie");
        assert_eq!(shown[2], "39.1");
        assert_eq!(shown[5], "3750");
        assert_eq!(shown[6], "");
        assert_eq!(shown[7], "2007");
    }

    fn small() -> TableSnapshot {
        let mut a = record(Species::Gentoo, Some(5000.0));
        a.bill_depth_mm = None;
        let mut b = record(Species::Adelie, Some(3500.0));
        b.bill_depth_mm = Some(19.0);
        let mut c = record(Species::Chinstrap, Some(3500.0));
        c.bill_depth_mm = Some(17.5);
        TableSnapshot::paginated(&PenguinDataset::prepare(vec![a, b, c]))
    }

    #[test]
    fn sort_is_stable_and_puts_missing_last() {
        let t = small();
        let asc = SortSpec {
            column: Column::BodyMass,
            ascending: true,
        };
        assert_eq!(t.sorted_order(Some(asc)), vec![1, 2, 0]);

        let depth_desc = SortSpec {
            column: Column::BillDepth,
            ascending: false,
        };
        assert_eq!(t.sorted_order(Some(depth_desc)), vec![1, 2, 0]);
        let depth_asc = SortSpec {
            ascending: true,
            ..depth_desc
        };
        assert_eq!(t.sorted_order(Some(depth_asc)), vec![2, 1, 0]);
        assert_eq!(t.sorted_order(None), vec![0, 1, 2]);
    }

    #[test]
    fn header_clicks_cycle_sort_direction() {
        let s = SortSpec::cycle(None, Column::Sex);
        assert_eq!(
            s,
            Some(SortSpec {
                column: Column::Sex,
                ascending: true
            })
        );
        let s = SortSpec::cycle(s, Column::Sex);
        assert_eq!(s.map(|s| s.ascending), Some(false));
        assert_eq!(SortSpec::cycle(s, Column::Sex), None);
        assert_eq!(
            SortSpec::cycle(s, Column::Year).map(|s| s.column),
            Some(Column::Year)
        );
    }

    #[test]
    fn pages_cover_every_row_once() {
        let ds = PenguinDataset::prepare(palmer_like());
        let t = TableSnapshot::paginated(&ds);
        let order = t.sorted_order(None);
        assert_eq!(t.page_count(10), 35);

        let mut seen = Vec::new();
        for p in 0..t.page_count(10) {
            seen.extend_from_slice(t.page(&order, p, 10));
        }
        assert_eq!(seen, order);
        assert_eq!(t.page(&order, 34, 10).len(), 2);
        // past the end clamps to the last page
        assert_eq!(t.page(&order, 99, 10), t.page(&order, 34, 10));
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let t = TableSnapshot::paginated(&PenguinDataset::prepare(Vec::new()));
        assert!(t.is_empty());
        assert_eq!(t.page_count(10), 1);
        assert!(t.page(&[], 0, 10).is_empty());
    }
}
