use crate::views::ViewId;

/// Column widths used by both row groups, as percentages.
pub const ROW_WIDTHS: [u32; 2] = [20, 80];

/// The two row groups of the main area.
pub const ROW_GROUPS: [&[ViewId]; 2] = [
    &[ViewId::Table, ViewId::Grid],
    &[ViewId::SpeciesHistogram, ViewId::MassHistogram, ViewId::Scatter],
];

/// A card and the fraction of the row width it takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot<T> {
    pub item: T,
    pub fraction: f32,
}

/// Lay cards out left to right, cycling through `widths`; a new row starts
/// each time the cycle wraps.
pub fn place<T: Copy>(widths: &[u32], cards: &[T]) -> Vec<Vec<Slot<T>>> {
    let total: u32 = widths.iter().sum();
    if widths.is_empty() || total == 0 {
        return Vec::new();
    }
    cards
        .chunks(widths.len())
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(&item, &w)| Slot {
                    item,
                    fraction: w as f32 / total as f32,
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_cards_fill_one_row() {
        let rows = place(&ROW_WIDTHS, ROW_GROUPS[0]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].item, ViewId::Table);
        assert_eq!(rows[0][0].fraction, 0.2);
        assert_eq!(rows[0][1].fraction, 0.8);
    }

    #[test]
    fn third_card_wraps_at_first_width() {
        let rows = place(&ROW_WIDTHS, ROW_GROUPS[1]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(
            rows[1],
            vec![Slot {
                item: ViewId::Scatter,
                fraction: 0.2
            }]
        );
    }

    #[test]
    fn every_view_is_placed_once() {
        let mut placed: Vec<ViewId> = ROW_GROUPS
            .iter()
            .flat_map(|group| place(&ROW_WIDTHS, group))
            .flatten()
            .map(|s| s.item)
            .collect();
        placed.sort();
        assert_eq!(placed, ViewId::ALL.to_vec());
    }

    #[test]
    fn no_widths_places_nothing() {
        assert!(place::<ViewId>(&[], ROW_GROUPS[0]).is_empty());
    }
}
