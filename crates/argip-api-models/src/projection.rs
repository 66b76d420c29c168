//! Client-side projections over fetched catalog lists.
//!
//! Nothing here is persisted; both clients derive these views from the lists
//! they already hold.

use std::cmp::Ordering;

use crate::{Nut, Range, ScrewLength};

/// Distinct screw diameters, ascending.
#[must_use]
pub fn distinct_diameters(screws: &[ScrewLength]) -> Vec<f64> {
    let mut diameters: Vec<f64> = screws.iter().map(|screw| screw.srednica).collect();
    diameters.sort_by(f64::total_cmp);
    diameters.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
    diameters
}

/// Screws of the given diameter, ordered by length.
#[must_use]
pub fn lengths_for(screws: &[ScrewLength], diameter: f64) -> Vec<&ScrewLength> {
    let mut matching: Vec<&ScrewLength> = screws
        .iter()
        .filter(|screw| screw.srednica.total_cmp(&diameter) == Ordering::Equal)
        .collect();
    matching.sort_by(|a, b| a.dlugosc.total_cmp(&b.dlugosc));
    matching
}

/// Display label for a nut's range: the range name, or the raw id when unknown.
#[must_use]
pub fn range_label(ranges: &[Range], range_id: i64) -> String {
    ranges
        .iter()
        .find(|range| range.id == range_id)
        .map_or_else(|| range_id.to_string(), |range| range.nazwa.clone())
}

/// Pair every nut with its range label.
#[must_use]
pub fn label_nuts<'a>(nuts: &'a [Nut], ranges: &[Range]) -> Vec<(&'a Nut, String)> {
    nuts.iter()
        .map(|nut| (nut, range_label(ranges, nut.id_zakresu)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screw(id: i64, srednica: f64, dlugosc: f64) -> ScrewLength {
        ScrewLength {
            id,
            srednica,
            dlugosc,
        }
    }

    #[test]
    fn diameters_are_distinct_and_sorted() {
        let screws = vec![
            screw(1, 8.0, 40.0),
            screw(2, 6.0, 30.0),
            screw(3, 8.0, 20.0),
            screw(4, 6.0, 25.0),
        ];
        assert_eq!(distinct_diameters(&screws), vec![6.0, 8.0]);
        assert!(distinct_diameters(&[]).is_empty());
    }

    #[test]
    fn lengths_follow_selected_diameter() {
        let screws = vec![
            screw(1, 8.0, 40.0),
            screw(2, 6.0, 30.0),
            screw(3, 8.0, 20.0),
        ];
        let ids: Vec<i64> = lengths_for(&screws, 8.0).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(lengths_for(&screws, 10.0).is_empty());
    }

    #[test]
    fn range_label_falls_back_to_identifier() {
        let ranges = vec![Range {
            id: 1,
            nazwa: "Small".to_string(),
            od: 1.0,
            do_: 5.0,
        }];
        assert_eq!(range_label(&ranges, 1), "Small");
        assert_eq!(range_label(&ranges, 9), "9");
    }

    #[test]
    fn label_nuts_preserves_order() {
        let ranges = vec![Range {
            id: 2,
            nazwa: "Medium".to_string(),
            od: 5.0,
            do_: 10.0,
        }];
        let nuts = vec![
            Nut {
                id: 10,
                id_zakresu: 2,
                nazwa: "M6".to_string(),
                srednica: 6.0,
                cena: 0.2,
            },
            Nut {
                id: 11,
                id_zakresu: 7,
                nazwa: "M12".to_string(),
                srednica: 12.0,
                cena: 0.9,
            },
        ];
        let labelled = label_nuts(&nuts, &ranges);
        assert_eq!(labelled[0].1, "Medium");
        assert_eq!(labelled[1].1, "7");
        assert_eq!(labelled[1].0.id, 11);
    }
}
