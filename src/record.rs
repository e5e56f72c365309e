//! Rental property record
//!
//! A [`Record`] is the unit that flows through the pipeline. It is created by the
//! loader, moved from stage to stage, and either dropped by the filter or kept in
//! the final sorted result set.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// One rental property entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Street name (not unique on its own)
    pub street: String,
    /// Unit number, unique only together with `street`
    pub unit_number: i64,
    /// Monthly rent, fixed at load time
    pub monthly_rent: f64,
    /// Rent accumulated over the horizon, written once by a computation worker
    pub accumulated_rent: f64,
    /// 0-based line position in the input file
    pub position: usize,
}

impl Record {
    /// Create a freshly loaded record with no accumulated rent
    pub fn new(street: impl Into<String>, unit_number: i64, monthly_rent: f64, position: usize) -> Self {
        Self {
            street: street.into(),
            unit_number,
            monthly_rent,
            accumulated_rent: 0.0,
            position,
        }
    }

    /// Compare two records by (street, unit_number), falling back to load position
    ///
    /// The position tie-break makes the order total, so two records with the same
    /// street and unit number always come out in the order they were loaded.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.street
            .cmp(&other.street)
            .then(self.unit_number.cmp(&other.unit_number))
            .then(self.position.cmp(&other.position))
    }

    /// True if `self` sorts strictly after `other`
    pub fn sorts_after(&self, other: &Self) -> bool {
        self.cmp_key(other) == Ordering::Greater
    }
}

/// Report row body: `|street|number|rent|total|`
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|{:>22}|{:>8}|{:>4.2}|{:.2}|",
            self.street, self.unit_number, self.monthly_rent, self.accumulated_rent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_zero_accumulated_rent() {
        let record = Record::new("Oak", 1, 250.0, 0);
        assert_eq!(record.accumulated_rent, 0.0);
        assert_eq!(record.street, "Oak");
    }

    #[test]
    fn test_cmp_key_street_then_number() {
        let elm = Record::new("Elm", 9, 100.0, 0);
        let oak1 = Record::new("Oak", 1, 100.0, 1);
        let oak2 = Record::new("Oak", 2, 100.0, 2);

        assert!(oak1.sorts_after(&elm));
        assert!(oak2.sorts_after(&oak1));
        assert!(!elm.sorts_after(&oak1));
    }

    #[test]
    fn test_cmp_key_tie_breaks_on_position() {
        let first = Record::new("Oak", 1, 210.0, 3);
        let second = Record::new("Oak", 1, 290.0, 7);

        assert_eq!(first.cmp_key(&second), Ordering::Less);
        assert!(second.sorts_after(&first));
    }

    #[test]
    fn test_serializes_to_json_object() {
        let mut record = Record::new("Oak", 12, 250.0, 3);
        record.accumulated_rent = 30000.0;

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["street"], "Oak");
        assert_eq!(value["unit_number"], 12);
        assert_eq!(value["monthly_rent"], 250.0);
        assert_eq!(value["accumulated_rent"], 30000.0);
        assert_eq!(value["position"], 3);
    }

    #[test]
    fn test_display_row() {
        let mut record = Record::new("Oak", 12, 250.0, 0);
        record.accumulated_rent = 30000.0;
        let row = record.to_string();
        assert_eq!(
            row,
            format!("|{:>22}|{:>8}|250.00|30000.00|", "Oak", 12)
        );
    }
}
