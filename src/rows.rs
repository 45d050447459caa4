//! Ridership row storage.
//!
//! Rows are [`TextArray`]s of eight fixed-order fields, collected in a
//! [`ValueArray`]. Parsing the raw log is the ingester's job; this module
//! only fixes the row shape and the field lookups consumers rely on.

use crate::error::{CollectionError, Result};
use crate::text_array::TextArray;
use crate::value_array::ValueArray;

pub const ROW_FIELDS: usize = 8;

/// Column of a ridership row, in storage order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RowField {
    Date,
    Time,
    Zone,
    Station,
    StationAccess,
    Device,
    Entrances,
    Exits,
}

impl RowField {
    pub const ALL: [RowField; ROW_FIELDS] = [
        RowField::Date,
        RowField::Time,
        RowField::Zone,
        RowField::Station,
        RowField::StationAccess,
        RowField::Device,
        RowField::Entrances,
        RowField::Exits,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RowField::Date => "date",
            RowField::Time => "time",
            RowField::Zone => "zone",
            RowField::Station => "station",
            RowField::StationAccess => "station_access",
            RowField::Device => "device",
            RowField::Entrances => "entrances",
            RowField::Exits => "exits",
        }
    }
}

/// Table of rows; a row's position is its slot index.
pub type RowTable = ValueArray<TextArray>;

/// Build an eight-field row. Fewer fields leave the trailing columns
/// unwritten (they read as `""`); more is `CapacityExceeded`.
pub fn new_row<S: AsRef<str>>(fields: &[S]) -> Result<TextArray> {
    let mut row = TextArray::new(ROW_FIELDS)?;
    for field in fields {
        row.append(field.as_ref())?;
    }
    Ok(row)
}

pub fn row_field(row: &TextArray, field: RowField) -> Result<&str> {
    row.get(field.index())
}

/// Parse a numeric counter column (`entrances` or `exits`).
pub fn row_count(row: &TextArray, field: RowField) -> Result<i32> {
    row_field(row, field)?
        .trim()
        .parse()
        .map_err(|_| CollectionError::TypeMismatch { expected: "integer field" })
}

/// Rows whose `field` value is one of `allowed`, in table order.
pub fn rows_matching<'a>(
    table: &'a RowTable,
    field: RowField,
    allowed: &'a TextArray,
) -> impl Iterator<Item = &'a TextArray> + 'a {
    table
        .iter()
        .filter(move |row| row_field(row, field).is_ok_and(|v| allowed.contains(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RowTable {
        let mut table = RowTable::new(3).unwrap();
        let rows = [
            ["2024-06-01", "05:00:00", "33", "02502", "A1", "D7", "12", "3"],
            ["2024-06-01", "05:15:00", "11", "06001", "A2", "D2", "4", "9"],
            ["2024-06-01", "05:30:00", "38", "07103", "A1", "D1", "0", "1"],
        ];
        for (i, r) in rows.iter().enumerate() {
            table.set(i, new_row(r).unwrap()).unwrap();
        }
        table
    }

    #[test]
    fn fields_are_addressed_by_column() {
        let table = sample();
        let row = table.get(0).unwrap().unwrap();
        assert_eq!(row_field(row, RowField::Station).unwrap(), "02502");
        assert_eq!(row_field(row, RowField::Exits).unwrap(), "3");
        assert_eq!(row_count(row, RowField::Entrances).unwrap(), 12);
        assert_eq!(row_count(row, RowField::Zone).unwrap(), 33);
        assert!(row_count(row, RowField::Date).is_err());
    }

    #[test]
    fn row_shape_is_fixed() {
        let short = new_row(&["2024-06-01"]).unwrap();
        assert_eq!(row_field(&short, RowField::Exits).unwrap(), "");
        let long = vec!["x"; ROW_FIELDS + 1];
        assert_eq!(
            new_row(&long[..]).err(),
            Some(CollectionError::CapacityExceeded {
                capacity: ROW_FIELDS
            })
        );
        for (i, f) in RowField::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
        assert_eq!(RowField::StationAccess.name(), "station_access");
    }

    #[test]
    fn filter_by_zone() {
        let table = sample();
        let zones = TextArray::from_fields(&["33", "38"]).unwrap();
        let stations: Vec<_> = rows_matching(&table, RowField::Zone, &zones)
            .map(|r| row_field(r, RowField::Station).unwrap())
            .collect();
        assert_eq!(stations, vec!["02502", "07103"]);
    }
}
