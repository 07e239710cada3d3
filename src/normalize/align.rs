//! Year alignment across the three tracked series

use super::extract::IndicatorTable;
use crate::currency::Country;
use std::collections::BTreeSet;

/// One value per tracked country for a single year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryValues {
    pub sgp: f64,
    pub ind: f64,
    pub usa: f64,
}

impl CountryValues {
    pub fn get(&self, country: Country) -> f64 {
        match country {
            Country::SGP => self.sgp,
            Country::IND => self.ind,
            Country::USA => self.usa,
        }
    }
}

/// A year for which every tracked country reports a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedYear {
    pub year: i32,
    pub values: CountryValues,
}

/// Strictly increasing years, each complete for all tracked countries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedYearSet {
    rows: Vec<AlignedYear>,
}

impl AlignedYearSet {
    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|row| row.year).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlignedYear> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.rows.first().map(|row| row.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.rows.last().map(|row| row.year)
    }
}

impl<'a> IntoIterator for &'a AlignedYearSet {
    type Item = &'a AlignedYear;
    type IntoIter = std::slice::Iter<'a, AlignedYear>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Keep the years `>= min_year` where SGP, IND and USA all have a present value.
///
/// A year missing for any one country is dropped entirely; nothing is
/// interpolated. If a country has no row at all the result is empty.
pub fn align_years(table: &IndicatorTable, min_year: i32) -> AlignedYearSet {
    let candidates: BTreeSet<i32> = table
        .years()
        .iter()
        .copied()
        .filter(|&year| year >= min_year)
        .collect();

    let mut rows = Vec::with_capacity(candidates.len());
    for year in candidates {
        let values = (
            table.value(Country::SGP, year),
            table.value(Country::IND, year),
            table.value(Country::USA, year),
        );

        match values {
            (Some(sgp), Some(ind), Some(usa)) => rows.push(AlignedYear {
                year,
                values: CountryValues { sgp, ind, usa },
            }),
            _ => log::debug!("Dropping {} for {}: incomplete series", year, table.indicator()),
        }
    }

    AlignedYearSet { rows }
}
