use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("price series is empty")]
    Empty,
    #[error("price series has {actual} bars, need at least {required}")]
    TooShort { required: usize, actual: usize },
    #[error("dates not strictly increasing at index {index}: {prev} then {next}")]
    OutOfOrder {
        index: usize,
        prev: NaiveDate,
        next: NaiveDate,
    },
    #[error("non-positive close {close} at index {index}")]
    NonPositiveClose { index: usize, close: f64 },
}

//a single daily observation (date, close)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint { date, close }
    }
}

//an ordered daily close series, validated on construction
//dates strictly increasing (no duplicates), closes positive, at least two bars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    //minimum bars required to compute any return
    pub const MIN_BARS: usize = 2;

    //creates a series with validation
    pub fn new(points: Vec<PricePoint>) -> Result<Self, DataError> {
        if points.is_empty() {
            return Err(DataError::Empty);
        }

        if points.len() < Self::MIN_BARS {
            return Err(DataError::TooShort {
                required: Self::MIN_BARS,
                actual: points.len(),
            });
        }

        for (i, point) in points.iter().enumerate() {
            if point.close <= 0.0 {
                return Err(DataError::NonPositiveClose {
                    index: i,
                    close: point.close,
                });
            }

            if i > 0 && points[i - 1].date >= point.date {
                return Err(DataError::OutOfOrder {
                    index: i,
                    prev: points[i - 1].date,
                    next: point.date,
                });
            }
        }

        Ok(PriceSeries { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    //returns the close prices in order
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    //returns the dates in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    #[test]
    fn valid_series() {
        let series = PriceSeries::new(vec![
            PricePoint::new(day(1), 100.0),
            PricePoint::new(day(2), 101.0),
            PricePoint::new(day(3), 99.5),
        ])
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![100.0, 101.0, 99.5]);
        assert_eq!(series.first().date, day(1));
        assert_eq!(series.last().close, 99.5);
    }

    #[test]
    fn empty_series_rejected() {
        assert!(matches!(PriceSeries::new(vec![]), Err(DataError::Empty)));
    }

    #[test]
    fn single_bar_rejected() {
        let result = PriceSeries::new(vec![PricePoint::new(day(1), 100.0)]);
        assert!(matches!(
            result,
            Err(DataError::TooShort {
                required: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn duplicate_date_rejected() {
        let result = PriceSeries::new(vec![
            PricePoint::new(day(1), 100.0),
            PricePoint::new(day(1), 101.0),
        ]);
        assert!(matches!(result, Err(DataError::OutOfOrder { index: 1, .. })));
    }

    #[test]
    fn descending_date_rejected() {
        let result = PriceSeries::new(vec![
            PricePoint::new(day(2), 100.0),
            PricePoint::new(day(1), 101.0),
        ]);
        assert!(matches!(result, Err(DataError::OutOfOrder { index: 1, .. })));
    }

    #[test]
    fn non_positive_close_rejected() {
        let result = PriceSeries::new(vec![
            PricePoint::new(day(1), 100.0),
            PricePoint::new(day(2), 0.0),
        ]);
        assert!(matches!(
            result,
            Err(DataError::NonPositiveClose { index: 1, .. })
        ));
    }
}
