use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use crate::errors::{BreadthError, Result};

// Round to one decimal place for tabular display
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// Current calendar date at the exchange
pub fn today_in(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

// Provider timestamps are session opens in UTC seconds; the trading date is
// the exchange-local calendar day.
pub fn timestamp_to_date(timestamp: i64, tz: &Tz) -> Result<NaiveDate> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.with_timezone(tz).date_naive())
        .ok_or_else(|| BreadthError::DataError(format!("Invalid timestamp: {}", timestamp)))
}

// Midnight UTC of a date, as a unix timestamp
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666_666), 66.7);
        assert_eq!(round1(50.0), 50.0);
        assert_eq!(round1(33.333_3), 33.3);
    }

    #[test]
    fn test_timestamp_uses_exchange_day() {
        // 2024-06-03 13:00 UTC is 10:00 in Sao Paulo
        let tz = chrono_tz::America::Sao_Paulo;
        let date = timestamp_to_date(1_717_419_600, &tz).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());

        // 02:00 UTC is still the previous evening in Sao Paulo
        let date = timestamp_to_date(1_717_380_000, &tz).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    }

    #[test]
    fn test_date_to_timestamp() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_to_timestamp(date), 1_704_067_200);
    }
}
