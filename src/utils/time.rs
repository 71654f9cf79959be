use chrono::NaiveDate;

use crate::errors::ValidationError;

/* Event dates travel as YYYY-MM-DD strings */
pub fn parse_date(date: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::MalformedDate(date.to_string()))
}
