use chrono::NaiveDate;
use serde::Deserialize;

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_with_whitespace() {
        let date = parse_date(" 2026-10-19 ").expect("date parses");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid"));
    }

    #[test]
    fn rejects_other_formats() {
        let err = parse_date("19/10/2026").expect_err("format rejected");
        assert!(err.contains("YYYY-MM-DD"));
    }
}
