//! Форматирование дат и сумм для таблиц и бланков

use chrono::NaiveDate;

use super::list::filter::parse_date;

/// "2024-03-15" или "2024-03-15T14:02:26Z" -> "15.03.2024"; иначе без изменений
pub fn format_date(value: &str) -> String {
    let date_part = value.split('T').next().unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Thousands separated by spaces, two decimals, optional currency suffix.
pub fn format_money(amount: f64, currency: Option<&str>) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    // -0.00 печатаем как 0.00
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    match currency.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => format!("{}{}.{} {}", sign, grouped, fraction, code),
        None => format!("{}{}.{}", sign, grouped, fraction),
    }
}

/// Количество ночей между заездом и выездом
pub fn nights_between(arrival: &str, departure: &str) -> Option<i64> {
    let arrival = parse_date(arrival)?;
    let departure = parse_date(departure)?;
    let nights = (departure - arrival).num_days();
    (nights >= 0).then_some(nights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5, Some("USD")), "1 234.50 USD");
        assert_eq!(format_money(1234567.891, None), "1 234 567.89");
        assert_eq!(format_money(0.0, None), "0.00");
        assert_eq!(format_money(-1234.56, Some("EUR")), "-1 234.56 EUR");
        assert_eq!(format_money(-0.001, None), "0.00");
        assert_eq!(format_money(999.0, Some(" ")), "999.00");
    }

    #[test]
    fn test_nights_between() {
        assert_eq!(nights_between("2024-03-01", "2024-03-04"), Some(3));
        assert_eq!(nights_between("2024-02-28", "2024-03-01"), Some(2));
        assert_eq!(nights_between("2024-03-01", "2024-03-01"), Some(0));
        assert_eq!(nights_between("2024-03-04", "2024-03-01"), None);
        assert_eq!(nights_between("bad", "2024-03-01"), None);
    }
}
