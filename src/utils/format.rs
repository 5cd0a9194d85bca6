//! Formatting of display values.

/// Compact count for badges (e.g., "950", "1.2k", "3.4M").
///
/// Rounds half up to one decimal and picks the unit after rounding, so
/// 999_950 reads "1M" rather than "1000k".
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let thousands = count.saturating_add(50) / 100;
    if thousands < 10_000 {
        return format!("{}k", tenths(thousands));
    }
    format!("{}M", tenths(count.saturating_add(50_000) / 100_000))
}

/// Render a count of tenths, dropping a trailing ".0".
fn tenths(value: u64) -> String {
    match value % 10 {
        0 => (value / 10).to_string(),
        frac => format!("{}.{}", value / 10, frac),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1k");
        assert_eq!(format_count(1_240), "1.2k");
        assert_eq!(format_count(3_400_000), "3.4M");
    }

    #[test]
    fn test_format_count_unit_boundaries() {
        assert_eq!(format_count(999_949), "999.9k");
        assert_eq!(format_count(999_950), "1M");
        assert_eq!(format_count(999_999), "1M");
        assert_eq!(format_count(1_000_000), "1M");
        assert_eq!(format_count(1_049_999), "1M");
    }
}
