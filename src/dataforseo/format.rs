/// Human-readable count: `950`, `1.2K`, `3.4M`, `1.0B`. Missing values print as `0`.
pub fn format_count(value: Option<f64>) -> String {
    let v = match value {
        Some(v) if v.is_finite() => v,
        _ => return "0".to_string(),
    };

    // Thresholds sit where the lower unit would round up to 1000.
    let abs = v.abs();
    if abs >= 999_950_000.0 {
        format!("{:.1}B", v / 1_000_000_000.0)
    } else if abs >= 999_950.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if abs >= 999.5 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        format!("{}", v.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_print_as_integers() {
        assert_eq!(format_count(Some(100.0)), "100");
        assert_eq!(format_count(Some(50.4)), "50");
        assert_eq!(format_count(Some(0.0)), "0");
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(format_count(Some(1_234.0)), "1.2K");
        assert_eq!(format_count(Some(3_460_000.0)), "3.5M");
        assert_eq!(format_count(Some(1_000_000_000.0)), "1.0B");
    }

    #[test]
    fn test_unit_boundaries_carry_into_next_unit() {
        assert_eq!(format_count(Some(999.4)), "999");
        assert_eq!(format_count(Some(999.6)), "1.0K");
        assert_eq!(format_count(Some(999_949.0)), "999.9K");
        assert_eq!(format_count(Some(999_999.0)), "1.0M");
        assert_eq!(format_count(Some(999_960_000.0)), "1.0B");
    }

    #[test]
    fn test_missing_is_zero() {
        assert_eq!(format_count(None), "0");
        assert_eq!(format_count(Some(f64::NAN)), "0");
    }
}
