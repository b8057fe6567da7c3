/// Shorten an address for display (`abcd...wxyz`)
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let len = chars.len();
    if len <= 10 {
        return address.to_string();
    }
    let head: String = chars[0..4].iter().collect();
    let tail: String = chars[len - 4..len].iter().collect();
    format!("{}...{}", head, tail)
}

/// Group the integer part with commas, keeping at most `max_fraction` decimals
/// and dropping trailing zeros (`1234.5678` -> `1,234.568`, `500000` -> `500,000`)
pub fn group_thousands(value: f64, max_fraction: usize) -> String {
    let formatted = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (formatted.as_str(), ""),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Compact magnitude with two decimals: `999.00`, `1.50K`, `1.50M`, `1.50B`
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Signed percentage with two decimals: `+5.50%`, `-3.50%`, `0.00%`
pub fn format_percentage(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        assert_eq!(format_address("So11111111111111111111111111111111111111112"), "So11...1112");
        assert_eq!(format_address("short"), "short");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(500_000.0, 3), "500,000");
        assert_eq!(group_thousands(1234.5678, 3), "1,234.568");
        assert_eq!(group_thousands(999.0, 3), "999");
        assert_eq!(group_thousands(-1_000_000.5, 3), "-1,000,000.5");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(999.0), "999.00");
        assert_eq!(format_compact(1500.0), "1.50K");
        assert_eq!(format_compact(1_500_000.0), "1.50M");
        assert_eq!(format_compact(1_500_000_000.0), "1.50B");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(5.5), "+5.50%");
        assert_eq!(format_percentage(-3.5), "-3.50%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }
}
