//! Text and number helpers used when rendering analysis results.
//!
//! These never fail: unparseable numbers come back as `NaN` and the
//! renderers print them as the literal `NaN`.

/// Turn a snake_case or space separated key into a title ("images_count" -> "Images Count").
///
/// Words are split on runs of `_` and whitespace. Only the first character of
/// each word is uppercased; the remainder is kept as-is.
pub fn convert_to_title_case(text: &str) -> String {
    text.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse `input` as a float and round it to `decimal_places`.
///
/// The result is a plain number, so `"3.00"` becomes `3.0` and prints as `3`.
/// Input that does not start with a number yields `NaN`.
pub fn round_to_decimal_places(input: &str, decimal_places: u32) -> f64 {
    round_fixed(parse_float(input), decimal_places)
}

/// Lenient float parse over the longest numeric prefix of `input`.
///
/// Leading whitespace is skipped, trailing garbage is ignored (`"12px"` is
/// `12`), and `Infinity` is accepted with an optional sign.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    let mut valid_end = if digits > 0 { end } else { 0 };

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            valid_end = frac_end;
        }
        end = frac_end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            valid_end = exp_end;
        }
    }

    // A bare "." after the integer part is dropped by `valid_end`.
    let candidate = &s[..valid_end];
    let candidate = if candidate.trim_start_matches(['+', '-']).starts_with('.') {
        candidate.replacen('.', "0.", 1)
    } else {
        candidate.to_string()
    };
    candidate.parse::<f64>().unwrap_or(f64::NAN)
}

/// Digits needed to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1075;

/// Round `value` to `decimal_places` from its exact binary expansion, ties
/// away from zero, as fixed-point formatting does. Non-finite values pass
/// through and `-0` comes back as `0`.
pub fn round_fixed(value: f64, decimal_places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = fixed_digits(value, decimal_places as usize)
        .parse::<f64>()
        .unwrap_or(f64::NAN);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Fixed-point rendering with exactly `decimal_places` digits.
///
/// A negative value that rounds to zero keeps its sign
/// (`format_fixed(-0.001, 2)` is `"-0.00"`).
pub fn format_fixed(value: f64, decimal_places: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    fixed_digits(value, decimal_places)
}

fn fixed_digits(value: f64, decimal_places: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    if decimal_places >= EXACT_FRACTION_DIGITS {
        return format!("{sign}{:.*}", decimal_places, value.abs());
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, dropped) = frac_part.split_at(decimal_places);
    let round_up = dropped.as_bytes().first().is_some_and(|d| *d >= b'5');

    let mut digits: Vec<u8> = int_part.bytes().chain(kept.bytes()).collect();
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimal_places;
    let int_digits = String::from_utf8_lossy(&digits[..split]);
    if decimal_places == 0 {
        format!("{sign}{int_digits}")
    } else {
        let frac_digits = String::from_utf8_lossy(&digits[split..]);
        format!("{sign}{int_digits}.{frac_digits}")
    }
}

/// Shortest rendering of a number (`3.0` -> `"3"`, `NaN` -> `"NaN"`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}
