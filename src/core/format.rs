use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero and pins the scale, so `30` becomes `30.00`.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

pub fn cents(value: Decimal) -> Decimal {
    round_to(value, 2)
}

/// Inserts `,` every three digits into a plain integer string.
pub fn group_digits(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234.5` at 2 dp -> `1,234.50`.
pub fn grouped(value: Decimal, dp: u32) -> String {
    let text = round_to(value, dp).to_string();
    match text.split_once('.') {
        Some((whole, frac)) => format!("{}.{frac}", group_digits(whole)),
        None => group_digits(&text),
    }
}

/// `-1234.5` at 0 dp -> `-$1,235`.
pub fn money(value: Decimal, dp: u32) -> String {
    let text = grouped(value, dp);
    match text.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${text}"),
    }
}

/// Plain decimal with fixed places and no grouping, e.g. `10.00`.
pub fn plain(value: Decimal, dp: u32) -> String {
    round_to(value, dp).to_string()
}
