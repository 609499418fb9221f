//! Number formatting for hover text and axis ticks.

/// `v` with a fixed number of decimals.
pub fn fixed(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}")
}

/// `v` with a fixed number of decimals and `,` between thousands.
pub fn thousands(v: f64, decimals: usize) -> String {
    let text = fixed(v, decimals);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Dollar amount with cents, e.g. `$1,234.50`.
pub fn currency(v: f64) -> String {
    let text = thousands(v, 2);
    match text.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${text}"),
    }
}

/// Apply `f` to a present value; the missing marker renders blank.
pub fn or_blank(v: Option<f64>, f: impl Fn(f64) -> String) -> String {
    v.map(f).unwrap_or_default()
}

/// Compact tick label: whole numbers without decimals, otherwise up to two.
pub fn compact(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        fixed(v.round(), 0)
    } else {
        let text = fixed(v, 2);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
