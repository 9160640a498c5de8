fn with_commas(int_part: &str) -> String {
    let mut out = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}

/// Format a row count with thousands separators: 1,234
pub fn count(n: usize) -> String {
    with_commas(&n.to_string())
}

/// Format an amount with thousands separators and two decimals: 1,234.56
pub fn amount(val: f64) -> String {
    let negative = val < 0.0;
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let body = format!("{}.{dec_part}", with_commas(int_part));
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

pub fn percent(val: f64) -> String {
    format!("{val:.2}%")
}
