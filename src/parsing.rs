pub fn parse_cpu_to_millicores(q: &str) -> Option<i64> {
    let q = q.trim();
    if q.is_empty() {
        return None;
    }
    if let Some(stripped) = q.strip_suffix('n') {
        if let Ok(nanos) = stripped.parse::<i128>() {
            return Some((nanos / 1_000_000) as i64);
        }
    } else if let Some(stripped) = q.strip_suffix('u') {
        if let Ok(micros) = stripped.parse::<i128>() {
            return Some((micros / 1_000) as i64);
        }
    } else if let Some(stripped) = q.strip_suffix('m') {
        if let Ok(mc) = stripped.parse::<i64>() {
            return Some(mc);
        }
    } else {
        // treat as cores; can be integer or float
        if let Ok(cores) = q.parse::<f64>() {
            return Some((cores * 1000.0).round() as i64);
        }
    }
    None
}

pub fn millicores_to_cores(millicores: i64) -> f64 {
    millicores as f64 / 1000.0
}

pub fn parse_memory_to_bytes(q: &str) -> Option<i64> {
    let q = q.trim();
    if q.is_empty() {
        return None;
    }

    // Order matters: check binary suffixes first (Ki, Mi, ...), then decimal (K, M, ...)
    const BINARY_UNITS: &[(&str, i64)] = &[
        ("Ki", 1024),
        ("Mi", 1024 * 1024),
        ("Gi", 1024 * 1024 * 1024),
        ("Ti", 1024_i64.pow(4)),
        ("Pi", 1024_i64.pow(5)),
        ("Ei", 1024_i64.pow(6)),
    ];
    const DECIMAL_UNITS: &[(&str, i64)] = &[
        ("K", 1000),
        ("M", 1000 * 1000),
        ("G", 1000 * 1000 * 1000),
        ("T", 1000_i64.pow(4)),
        ("P", 1000_i64.pow(5)),
        ("E", 1000_i64.pow(6)),
        ("k", 1000),
    ];

    for (suf, mul) in BINARY_UNITS {
        if let Some(stripped) = q.strip_suffix(suf) {
            if let Ok(v) = stripped.parse::<f64>() {
                return Some((v * (*mul as f64)).round() as i64);
            }
        }
    }
    for (suf, mul) in DECIMAL_UNITS {
        if let Some(stripped) = q.strip_suffix(suf) {
            if let Ok(v) = stripped.parse::<f64>() {
                return Some((v * (*mul as f64)).round() as i64);
            }
        }
    }
    // bytes without suffix
    if let Ok(v) = q.parse::<i64>() {
        return Some(v);
    }
    None
}

/// Memory quantities are reported in Ki throughout the report.
pub fn parse_memory_to_ki(q: &str) -> Option<i64> {
    parse_memory_to_bytes(q).map(|b| b / 1024)
}

pub fn ki_to_gi_rounded(ki: i64) -> i64 {
    (ki as f64 / 1024.0 / 1024.0).round() as i64
}

/// Percentage rounded to one decimal. A zero denominator yields 0.0 rather
/// than an error or NaN.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    (numerator / denominator * 1000.0).round() / 10.0
}
