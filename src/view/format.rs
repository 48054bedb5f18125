use chrono::{DateTime, Utc};

/// "há quanto tempo" label in pt-BR: minutes under an hour, hours under a
/// day, days otherwise. Every unit is floored; timestamps in the future read
/// as zero minutes.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - then).num_seconds().max(0);
    let minutes = elapsed / 60;
    let hours = elapsed / 3_600;
    let days = elapsed / 86_400;

    if minutes < 60 {
        format!("{} min atrás", minutes)
    } else if hours < 24 {
        format!("{}h atrás", hours)
    } else {
        format!("{} dias atrás", days)
    }
}

/// `dd/mm/yyyy`, as `toLocaleDateString('pt-BR')` prints it.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

pub fn format_clock(ts: DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

/// Integer with pt-BR thousands grouping: `1250` -> `"1.250"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Seconds with one decimal, e.g. `2.3s`.
pub fn format_seconds(value: f64) -> String {
    format!("{:.1}s", value)
}
