//! Report rendering, parsing and persistence.
//!
//! The text layout is:
//!
//! ```text
//! Total Listings: 2
//! Average Price: $175.00
//!
//! Ranked Hosts:
//! Host ID: A, Listings: 1
//! Host ID: B, Listings: 1
//! ```
//!
//! An undefined average (no listings) renders as [`AVERAGE_PLACEHOLDER`]. Averages that fall
//! exactly halfway between two cents round away from zero. Backslashes and line breaks inside a
//! host id are written as `\\`, `\n` and `\r` so every host stays on one line.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{HostCount, Statistics};

/// Rendered in place of the average price when there were no listings.
pub const AVERAGE_PLACEHOLDER: &str = "N/A";

const TOTAL_LABEL: &str = "Total Listings: ";
const AVERAGE_LABEL: &str = "Average Price: ";
const HOSTS_HEADER: &str = "Ranked Hosts:";
const HOST_LABEL: &str = "Host ID: ";
const COUNT_SEPARATOR: &str = ", Listings: ";

/// Output layout for persisted reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Line-oriented text (see the module docs).
    #[default]
    Text,
    /// Pretty-printed JSON of [`Statistics`].
    Json,
}

impl ReportFormat {
    /// Render `stats` in this format.
    pub fn render(self, stats: &Statistics) -> AnalysisResult<String> {
        match self {
            ReportFormat::Text => Ok(render_report(stats)),
            ReportFormat::Json => render_json(stats),
        }
    }
}

/// Format an average price with two decimals, or the placeholder.
///
/// A value exactly halfway between two cents rounds away from zero (`100.125` → `$100.13`).
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(v) => format!("${:.2}", round_half_away(v)),
        None => AVERAGE_PLACEHOLDER.to_string(),
    }
}

// `{:.2}` breaks exact ties toward even. Only odd multiples of 1/8 sit exactly on a half cent.
fn round_half_away(v: f64) -> f64 {
    let cents = v * 100.0;
    if (v * 8.0).fract() == 0.0 && cents.fract().abs() == 0.5 {
        cents.round() / 100.0
    } else {
        v
    }
}

/// Render statistics as the text report.
pub fn render_report(stats: &Statistics) -> String {
    let head = [
        format!("{TOTAL_LABEL}{}", stats.total_listings),
        format!("{AVERAGE_LABEL}{}", format_average(stats.average_price)),
        String::new(),
        HOSTS_HEADER.to_string(),
    ];
    let hosts = stats.ranked_hosts.iter().map(|host| {
        format!(
            "{HOST_LABEL}{}{COUNT_SEPARATOR}{}",
            escape_host_id(&host.host_id),
            host.count
        )
    });
    head.into_iter().chain(hosts).map(|line| line + "\n").collect()
}

/// Render statistics as pretty-printed JSON. An undefined average becomes `null`.
pub fn render_json(stats: &Statistics) -> AnalysisResult<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}

/// Recover [`Statistics`] from a text report produced by [`render_report`].
///
/// The average is read back at the two-decimal precision it was written with.
pub fn parse_report(text: &str) -> AnalysisResult<Statistics> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (line, raw) = next_line(&mut lines, "total listings")?;
    let total_listings = field(line, raw, TOTAL_LABEL)?
        .parse::<usize>()
        .map_err(|e| malformed(line, format!("bad listing count: {e}")))?;

    let (line, raw) = next_line(&mut lines, "average price")?;
    let average = field(line, raw, AVERAGE_LABEL)?;
    let average_price = if average == AVERAGE_PLACEHOLDER {
        None
    } else {
        let digits = average.strip_prefix('$').unwrap_or(average);
        Some(
            digits
                .parse::<f64>()
                .map_err(|e| malformed(line, format!("bad average price: {e}")))?,
        )
    };

    let (line, raw) = next_line(&mut lines, "blank separator")?;
    if !raw.trim().is_empty() {
        return Err(malformed(line, "expected a blank line"));
    }
    let (line, raw) = next_line(&mut lines, "host header")?;
    if raw.trim_end() != HOSTS_HEADER {
        return Err(malformed(line, format!("expected '{HOSTS_HEADER}'")));
    }

    let mut ranked_hosts = Vec::new();
    for (line, raw) in lines {
        if raw.trim().is_empty() {
            continue;
        }
        let rest = field(line, raw, HOST_LABEL)?;
        let (host_id, count) = rest
            .rsplit_once(COUNT_SEPARATOR)
            .ok_or_else(|| malformed(line, "missing listing count"))?;
        let count = count
            .trim()
            .parse::<usize>()
            .map_err(|e| malformed(line, format!("bad host count: {e}")))?;
        ranked_hosts.push(HostCount {
            host_id: unescape_host_id(line, host_id)?,
            count,
        });
    }

    Ok(Statistics {
        total_listings,
        average_price,
        ranked_hosts,
    })
}

/// Write `report` to `path`, replacing any existing content.
pub fn write_report(path: impl AsRef<Path>, report: &str) -> AnalysisResult<()> {
    let path = path.as_ref();
    fs::write(path, report).map_err(|source| AnalysisError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn escape_host_id(host_id: &str) -> Cow<'_, str> {
    if !host_id.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(host_id);
    }
    let mut out = String::with_capacity(host_id.len() + 2);
    for c in host_id.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn unescape_host_id(line: usize, raw: &str) -> AnalysisResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => return Err(malformed(line, format!("bad escape '\\{other}' in host id"))),
            None => return Err(malformed(line, "dangling '\\' in host id")),
        }
    }
    Ok(out)
}

fn next_line<'t>(
    lines: &mut impl Iterator<Item = (usize, &'t str)>,
    what: &str,
) -> AnalysisResult<(usize, &'t str)> {
    lines
        .next()
        .ok_or_else(|| malformed(0, format!("report ended before the {what} line")))
}

fn field<'t>(line: usize, raw: &'t str, label: &str) -> AnalysisResult<&'t str> {
    raw.strip_prefix(label)
        .map(str::trim_end)
        .ok_or_else(|| malformed(line, format!("expected '{}'", label.trim_end())))
}

fn malformed(line: usize, message: impl Into<String>) -> AnalysisError {
    AnalysisError::MalformedReport {
        line,
        message: message.into(),
    }
}
