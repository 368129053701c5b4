use regex::Regex;
use std::sync::OnceLock;

static SUMMARY_RE: OnceLock<Regex> = OnceLock::new();
static DATA_RE: OnceLock<Regex> = OnceLock::new();

fn summary_re() -> &'static Regex {
    SUMMARY_RE.get_or_init(|| {
        Regex::new(r"(?s)\*\*Response:\*\*\s*(.+?)\s*\*\*Data:\*\*").expect("valid regex")
    })
}

fn data_re() -> &'static Regex {
    DATA_RE.get_or_init(|| Regex::new(r"(?s)\*\*Data:\*\*\s*(.+)").expect("valid regex"))
}

/// The parsed result of a model completion.
///
/// `summary` is present only when both section markers are (the summary
/// span is delimited by the `**Data:**` marker); `cited_urls` holds the
/// cleaned non-empty lines of the `**Data:**` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOutput {
    pub summary: Option<String>,
    pub cited_urls: Vec<String>,
}

impl CompletionOutput {
    /// Extract the two labeled sections from raw model output. A missing
    /// marker degrades to an empty summary and/or empty URL list; parsing
    /// never fails.
    pub fn parse(raw: &str) -> Self {
        let summary = summary_re()
            .captures(raw)
            .map(|c| c[1].trim().to_string())
            .filter(|s| !s.is_empty());

        let cited_urls = data_re()
            .captures(raw)
            .map(|c| {
                c[1].lines()
                    .map(clean_url_line)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            summary,
            cited_urls,
        }
    }
}

/// Trim whitespace and the stray trailing `>` or `,` some models append.
fn clean_url_line(line: &str) -> String {
    let line = line.trim();
    line.strip_suffix('>')
        .or_else(|| line.strip_suffix(','))
        .unwrap_or(line)
        .to_string()
}
