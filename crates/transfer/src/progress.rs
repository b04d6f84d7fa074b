//! Progress-line translation for pscp output.

/// Extracts a percentage from one line of copy-tool output.
///
/// Expected shape: `<name> | <size> | <rate> | ETA: <time> | <NN>%` — at
/// least four `|`-delimited fields with the percentage last. Any other
/// input yields `None`. The pscp progress format is not a stable contract,
/// so the parser is total: it never panics and a line that fails to parse
/// never disturbs the surrounding stream.
pub fn parse_percent(line: &str) -> Option<u8> {
    if !line.contains('|') || !line.contains('%') {
        return None;
    }

    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 4 {
        return None;
    }

    let tail = fields.last()?.trim();
    let digits = tail.strip_suffix('%')?.trim();
    let percent: u8 = digits.parse().ok()?;
    (percent <= 100).then_some(percent)
}
