// content-pipeline-rs/src/critique.rs
// Best-effort extraction of the overall quality score from critique text.

/// Parse the overall 0-10 score out of a critique.
///
/// Looks for the first `<number>/10` occurrence (tolerating spaces around
/// the slash, decimals, and percent-style lines like "Quality: 7.5 / 10").
/// Returns None when no parseable score is present; a malformed score is
/// a soft condition and never blocks the reviser stage.
pub fn parse_critique_score(critique: &str) -> Option<f32> {
    for line in critique.lines() {
        if let Some(score) = score_from_line(line) {
            return Some(score.clamp(0.0, 10.0));
        }
    }
    None
}

fn score_from_line(line: &str) -> Option<f32> {
    // Find a "/10" and walk backwards over the numeric part before it.
    let mut search_from = 0;
    while let Some(rel) = line[search_from..].find('/') {
        let slash = search_from + rel;
        let after = line[slash + 1..].trim_start();
        if !after.starts_with("10") {
            search_from = slash + 1;
            continue;
        }
        // The denominator must be exactly 10, not 100 or 10.5. A lone
        // period after the 10 is sentence punctuation, not a decimal.
        let mut denom_rest = after[2..].chars();
        let continues = match denom_rest.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => denom_rest
                .next()
                .map(|c| c.is_ascii_digit())
                .unwrap_or(false),
            _ => false,
        };
        if continues {
            search_from = slash + 1;
            continue;
        }

        let before = line[..slash].trim_end();
        let num_start = before
            .rfind(|c: char| !c.is_ascii_digit() && c != '.')
            .map(|i| i + c_len(before, i))
            .unwrap_or(0);
        let candidate = &before[num_start..];
        if let Ok(value) = candidate.parse::<f32>() {
            return Some(value);
        }

        search_from = slash + 1;
    }
    None
}

// Byte length of the char at index i (indices come from rfind, so this
// stays on a char boundary).
fn c_len(s: &str, i: usize) -> usize {
    s[i..].chars().next().map(char::len_utf8).unwrap_or(1)
}
