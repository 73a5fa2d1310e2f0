use std::cmp::Ordering;

#[derive(Debug)]
enum Run<'a> {
    Text(String),
    /// Digit run with leading zeros removed, compared by length then digits.
    Number(&'a str),
}

/// Splits `s` into alternating text/number runs. The sequence always starts
/// and ends with a (possibly empty) text run, so two sequences line up
/// position by position.
fn runs(s: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut rest = s;

    loop {
        let text_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        runs.push(Run::Text(rest[..text_end].to_lowercase()));
        rest = &rest[text_end..];

        if rest.is_empty() {
            break;
        }

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        runs.push(Run::Number(rest[..digits_end].trim_start_matches('0')));
        rest = &rest[digits_end..];
    }

    runs
}

fn compare_runs(a: &Run<'_>, b: &Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Number(x), Run::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Run::Text(x), Run::Text(y)) => x.cmp(y),
        (Run::Number(_), Run::Text(_)) => Ordering::Less,
        (Run::Text(_), Run::Number(_)) => Ordering::Greater,
    }
}

/// Digit-aware comparison: `"Show 2" < "Show 10"`.
///
/// Digit runs compare by numeric value (no overflow, any length), text runs
/// compare case-insensitively, and a sequence that is a prefix of the other
/// sorts first. Titles that are equal under those rules fall back to a plain
/// string comparison so the order stays total.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = runs(a);
    let right = runs(b);

    left.iter()
        .zip(&right)
        .map(|(x, y)| compare_runs(x, y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| left.len().cmp(&right.len()))
        .then_with(|| a.cmp(b))
}

pub fn sort_natural<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}
