use std::cell::Cell;
use std::fmt::Write;
use std::rc::Rc;

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let mut out = String::new();
    let missing = "<missing>";
    let mismatch = (0..max).find(|&i| {
        expected.get(i).map(String::as_str).unwrap_or(missing)
            != actual.get(i).map(String::as_str).unwrap_or(missing)
    });
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let left = expected
                .get(line_idx)
                .map(String::as_str)
                .unwrap_or(missing);
            let right = actual.get(line_idx).map(String::as_str).unwrap_or(missing);
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line_idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line_idx + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Compare a document outline against expected lines, panicking with a
/// focused diff on mismatch.
#[track_caller]
pub fn assert_outline(actual: &[String], expected: &[&str]) {
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    if expected.as_slice() != actual {
        panic!("outline mismatch\n{}", diff_lines(&expected, actual));
    }
}

/// Counts how often the closures it hands out were called.
#[derive(Clone, Debug, Default)]
pub struct Probe {
    hits: Rc<Cell<usize>>,
}

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        self.hits.set(self.hits.get() + 1);
    }

    pub fn count(&self) -> usize {
        self.hits.get()
    }

    /// A closure that records a hit each time it runs, whatever its argument.
    pub fn callback<T: ?Sized + 'static>(&self) -> impl Fn(&T) + 'static {
        let hits = Rc::clone(&self.hits);
        move |_: &T| hits.set(hits.get() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_points_at_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.starts_with("first mismatch at line 2"));
        assert!(diff.contains(">    2  expected: b"));
    }

    #[test]
    fn probe_counts_callback_invocations() {
        let probe = Probe::new();
        let cb = probe.callback::<str>();
        cb("x");
        cb("y");
        assert_eq!(probe.count(), 2);
    }
}
