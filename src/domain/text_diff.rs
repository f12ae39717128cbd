//! Line-based unified diff between two canonical JSON texts.
//!
//! Output follows the classic unified format: `---`/`+++` file headers,
//! `@@ -a,b +c,d @@` hunk headers with three lines of context, then
//! prefixed context/removed/added lines. The diff is empty exactly when the
//! two texts are identical.

use std::fmt;

/// Number of unchanged lines shown around each change.
const CONTEXT: usize = 3;

/// One line of unified-diff output.
///
/// Kept structured (rather than pre-rendered text) so the presentation layer
/// can color each kind; `Display` renders the plain-text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// `--- <label>`, the database side.
    FromHeader(String),
    /// `+++ <label>`, the file side.
    ToHeader(String),
    /// `@@ -a,b +c,d @@`. Ranges are 0-based half-open over the two inputs.
    Hunk {
        old: (usize, usize),
        new: (usize, usize),
    },
    Context(String),
    Removed(String),
    Added(String),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::FromHeader(label) => write!(f, "--- {}", label),
            DiffLine::ToHeader(label) => write!(f, "+++ {}", label),
            DiffLine::Hunk { old, new } => {
                write!(f, "@@ -{} +{} @@", format_range(*old), format_range(*new))
            }
            DiffLine::Context(line) => write!(f, " {}", line),
            DiffLine::Removed(line) => write!(f, "-{}", line),
            DiffLine::Added(line) => write!(f, "+{}", line),
        }
    }
}

/// Range rendering rules of the unified format: a one-line range collapses to
/// its start line, an empty range backs the start up by one.
fn format_range((start, stop): (usize, usize)) -> String {
    let length = stop - start;
    let beginning = if length == 0 { start } else { start + 1 };
    if length == 1 {
        beginning.to_string()
    } else {
        format!("{},{}", beginning, length)
    }
}

/// Render a diff back to plain text, one line per entry.
pub fn render(lines: &[DiffLine]) -> String {
    lines
        .iter()
        .map(DiffLine::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ─── Matching ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// `(tag, i1, i2, j1, j2)`: `a[i1..i2]` maps to `b[j1..j2]`.
#[derive(Debug, Clone, Copy)]
struct Opcode {
    tag: Tag,
    i1: usize,
    i2: usize,
    j1: usize,
    j2: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Keep,
    Del,
    Ins,
}

/// Longest-common-subsequence walk over the two line slices.
///
/// `table[i][j]` holds the LCS length of `a[i..]` and `b[j..]`; the forward
/// walk then prefers deletions over insertions on ties, which keeps removed
/// lines ahead of added ones inside a change run.
fn lcs_steps(a: &[&str], b: &[&str]) -> Vec<Step> {
    let n = a.len();
    let m = b.len();
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            steps.push(Step::Keep);
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            steps.push(Step::Del);
            i += 1;
        } else {
            steps.push(Step::Ins);
            j += 1;
        }
    }
    steps.extend(std::iter::repeat(Step::Del).take(n - i));
    steps.extend(std::iter::repeat(Step::Ins).take(m - j));
    steps
}

/// Coalesce per-line steps into opcodes. A maximal run of non-`Keep` steps
/// becomes one `Delete`/`Insert`/`Replace` opcode, so each change block
/// renders all its removed lines before its added lines.
fn opcodes(steps: &[Step]) -> Vec<Opcode> {
    let mut codes = Vec::new();
    let (mut i, mut j) = (0, 0);
    let mut k = 0;
    while k < steps.len() {
        if steps[k] == Step::Keep {
            let start = k;
            while k < steps.len() && steps[k] == Step::Keep {
                k += 1;
            }
            let run = k - start;
            codes.push(Opcode {
                tag: Tag::Equal,
                i1: i,
                i2: i + run,
                j1: j,
                j2: j + run,
            });
            i += run;
            j += run;
        } else {
            let mut dels = 0;
            let mut inss = 0;
            while k < steps.len() && steps[k] != Step::Keep {
                match steps[k] {
                    Step::Del => dels += 1,
                    Step::Ins => inss += 1,
                    Step::Keep => unreachable!(),
                }
                k += 1;
            }
            let tag = match (dels, inss) {
                (0, _) => Tag::Insert,
                (_, 0) => Tag::Delete,
                _ => Tag::Replace,
            };
            codes.push(Opcode {
                tag,
                i1: i,
                i2: i + dels,
                j1: j,
                j2: j + inss,
            });
            i += dels;
            j += inss;
        }
    }
    codes
}

/// Split opcodes into hunk groups, trimming leading/trailing context to
/// [`CONTEXT`] lines and breaking on equal runs longer than twice that.
fn grouped_opcodes(mut codes: Vec<Opcode>) -> Vec<Vec<Opcode>> {
    if let Some(first) = codes.first_mut() {
        if first.tag == Tag::Equal {
            first.i1 = first.i1.max(first.i2.saturating_sub(CONTEXT));
            first.j1 = first.j1.max(first.j2.saturating_sub(CONTEXT));
        }
    }
    if let Some(last) = codes.last_mut() {
        if last.tag == Tag::Equal {
            last.i2 = last.i2.min(last.i1 + CONTEXT);
            last.j2 = last.j2.min(last.j1 + CONTEXT);
        }
    }

    let mut groups = Vec::new();
    let mut group: Vec<Opcode> = Vec::new();
    for code in codes {
        if code.tag == Tag::Equal && code.i2 - code.i1 > 2 * CONTEXT {
            group.push(Opcode {
                i2: code.i2.min(code.i1 + CONTEXT),
                j2: code.j2.min(code.j1 + CONTEXT),
                ..code
            });
            groups.push(group);
            group = vec![Opcode {
                i1: code.i1.max(code.i2 - CONTEXT),
                j1: code.j1.max(code.j2 - CONTEXT),
                ..code
            }];
            continue;
        }
        group.push(code);
    }
    if !(group.is_empty() || (group.len() == 1 && group[0].tag == Tag::Equal)) {
        groups.push(group);
    }
    groups
}

// ─── Public entry point ──────────────────────────────────────────────────────

/// Unified diff of `from_text` against `to_text`.
///
/// Returns an empty vec when the texts are identical; otherwise the two file
/// headers followed by one or more hunks.
pub fn unified_diff(
    from_text: &str,
    to_text: &str,
    from_label: &str,
    to_label: &str,
) -> Vec<DiffLine> {
    if from_text == to_text {
        return Vec::new();
    }

    let a: Vec<&str> = from_text.lines().collect();
    let b: Vec<&str> = to_text.lines().collect();
    let groups = grouped_opcodes(opcodes(&lcs_steps(&a, &b)));
    if groups.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    out.push(DiffLine::FromHeader(from_label.to_string()));
    out.push(DiffLine::ToHeader(to_label.to_string()));

    for group in groups {
        let first = group[0];
        let last = group[group.len() - 1];
        out.push(DiffLine::Hunk {
            old: (first.i1, last.i2),
            new: (first.j1, last.j2),
        });
        for code in group {
            match code.tag {
                Tag::Equal => {
                    for line in &a[code.i1..code.i2] {
                        out.push(DiffLine::Context(line.to_string()));
                    }
                }
                Tag::Delete | Tag::Insert | Tag::Replace => {
                    for line in &a[code.i1..code.i2] {
                        out.push(DiffLine::Removed(line.to_string()));
                    }
                    for line in &b[code.j1..code.j2] {
                        out.push(DiffLine::Added(line.to_string()));
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(a: &str, b: &str) -> Vec<DiffLine> {
        unified_diff(a, b, "database", "file")
    }

    #[test]
    fn identical_texts_produce_no_diff() {
        assert!(diff("{\n    \"a\": 1\n}", "{\n    \"a\": 1\n}").is_empty());
    }

    #[test]
    fn single_line_replacement() {
        let lines = diff("1", "2");
        let rendered = render(&lines);
        assert_eq!(
            rendered,
            "--- database\n+++ file\n@@ -1 +1 @@\n-1\n+2"
        );
    }

    #[test]
    fn headers_carry_the_given_labels() {
        let lines = diff("a", "b");
        assert_eq!(lines[0], DiffLine::FromHeader("database".into()));
        assert_eq!(lines[1], DiffLine::ToHeader("file".into()));
    }

    #[test]
    fn changed_leaf_appears_with_context() {
        let from = "{\n    \"a\": 1,\n    \"b\": 2,\n    \"c\": 3\n}";
        let to = "{\n    \"a\": 1,\n    \"b\": 5,\n    \"c\": 3\n}";
        let rendered = render(&diff(from, to));
        let expected = [
            "--- database",
            "+++ file",
            "@@ -1,5 +1,5 @@",
            " {",
            "     \"a\": 1,",
            "-    \"b\": 2,",
            "+    \"b\": 5,",
            "     \"c\": 3",
            " }",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn added_key_shows_one_added_line_per_leaf() {
        let from = "{\n    \"a\": 1\n}";
        let to = "{\n    \"a\": 1,\n    \"b\": 2\n}";
        let lines = diff(from, to);
        assert!(lines
            .iter()
            .any(|l| matches!(l, DiffLine::Added(s) if s.contains("\"b\": 2"))));
        assert!(lines
            .iter()
            .any(|l| matches!(l, DiffLine::Removed(s) if s.contains("\"a\": 1"))));
    }

    #[test]
    fn distant_changes_split_into_two_hunks() {
        let mut from_lines = vec!["begin".to_string()];
        let mut to_lines = vec!["begin".to_string()];
        from_lines.push("old-head".into());
        to_lines.push("new-head".into());
        for n in 0..10 {
            from_lines.push(format!("same-{}", n));
            to_lines.push(format!("same-{}", n));
        }
        from_lines.push("old-tail".into());
        to_lines.push("new-tail".into());

        let lines = diff(&from_lines.join("\n"), &to_lines.join("\n"));
        let hunks = lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Hunk { .. }))
            .count();
        assert_eq!(hunks, 2);
    }

    #[test]
    fn nearby_changes_share_one_hunk() {
        let from = "a\nb\nc\nd\ne";
        let to = "a\nB\nc\nD\ne";
        let lines = diff(from, to);
        let hunks = lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Hunk { .. }))
            .count();
        assert_eq!(hunks, 1);
    }

    #[test]
    fn pure_insertion_between_lines() {
        let rendered = render(&diff("line1\nline2", "line1\nnew\nline2"));
        assert_eq!(
            rendered,
            "--- database\n+++ file\n@@ -1,2 +1,3 @@\n line1\n+new\n line2"
        );
    }

    #[test]
    fn replacement_orders_removed_before_added() {
        let rendered = render(&diff("[]", "[\n    1\n]"));
        assert_eq!(
            rendered,
            "--- database\n+++ file\n@@ -1 +1,3 @@\n-[]\n+[\n+    1\n+]"
        );
    }

    #[test]
    fn hunk_range_rendering_follows_unified_rules() {
        let one = DiffLine::Hunk {
            old: (0, 1),
            new: (0, 1),
        };
        assert_eq!(one.to_string(), "@@ -1 +1 @@");

        let many = DiffLine::Hunk {
            old: (4, 9),
            new: (4, 10),
        };
        assert_eq!(many.to_string(), "@@ -5,5 +5,6 @@");

        let empty_old = DiffLine::Hunk {
            old: (0, 0),
            new: (0, 3),
        };
        assert_eq!(empty_old.to_string(), "@@ -0,0 +1,3 @@");
    }
}
