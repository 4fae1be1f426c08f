//! Edit-script engine
//!
//! Computes the grouped, canonically ordered operations that turn one string
//! into another. The search is a single forward sweep over the target: each
//! target character either matches the next source character, consumes a
//! skipped source run as a deletion, replaces the next source character, or
//! (once the source is exhausted) is inserted at the end. This is not a
//! minimum edit distance: insertions never happen in the middle of the string.

use crate::model::Operation;

use super::edit_script::{EditScript, EditStep};

/// Operation found by the sweep, positioned in source coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Delete { start: usize, run: Vec<char> },
    Substitute { pos: usize, from: char, to: char },
    Insert { run: Vec<char> },
}

/// Compute the edit script converting `source` into `target`
///
/// Total and deterministic: any pair of strings (including empty ones) gives
/// a script, and identical inputs always give the identical script.
///
/// Ordering of the result: deletions and substitutions alternate first
/// (paired oldest first), then leftover deletions, then leftover
/// substitutions, then insertions.
///
/// # Example
///
/// ```
/// use evotree_core::model::Operation;
/// use evotree_core::script::compute_script;
///
/// let script = compute_script("abc", "axc");
/// assert_eq!(
///     script.to_operations(),
///     vec![Operation::Substitute { from: 'b', to: 'x' }]
/// );
/// ```
pub fn compute_script(source: &str, target: &str) -> EditScript {
    let src: Vec<char> = source.chars().collect();
    let tgt: Vec<char> = target.chars().collect();

    let pending = merge_runs(sweep(&src, &tgt));
    let script = anchor(canonical_order(pending), src.len());

    tracing::debug!(
        from = source,
        to = target,
        script_len = script.len(),
        "computed edit script"
    );
    script
}

fn sweep(src: &[char], tgt: &[char]) -> Vec<Pending> {
    let mut ops = Vec::new();
    let mut i = 0;

    for &ch in tgt {
        if src.get(i) == Some(&ch) {
            i += 1;
            continue;
        }

        // src[i] != ch here, so a hit is always strictly ahead of i
        let ahead = src[i..].iter().position(|&c| c == ch);
        match ahead {
            Some(skip) => {
                ops.push(Pending::Delete {
                    start: i,
                    run: src[i..i + skip].to_vec(),
                });
                i += skip + 1;
            }
            None if i < src.len() => {
                ops.push(Pending::Substitute {
                    pos: i,
                    from: src[i],
                    to: ch,
                });
                i += 1;
            }
            None => ops.push(Pending::Insert { run: vec![ch] }),
        }
    }

    if i < src.len() {
        ops.push(Pending::Delete {
            start: i,
            run: src[i..].to_vec(),
        });
    }

    ops
}

/// Merge contiguous runs of the same kind (sweep order equals position order)
fn merge_runs(ops: Vec<Pending>) -> Vec<Pending> {
    let mut merged: Vec<Pending> = Vec::with_capacity(ops.len());

    for op in ops {
        if let Some(last) = merged.last_mut() {
            if absorb(last, &op) {
                continue;
            }
        }
        merged.push(op);
    }

    merged
}

fn absorb(last: &mut Pending, op: &Pending) -> bool {
    match (last, op) {
        (Pending::Delete { start, run }, Pending::Delete { start: next, run: more })
            if *start + run.len() == *next =>
        {
            run.extend_from_slice(more);
            true
        }
        (Pending::Insert { run }, Pending::Insert { run: more }) => {
            run.extend_from_slice(more);
            true
        }
        _ => false,
    }
}

fn canonical_order(ops: Vec<Pending>) -> Vec<Pending> {
    let mut dels = Vec::new();
    let mut subs = Vec::new();
    let mut adds = Vec::new();

    for op in ops {
        match op {
            Pending::Delete { .. } => dels.push(op),
            Pending::Substitute { .. } => subs.push(op),
            Pending::Insert { .. } => adds.push(op),
        }
    }

    let pairs = dels.len().min(subs.len());
    let mut dels = dels.into_iter();
    let mut subs = subs.into_iter();
    let mut ordered = Vec::with_capacity(pairs * 2 + adds.len());

    for _ in 0..pairs {
        ordered.extend(dels.next());
        ordered.extend(subs.next());
    }
    ordered.extend(dels);
    ordered.extend(subs);
    ordered.extend(adds);

    ordered
}

/// Convert source positions into anchors valid at the moment each step runs
fn anchor(ops: Vec<Pending>, source_len: usize) -> EditScript {
    // (start, len) of deletions already applied, in source coordinates
    let mut removed: Vec<(usize, usize)> = Vec::new();
    let mut len = source_len;
    let mut steps = Vec::with_capacity(ops.len());

    let shift = |removed: &[(usize, usize)], pos: usize| -> usize {
        removed
            .iter()
            .filter(|(start, _)| *start < pos)
            .map(|(_, n)| n)
            .sum()
    };

    for op in ops {
        let step = match op {
            Pending::Delete { start, run } => {
                let at = start - shift(&removed, start);
                removed.push((start, run.len()));
                len -= run.len();
                EditStep::new(
                    Operation::Delete {
                        text: run.into_iter().collect(),
                    },
                    at,
                )
            }
            Pending::Substitute { pos, from, to } => {
                EditStep::new(Operation::Substitute { from, to }, pos - shift(&removed, pos))
            }
            Pending::Insert { run } => {
                let at = len;
                len += run.len();
                EditStep::new(
                    Operation::Insert {
                        text: run.into_iter().collect(),
                    },
                    at,
                )
            }
        };
        steps.push(step);
    }

    EditScript::new(steps)
}
