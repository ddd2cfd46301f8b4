//! Ordered-sequence diffing for list updates.
//!
//! [`diff`] matches items by key along a longest common subsequence and
//! reports the removals, insertions and in-place changes that turn the old
//! sequence into the new one. The renderer replays the script to re-draw
//! only the rows that moved or changed.

use std::ops::Range;

use serde::Serialize;

// ==============================================================================
// Edit Script
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Remove the element at `index` of the sequence being edited.
    Remove { index: usize },
    /// Insert `new[index]` at `index`.
    Insert { index: usize },
    /// Replace the element at `index` with `new[index]`. Keys match.
    Change { index: usize },
}

/// Operations in application order: removals (descending), then
/// insertions (ascending), then changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditScript {
    ops: Vec<EditOp>,
}

impl EditScript {
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// `true` when a new element lands at the head of the list.
    pub fn inserts_at_top(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, EditOp::Insert { index: 0 }))
    }

    /// Replay the script against `old`, taking inserted and changed
    /// elements from `new`. `None` when an operation's index does not fit,
    /// i.e. the script was computed for different sequences.
    pub fn apply<T: Clone>(&self, old: &[T], new: &[T]) -> Option<Vec<T>> {
        let mut out = old.to_vec();
        for op in &self.ops {
            match *op {
                EditOp::Remove { index } => {
                    if index >= out.len() {
                        return None;
                    }
                    out.remove(index);
                }
                EditOp::Insert { index } => {
                    if index > out.len() {
                        return None;
                    }
                    out.insert(index, new.get(index)?.clone());
                }
                EditOp::Change { index } => {
                    *out.get_mut(index)? = new.get(index)?.clone();
                }
            }
        }
        Some(out)
    }
}

// ==============================================================================
// Diff
// ==============================================================================

/// Compute the edit script turning `old` into `new`.
///
/// Elements are matched by `key`; matched pairs for which `same_content`
/// returns `false` produce a `Change`. The script is minimal in the number
/// of insertions and removals. Matching uses Myers' divide-and-conquer
/// variant, so memory stays linear in the combined length.
pub fn diff<T, K, FK, FC>(old: &[T], new: &[T], key: FK, same_content: FC) -> EditScript
where
    K: PartialEq,
    FK: Fn(&T) -> K,
    FC: Fn(&T, &T) -> bool,
{
    let old_keys: Vec<K> = old.iter().map(&key).collect();
    let new_keys: Vec<K> = new.iter().map(&key).collect();
    let matches = common_subsequence(&old_keys, &new_keys);

    let mut kept_old = vec![false; old.len()];
    let mut kept_new = vec![false; new.len()];
    for &(o, n) in &matches {
        kept_old[o] = true;
        kept_new[n] = true;
    }

    let mut ops = Vec::new();
    for index in (0..old.len()).rev() {
        if !kept_old[index] {
            ops.push(EditOp::Remove { index });
        }
    }
    for index in 0..new.len() {
        if !kept_new[index] {
            ops.push(EditOp::Insert { index });
        }
    }
    for &(o, n) in &matches {
        if !same_content(&old[o], &new[n]) {
            ops.push(EditOp::Change { index: n });
        }
    }

    EditScript { ops }
}

// ==============================================================================
// Myers Matching
// ==============================================================================

/// Furthest-reaching x per diagonal `k`, indexed from `-max_d` to `max_d`.
struct Frontier {
    offset: isize,
    x: Vec<usize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            x: vec![0; 2 * max_d],
        }
    }
}

impl std::ops::Index<isize> for Frontier {
    type Output = usize;
    fn index(&self, k: isize) -> &usize {
        &self.x[(k + self.offset) as usize]
    }
}

impl std::ops::IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.x[(k + self.offset) as usize]
    }
}

fn max_d(old_len: usize, new_len: usize) -> usize {
    (old_len + new_len + 1) / 2 + 1
}

/// Index pairs `(old, new)` of a longest common subsequence, ascending.
fn common_subsequence<K: PartialEq>(old: &[K], new: &[K]) -> Vec<(usize, usize)> {
    let max_d = max_d(old.len(), new.len());
    let mut forward = Frontier::new(max_d);
    let mut backward = Frontier::new(max_d);
    let mut pairs = Vec::new();
    conquer(
        old,
        0..old.len(),
        new,
        0..new.len(),
        &mut forward,
        &mut backward,
        &mut pairs,
    );
    pairs
}

fn common_prefix_len<K: PartialEq>(old: &[K], new: &[K]) -> usize {
    old.iter().zip(new).take_while(|(a, b)| a == b).count()
}

fn common_suffix_len<K: PartialEq>(old: &[K], new: &[K]) -> usize {
    old.iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

fn conquer<K: PartialEq>(
    old: &[K],
    mut old_range: Range<usize>,
    new: &[K],
    mut new_range: Range<usize>,
    forward: &mut Frontier,
    backward: &mut Frontier,
    pairs: &mut Vec<(usize, usize)>,
) {
    let prefix = common_prefix_len(&old[old_range.clone()], &new[new_range.clone()]);
    pairs.extend((0..prefix).map(|i| (old_range.start + i, new_range.start + i)));
    old_range.start += prefix;
    new_range.start += prefix;

    let suffix = common_suffix_len(&old[old_range.clone()], &new[new_range.clone()]);
    old_range.end -= suffix;
    new_range.end -= suffix;

    if !old_range.is_empty() && !new_range.is_empty() {
        if let Some((x, y)) = middle_snake(
            old,
            old_range.clone(),
            new,
            new_range.clone(),
            forward,
            backward,
        ) {
            conquer(
                old,
                old_range.start..x,
                new,
                new_range.start..y,
                forward,
                backward,
                pairs,
            );
            conquer(
                old,
                x..old_range.end,
                new,
                y..new_range.end,
                forward,
                backward,
                pairs,
            );
        }
    }

    pairs.extend((0..suffix).map(|i| (old_range.end + i, new_range.end + i)));
}

/// A point on a shortest edit path through the middle of the edit graph,
/// found by searching forward from the start and backward from the end
/// until the two frontiers overlap.
fn middle_snake<K: PartialEq>(
    old: &[K],
    old_range: Range<usize>,
    new: &[K],
    new_range: Range<usize>,
    forward: &mut Frontier,
    backward: &mut Frontier,
) -> Option<(usize, usize)> {
    let n = old_range.len();
    let m = new_range.len();
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;
    forward[1] = 0;
    backward[1] = 0;

    for d in 0..max_d(n, m) as isize {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                forward[k + 1]
            } else {
                forward[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix_len(
                    &old[old_range.start + x..old_range.end],
                    &new[new_range.start + y..new_range.end],
                );
            }
            forward[k] = x;

            if odd && (k - delta).abs() <= d - 1 && forward[k] + backward[-(k - delta)] >= n {
                return Some((old_range.start + x0, new_range.start + y0));
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                backward[k + 1]
            } else {
                backward[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let advance = common_suffix_len(
                    &old[old_range.start..old_range.start + n - x],
                    &new[new_range.start..new_range.start + m - y],
                );
                x += advance;
                y += advance;
            }
            backward[k] = x;

            if !odd && (k - delta).abs() <= d && backward[k] + forward[-(k - delta)] >= n {
                return Some((old_range.start + n - x, new_range.start + m - y));
            }
        }
    }

    None
}
