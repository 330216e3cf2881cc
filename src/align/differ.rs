use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffTag, capture_diff_slices};

/// A run of the word-level edit script, counted in words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "words", rename_all = "snake_case")]
pub enum DiffRun {
    /// Words present on both sides
    Unchanged(usize),
    /// Words only on the new side
    Added(usize),
    /// Words only on the old side
    Removed(usize),
}

impl DiffRun {
    pub fn len(&self) -> usize {
        match *self {
            DiffRun::Unchanged(n) | DiffRun::Added(n) | DiffRun::Removed(n) => n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn same_kind(&self, other: &DiffRun) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn with_len(&self, n: usize) -> DiffRun {
        match self {
            DiffRun::Unchanged(_) => DiffRun::Unchanged(n),
            DiffRun::Added(_) => DiffRun::Added(n),
            DiffRun::Removed(_) => DiffRun::Removed(n),
        }
    }
}

/// Word-level edit script between two sequences of matching keys.
///
/// Replacements come out as a `Removed` run followed by an `Added` run, and
/// neighbouring runs of the same kind are merged.
pub fn diff_words<A, B>(old: &[A], new: &[B]) -> Vec<DiffRun>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let old: Vec<&str> = old.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = new.iter().map(AsRef::as_ref).collect();

    let mut runs = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => push_run(&mut runs, DiffRun::Unchanged(old_range.len())),
            DiffTag::Delete => push_run(&mut runs, DiffRun::Removed(old_range.len())),
            DiffTag::Insert => push_run(&mut runs, DiffRun::Added(new_range.len())),
            DiffTag::Replace => {
                push_run(&mut runs, DiffRun::Removed(old_range.len()));
                push_run(&mut runs, DiffRun::Added(new_range.len()));
            }
        }
    }

    runs
}

fn push_run(runs: &mut Vec<DiffRun>, run: DiffRun) {
    if run.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.same_kind(&run) => *last = last.with_len(last.len() + run.len()),
        _ => runs.push(run),
    }
}

/// One word-level step through an edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Old word `old` corresponds to new word `new`
    Matched { old: usize, new: usize },
    /// New word with no old counterpart
    Inserted { new: usize },
    /// Old word with no new counterpart
    Deleted { old: usize },
}

/// Walks an edit script word by word, tracking both sides' indices in lockstep
pub struct Walk<'a> {
    runs: std::slice::Iter<'a, DiffRun>,
    current: Option<DiffRun>,
    remaining: usize,
    old: usize,
    new: usize,
}

impl<'a> Walk<'a> {
    pub fn new(runs: &'a [DiffRun]) -> Self {
        Self {
            runs: runs.iter(),
            current: None,
            remaining: 0,
            old: 0,
            new: 0,
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        while self.remaining == 0 {
            let run = *self.runs.next()?;
            self.remaining = run.len();
            self.current = Some(run);
        }
        self.remaining -= 1;

        let step = match self.current? {
            DiffRun::Unchanged(_) => {
                let step = Step::Matched {
                    old: self.old,
                    new: self.new,
                };
                self.old += 1;
                self.new += 1;
                step
            }
            DiffRun::Added(_) => {
                let step = Step::Inserted { new: self.new };
                self.new += 1;
                step
            }
            DiffRun::Removed(_) => {
                let step = Step::Deleted { old: self.old };
                self.old += 1;
                step
            }
        };

        Some(step)
    }
}
