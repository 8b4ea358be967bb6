use rand::Rng;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How the next vertex is picked at each step of a point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// "Point Sequence 1": any vertex, every step.
    Uniform,
    /// "Point Sequence 2": never the previously chosen vertex or either of its
    /// neighbours in vertex order. The first pick is uniform.
    AvoidNeighbours,
}

impl SelectionPolicy {
    pub fn min_vertices(self) -> usize {
        match self {
            SelectionPolicy::Uniform => 3,
            SelectionPolicy::AvoidNeighbours => 4,
        }
    }

    /// Picks a vertex index in `0..len`.
    ///
    /// For [`SelectionPolicy::AvoidNeighbours`] this adds a random offset in
    /// `2..=len - 2` to the previous index, which skips the previous vertex and
    /// both of its neighbours. Requires `len >= min_vertices()`.
    pub(crate) fn choose<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        len: usize,
        previous: Option<usize>,
    ) -> usize {
        match (self, previous) {
            (SelectionPolicy::Uniform, _) | (SelectionPolicy::AvoidNeighbours, None) => {
                rng.random_range(0..len)
            }
            (SelectionPolicy::AvoidNeighbours, Some(previous)) => {
                (previous + rng.random_range(2..=len - 2)) % len
            }
        }
    }

    /// Whether `next` may follow `previous` among `len` vertices.
    pub(crate) fn allows(self, len: usize, previous: usize, next: usize) -> bool {
        match self {
            SelectionPolicy::Uniform => true,
            SelectionPolicy::AvoidNeighbours => {
                let offset = (next + len - previous) % len;
                offset >= 2 && offset + 2 <= len
            }
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::Uniform => f.write_str("uniform"),
            SelectionPolicy::AvoidNeighbours => f.write_str("avoid-neighbours"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    /// Accepts the policy name or the sequence number (`1` or `2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "uniform" => Ok(SelectionPolicy::Uniform),
            "2" | "avoid-neighbours" => Ok(SelectionPolicy::AvoidNeighbours),
            other => Err(format!(
                "unknown sequence type '{other}' (expected 1, 2, uniform or avoid-neighbours)"
            )),
        }
    }
}
