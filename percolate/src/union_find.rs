//! Fixed-capacity disjoint-set forest over vertex ids.

/// Disjoint-set forest over `[0, capacity)`. Slots start out unset; `make_set`
/// turns a slot into a singleton set, after which it can be merged via `union`
/// or grown via `extend_set_by_rep`.
///
/// Path compression is iterative (two passes over the ancestor chain) so that
/// chains with millions of links never recurse.
pub struct UnionFind {
    parent: Vec<i64>,
    size: Vec<u32>,
    num_sets: usize,
}

impl UnionFind {
    /// Creates a forest with `capacity` unset slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            parent: vec![-1; capacity],
            size: vec![0; capacity],
            num_sets: 0,
        }
    }

    /// Number of slots this forest was constructed for.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.parent.len()
    }

    /// Number of live (non-empty) sets.
    #[must_use]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Turns `id` into a new singleton set.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already part of a set.
    pub fn make_set(&mut self, id: usize) {
        assert!(
            self.parent[id] < 0,
            "make_set called on an already-set vertex {id}"
        );
        self.parent[id] = id as i64;
        self.size[id] = 1;
        self.num_sets += 1;
    }

    /// Returns the representative of the set containing `id`, or `-1` if `id`
    /// is unset. Applies iterative path compression.
    pub fn find(&mut self, id: usize) -> i64 {
        if self.parent[id] < 0 {
            return -1;
        }

        let mut root = id;
        while self.parent[root] as usize != root {
            root = self.parent[root] as usize;
        }

        let mut cur = id;
        while self.parent[cur] as usize != root {
            let next = self.parent[cur] as usize;
            self.parent[cur] = root as i64;
            cur = next;
        }

        root as i64
    }

    /// Attaches the previously-unset `id` as a child of the set represented
    /// by `rep`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already set, or if `rep` is not currently a
    /// representative.
    pub fn extend_set_by_rep(&mut self, rep: usize, id: usize) {
        assert!(self.parent[id] < 0, "vertex {id} is already set");
        assert!(
            self.parent[rep] as usize == rep,
            "{rep} is not a set representative"
        );
        self.parent[id] = rep as i64;
        self.size[rep] += 1;
    }

    /// Merges the sets containing `a` and `b`, attaching the smaller set
    /// under the larger (ties keep the lower rep id as survivor). Returns the
    /// surviving representative. If `a` and `b` are already in the same set,
    /// returns that set's representative without modifying anything.
    ///
    /// # Panics
    ///
    /// Panics if either `a` or `b` is unset.
    pub fn union(&mut self, a: usize, b: usize) -> i64 {
        let ra = self.find(a);
        let rb = self.find(b);
        assert!(ra >= 0 && rb >= 0, "union requires both vertices to be set");

        if ra == rb {
            return ra;
        }

        let (ra, rb) = (ra as usize, rb as usize);
        let (winner, loser) = match self.size[ra].cmp(&self.size[rb]) {
            std::cmp::Ordering::Less => (rb, ra),
            std::cmp::Ordering::Greater => (ra, rb),
            std::cmp::Ordering::Equal => {
                if ra <= rb {
                    (ra, rb)
                } else {
                    (rb, ra)
                }
            }
        };

        self.parent[loser] = winner as i64;
        self.size[winner] += self.size[loser];
        self.num_sets -= 1;

        winner as i64
    }
}

#[cfg(test)]
mod tests {
    use super::UnionFind;

    #[test]
    fn singletons_are_their_own_representative() {
        let mut uf = UnionFind::new(4);
        uf.make_set(0);
        uf.make_set(2);
        assert_eq!(uf.find(0), 0);
        assert_eq!(uf.find(2), 2);
        assert_eq!(uf.find(1), -1);
        assert_eq!(uf.num_sets(), 2);
    }

    #[test]
    fn extend_grows_without_changing_rep() {
        let mut uf = UnionFind::new(4);
        uf.make_set(0);
        uf.extend_set_by_rep(0, 1);
        assert_eq!(uf.find(1), 0);
        assert_eq!(uf.num_sets(), 1);
    }

    #[test]
    fn union_by_size_picks_larger_set() {
        let mut uf = UnionFind::new(5);
        uf.make_set(0);
        uf.make_set(1);
        uf.extend_set_by_rep(0, 2);
        uf.extend_set_by_rep(0, 3);
        // {0,2,3} has size 3, {1} has size 1.
        let rep = uf.union(1, 0);
        assert_eq!(rep, 0);
        assert_eq!(uf.find(1), 0);
        assert_eq!(uf.num_sets(), 1);
    }

    #[test]
    fn union_by_size_tie_keeps_lower_rep() {
        let mut uf = UnionFind::new(4);
        uf.make_set(2);
        uf.make_set(1);
        // Both singletons (size 1 each); union(2, 1) should keep rep 1.
        let rep = uf.union(2, 1);
        assert_eq!(rep, 1);
    }

    #[test]
    fn path_compression_handles_long_chains() {
        let n = 200_000;
        let mut uf = UnionFind::new(n);
        uf.make_set(0);
        for i in 1..n {
            uf.extend_set_by_rep(0, i);
        }
        assert_eq!(uf.find(n - 1), 0);
        assert_eq!(uf.num_sets(), 1);
    }

    #[test]
    #[should_panic(expected = "already-set")]
    fn make_set_twice_panics() {
        let mut uf = UnionFind::new(2);
        uf.make_set(0);
        uf.make_set(0);
    }
}
