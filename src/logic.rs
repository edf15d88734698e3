use itertools::Itertools;
use varisat::{Lit, Var};

/// Clauses stating that an odd number of `vars` are true iff `parity`.
///
/// One clause per forbidden assignment, so keep `vars` short; a press touches at most four tiles.
pub(crate) fn xor_equals(vars: &[Var], parity: bool) -> Vec<Vec<Lit>> {
    vars.iter()
        .copied()
        .powerset()
        // the set of vars true under an assignment of the wrong parity
        .filter(|true_set| (true_set.len() % 2 == 1) != parity)
        // rule it out: at least one var differs from that assignment
        .map(|true_set| vars.iter()
            .map(|var| var.lit(!true_set.contains(var)))
            .collect_vec())
        .collect_vec()
}

/// Clauses stating that at most `k` of `vars` are true, as a sequential counter.
///
/// Register `s(i, j)` holds "at least `j + 1` of `vars[..=i]` are true"; registers take the
/// variable indices starting at `first_aux`, `(vars.len() - 1) * k` of them.
pub(crate) fn at_most(vars: &[Var], k: usize, first_aux: usize) -> Vec<Vec<Lit>> {
    let n = vars.len();
    if k >= n {
        return Vec::new();
    }
    if k == 0 {
        return vars.iter().map(|var| vec![var.negative()]).collect_vec();
    }

    let s = |i: usize, j: usize| Var::from_index(first_aux + i * k + j);
    let mut clauses = Vec::with_capacity(2 * n * k + n);

    clauses.push(vec![vars[0].negative(), s(0, 0).positive()]);
    clauses.extend((1..k).map(|j| vec![s(0, j).negative()]));

    for i in 1..n - 1 {
        clauses.push(vec![vars[i].negative(), s(i, 0).positive()]);
        clauses.push(vec![s(i - 1, 0).negative(), s(i, 0).positive()]);
        for j in 1..k {
            clauses.push(vec![vars[i].negative(), s(i - 1, j - 1).negative(), s(i, j).positive()]);
            clauses.push(vec![s(i - 1, j).negative(), s(i, j).positive()]);
        }
        // counter already full, so this var must be false
        clauses.push(vec![vars[i].negative(), s(i - 1, k - 1).negative()]);
    }

    clauses.push(vec![vars[n - 1].negative(), s(n - 2, k - 1).negative()]);
    clauses
}
