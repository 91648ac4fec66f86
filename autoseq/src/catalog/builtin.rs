//! Built-in recurrences

use super::{RecurrencePlugin, Term};
use crate::context::Context;
use crate::seq::AutoSeq;

type Seq = AutoSeq<'static, Term>;

fn fibonacci() -> Seq {
    Seq::from_context(|c| c[c.n() - 1] + c[c.n() - 2], [0, 1])
}

fn lucas() -> Seq {
    Seq::from_context(|c| c[c.n() - 1] + c[c.n() - 2], [2, 1])
}

fn tribonacci() -> Seq {
    Seq::from_context(|c| c[c.n() - 1] + c[c.n() - 2] + c[c.n() - 3], [0, 0, 1])
}

fn pell() -> Seq {
    Seq::from_context(|c| 2 * c[c.n() - 1] + c[c.n() - 2], [0, 1])
}

fn jacobsthal() -> Seq {
    Seq::from_context(|c| c[c.n() - 1] + 2 * c[c.n() - 2], [0, 1])
}

fn padovan() -> Seq {
    Seq::from_context(|c| c[c.n() - 2] + c[c.n() - 3], [1, 1, 1])
}

fn factorial() -> Seq {
    Seq::from_context(|c: Context<'_, Term>| c.n() as Term * c.last(), [1])
}

/// C(n) = sum of C(i) * C(n - 1 - i) over the whole history
fn catalan() -> Seq {
    Seq::from_raw(
        |n, history: &[Term]| (0..n).map(|i| history[i] * history[n - 1 - i]).sum(),
        [1],
    )
}

/// Closed form, so the history is ignored
fn triangular() -> Seq {
    Seq::from_raw(
        |n, _| {
            let n = n as Term;
            n * (n + 1) / 2
        },
        [],
    )
}

/// S(n) = S(n - 1) + F(n), reading a companion Fibonacci sequence it owns
fn fibonacci_sum() -> Seq {
    let fib = fibonacci();
    Seq::from_context(move |c: Context<'_, Term>| c.last() + fib.get(c.n()), [0])
}

inventory::submit! {
    RecurrencePlugin {
        name: "fibonacci",
        description: "Fibonacci numbers, F(n) = F(n-1) + F(n-2), F(0) = 0, F(1) = 1",
        limit: 186,
        tags: &["classic", "linear"],
        build: fibonacci,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "lucas",
        description: "Lucas numbers, L(n) = L(n-1) + L(n-2), L(0) = 2, L(1) = 1",
        limit: 184,
        tags: &["classic", "linear"],
        build: lucas,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "tribonacci",
        description: "Tribonacci numbers, T(n) = T(n-1) + T(n-2) + T(n-3)",
        limit: 148,
        tags: &["linear"],
        build: tribonacci,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "pell",
        description: "Pell numbers, P(n) = 2P(n-1) + P(n-2)",
        limit: 101,
        tags: &["linear"],
        build: pell,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "jacobsthal",
        description: "Jacobsthal numbers, J(n) = J(n-1) + 2J(n-2)",
        limit: 129,
        tags: &["linear"],
        build: jacobsthal,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "padovan",
        description: "Padovan sequence, P(n) = P(n-2) + P(n-3), P(0) = P(1) = P(2) = 1",
        limit: 316,
        tags: &["linear"],
        build: padovan,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "factorial",
        description: "Factorials, n! = n * (n-1)!",
        limit: 34,
        tags: &["classic"],
        build: factorial,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "catalan",
        description: "Catalan numbers, C(n) = sum C(i) C(n-1-i)",
        limit: 69,
        tags: &["classic", "convolution"],
        build: catalan,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "triangular",
        description: "Triangular numbers, n(n+1)/2",
        limit: u32::MAX as usize,
        tags: &["polynomial"],
        build: triangular,
    }
}

inventory::submit! {
    RecurrencePlugin {
        name: "fibonacci-sum",
        description: "Running sums of Fibonacci numbers, S(n) = S(n-1) + F(n)",
        limit: 184,
        tags: &["dependent", "linear"],
        build: fibonacci_sum,
    }
}
