//! Execution-model selection for the kernels that can use several threads.

/// Parallelism strategy passed to parallel-capable kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// Run sequentially on the calling thread.
    #[default]
    None,
    /// Run on the current rayon thread pool, split into at most this many
    /// concurrent parts.
    ///
    /// `0` means `rayon::current_num_threads()`.
    Rayon(usize),
}

impl Parallelism {
    /// Number of parts a kernel should split its work into.
    pub fn degree(self) -> usize {
        match self {
            Parallelism::None => 1,
            Parallelism::Rayon(0) => rayon::current_num_threads(),
            Parallelism::Rayon(n) => n,
        }
    }
}

/// Run `op_a` and `op_b`, potentially in parallel, and return both results.
///
/// Each side receives the parallelism it may use for nested work: half of
/// the available threads under [`Parallelism::Rayon`].
pub fn join<RA, RB>(
    op_a: impl FnOnce(Parallelism) -> RA + Send,
    op_b: impl FnOnce(Parallelism) -> RB + Send,
    parallelism: Parallelism,
) -> (RA, RB)
where
    RA: Send,
    RB: Send,
{
    match parallelism.degree() {
        0 | 1 => (op_a(Parallelism::None), op_b(Parallelism::None)),
        n => {
            let half = Parallelism::Rayon(n - n / 2);
            rayon::join(|| op_a(half), || op_b(half))
        }
    }
}
