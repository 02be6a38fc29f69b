// ─── Join primitives ───
// The run has two synchronization points with opposite failure policies:
//   fail_fast — startup: both halves must succeed, the first error wins.
//   wait_all  — downloads: every unit reaches a terminal state, nothing is cancelled.

use std::future::Future;

use futures_util::future::join_all;

/// Poll both futures concurrently and stop at the first error.
pub async fn fail_fast<A, B, E>(
    a: impl Future<Output = Result<A, E>>,
    b: impl Future<Output = Result<B, E>>,
) -> Result<(A, B), E> {
    tokio::try_join!(a, b)
}

/// Run every future to completion and collect the outputs in input order.
///
/// Failures are ordinary outputs here; callers encode them in `T`.
pub async fn wait_all<I>(futures: I) -> Vec<<I::Item as Future>::Output>
where
    I: IntoIterator,
    I::Item: Future,
{
    join_all(futures).await
}
