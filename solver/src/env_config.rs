//! Shared environment configuration for the explodice binaries.
//!
//! Consolidates `RAYON_NUM_THREADS` and `EXPLODICE_PORT` reads.

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 8).
/// Builds the rayon global thread pool, tolerating an already-initialized
/// pool. Returns the thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok(); // May fail if already initialized
    num_threads
}

/// Read `EXPLODICE_PORT` (default 9000).
pub fn server_port() -> u16 {
    std::env::var("EXPLODICE_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9000)
}
