// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the runnable demos in `examples/`.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `debug` for the
/// cellgrid crates.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("cellgrid_index=debug,cellgrid_router=debug,cellgrid_widgets=debug")
    });
    // A second call (or a subscriber installed by the host) is not an error for a demo.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
