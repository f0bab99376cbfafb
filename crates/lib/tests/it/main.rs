/*! Integration tests for node-decorators.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - store: Tests for the in-memory workspace, fixture import and value conversions
 * - wrapper: Tests for each node decorator and for decorators composed over one another
 * - sql2: Tests for complete SQL2 statements built from conditions, junctions and joins
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("node_decorators=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod sql2;
mod store;
mod wrapper;
