//! Common utilities for tests

#![allow(dead_code)]

use rstest::fixture;
use sfs::{FileSystem, DEFAULT_BLOCK_SIZE};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

/// Installs a log subscriber once per test binary; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::DEBUG.into());

    let format = fmt::format()
        .with_level(true)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::fmt()
        .with_ansi(false)
        .event_format(format)
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A volume whose block `i` is filled with the byte `i`, so untouched blocks are easy to spot.
pub fn raw_disk(blocks: usize, block_size: usize) -> Vec<u8> {
    (0..blocks)
        .flat_map(|i| std::iter::repeat_n(i as u8, block_size))
        .collect()
}

/// A freshly formatted 100-block volume with the reference layout.
#[fixture]
pub fn fs() -> FileSystem<Vec<u8>> {
    init();
    let mut fs = FileSystem::new(raw_disk(100, DEFAULT_BLOCK_SIZE), DEFAULT_BLOCK_SIZE).unwrap();
    fs.format().unwrap();
    fs
}
