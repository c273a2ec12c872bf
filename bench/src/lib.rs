//! Benchmark utilities for Rusty ECS.
//!
//! - **Microbenchmarks**: individual state operations (create/remove entity, index queries,
//!   one component system run)
//! - **Scenario benchmarks**: whole ticks over a realistic scene
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_ecs_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_ecs_bench -- query
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod scenarios;
