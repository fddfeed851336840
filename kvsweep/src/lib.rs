#![deny(rust_2018_idioms)]

// This module contains the `args!` macro and value formatting helpers.
#[macro_use]
pub mod util;

// This module contains the definition of `SweepError`.
pub mod error;

// This module contains the definition of `ParameterGrid` and `SweepPoint`.
pub mod grid;

// This module contains the definition of `SweepConfig` and `InvocationSpec`.
pub mod config;

// This module contains the definition of `Execution` and the helpers to run
// external commands.
pub mod exec;

// This module contains the length-checked parser of benchmark output.
pub mod output;

// This module contains the definition of `ResultRow` and `ResultTable`.
pub mod table;

// This module contains the build phase.
pub mod setup;

// This module runs a single sweep point.
pub mod bench;

// This module contains the definition of `Sweep`, the runner driving all the
// phases.
pub mod sweep;

// This module contains the progress bar that tracing logs are written through.
pub mod progress;

// Re-export the types needed to drive a sweep.
pub use config::SweepConfig;
pub use error::SweepError;
pub use sweep::Sweep;
