//! Test support for BL parsing
//!
//! - [`assertions`]: fluent checks over programs, blocks and statements
//!   (`assert_program(&program).name("p").body(|b| { b.calls(&["move"]); })`).
//! - [`samples`]: numbered sample sources under `samples/`, valid and invalid.
//!
//! Prefer the sample corpus over inline source strings when a test is about a realistic
//! program; inline strings are fine for single constructs.

pub mod assertions;
pub mod samples;

pub use assertions::{
    assert_block, assert_program, assert_statement, BlockAssertion, ProgramAssertion,
    StatementAssertion,
};
pub use samples::{SampleKind, SampleLoader, Samples};
