//! Shared helpers for sqitch-runner integration tests
//!
//! Tests run the real binary against a fake `sqitch` shell script placed first on
//! `PATH`, so no database or sqitch installation is needed.

pub mod assertions;
pub mod fake_sqitch;
