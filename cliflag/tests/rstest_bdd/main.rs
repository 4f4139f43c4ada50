//! `rstest-bdd` behavioural suite for `cliflag`.
//!
//! Feature files live under `tests/features`; the modules here register the
//! fixtures and step implementations they bind to.

mod fixtures;
mod scenarios;
mod steps;
