//! Integration test entry point.

mod helpers;

mod authz_test;
mod vault_test;
