//! REST API endpoint tests

mod health_tests;
mod invite_tests;
