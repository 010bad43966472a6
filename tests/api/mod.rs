//! REST API endpoint tests

mod health_tests;
mod partnership_tests;
mod photo_tests;
