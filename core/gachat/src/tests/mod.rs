pub mod http_server;
mod mocks;

mod transform_tests;
