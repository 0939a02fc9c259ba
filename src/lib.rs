pub mod cli;
pub mod detector;
pub mod manifest;
pub mod report;
pub mod runner;
pub mod validator;
