pub mod classify;
pub mod concordance;
pub mod config;
pub mod join;
pub mod paths;
pub mod validator;
