pub(crate) mod user_interface;

pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod coordinator;
pub(crate) mod errors;
pub(crate) mod git;
pub(crate) mod merge_request;
pub(crate) mod selection;
pub(crate) mod urls;

#[cfg(test)]
pub(crate) mod testutils;
