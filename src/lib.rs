//! Command line front end for boorumux.
pub mod cli;
