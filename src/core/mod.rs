//! Core conversion modules

pub mod beamer2rmd;
