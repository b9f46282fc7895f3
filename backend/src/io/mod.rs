//! Interface layer exposing the domain to the presentation layer.

pub mod rest;
