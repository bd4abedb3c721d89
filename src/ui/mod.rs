pub(crate) mod app;
pub(crate) mod commands;
pub(crate) mod render;
pub(crate) mod screens;
pub(crate) mod theme;
pub(crate) mod toast;
pub(crate) mod util;


#[cfg(test)]
#[path = "toast_tests.rs"]
mod toast_tests;
