//! Route handlers. Each takes the raw query string or form body and returns
//! an HTML (or JSON) fragment for the page to swap in.

pub mod catalog;
pub mod check;
pub mod prefs;
pub mod util;
