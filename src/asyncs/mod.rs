//! Async primitive wrappers. Keeps the delivery machine off the timer
//! implementation directly so a different runtime only touches this module.
pub mod time;
