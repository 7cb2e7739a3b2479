#![cfg_attr(not(feature = "std"), no_std)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    dead_code,
    clippy::cast_possible_truncation,
    clippy::use_self,
    clippy::doc_markdown,
    clippy::module_name_repetitions
)]

extern crate alloc;

pub mod bytes;
pub mod random;

pub mod access;
pub mod address;
pub mod crypto;
pub mod foundation;
pub mod mesh;
pub mod messages;
pub mod proxy;

#[cfg(feature = "full_stack")]
pub mod asyncs;
#[cfg(feature = "full_stack")]
pub mod stack;

#[cfg(test)]
mod samples;
