#![no_std]

pub mod console;
pub mod display;
pub mod error;
pub mod indicator;
pub mod kbd;
pub mod ui;
