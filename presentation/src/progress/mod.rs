//! Live notifications during planning runs

pub mod notifier;
