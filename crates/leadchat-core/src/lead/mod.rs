//! Lead capture: detection policy, contact extraction, and the ports for
//! persisting and announcing captured leads.

pub mod capture;
pub mod notifier;
pub mod repository;
pub mod rules;
