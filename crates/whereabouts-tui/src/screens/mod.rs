//! Screen components.

pub mod locations;

pub use locations::LocationsScreen;
