//! Market state store for the Chartdesk chart client
//!
//! Holds the selected market, the per-market chart cache and the
//! loading/upload flags, and sequences the backend calls that mutate them.

pub mod guard;
pub mod state;
pub mod store;

pub use state::MarketState;
pub use store::MarketStore;
