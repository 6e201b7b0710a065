//! Session management: state model and the session store

pub mod state;
pub mod store;

pub use state::{Principal, Provider, SessionState, AUTH_STATE_KEY};
pub use store::{Credentials, Registration, SessionStore};
