//! Session module - identity lifecycle, auth backend trait, session caches.

mod memory_auth;
mod session_cache;
mod session_model;
mod session_service;
mod session_traits;


pub use memory_auth::InMemoryAuthProvider;
pub use session_cache::{SessionCache, SessionScoped};
pub use session_model::{Identity, SignUpDetails, UserProfile};
pub use session_service::SessionService;
pub use session_traits::{AuthProvider, SessionServiceTrait};
