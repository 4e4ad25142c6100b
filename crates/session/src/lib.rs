pub mod store;

pub use store::{InputUpdate, SessionStore};

pub fn module_ready() -> bool {
    true
}
