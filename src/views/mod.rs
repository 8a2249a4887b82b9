pub mod chat;
pub mod shared;

pub use chat::ChatView;
