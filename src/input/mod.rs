pub mod handler;

pub use handler::{CircleHandler, CircleHandlers, HandlerFactory};
