pub mod debounce;
pub mod format;
pub mod notifications;
pub mod panel;
pub mod realtime;
pub mod session;
pub mod window;
