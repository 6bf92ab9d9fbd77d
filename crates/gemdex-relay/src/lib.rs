//! gemdex-relay - Moves intercepted Gem records from the page to storage.
//!
//! Three hops, each with its own channel:
//!
//! - [`PagePublisher`] posts a [`WindowMessage`] on the page's [`Window`].
//! - [`IsolatedBridge`] listens on that window and forwards a
//!   [`RuntimeMessage`] through a [`RuntimeMessenger`].
//! - [`Background`] receives runtime messages and updates the
//!   [`RecordCache`](gemdex_store::RecordCache).

mod background;
mod bridge;
pub mod messages;
mod page;
mod runtime;
pub mod window;

pub use background::Background;
pub use bridge::IsolatedBridge;
pub use messages::{RuntimeMessage, WindowMessage};
pub use page::PagePublisher;
pub use runtime::{ChannelRuntime, RuntimeInbox, RuntimeMessenger, channel};
pub use window::{Window, WindowEvent, WindowEvents, WindowId};
