//! Internal runtime plumbing for the render thread.
//!
//! The runtime is split so construction-time concerns stay separate from the
//! long-lived render loop:
//! - [`thread`] handles thread bootstrap and the device-open handshake.
//! - [`worker`] runs the pull/scale/write loop.

mod thread;
mod worker;
