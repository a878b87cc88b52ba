/*!
 * Scoped client session.
 *
 * A run talks to the host only between `start_client` and `stop_client`.
 * The guard stops the client when dropped, so early returns and errors
 * release the session too.
 */

use std::ops::{Deref, DerefMut};

use log::debug;

use super::Host;
use crate::errors::HostError;

/// Open client session on a host
pub struct ClientSession<'a, H: Host + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: Host + ?Sized> ClientSession<'a, H> {
    /// Start the client and return the guard
    pub fn begin(host: &'a mut H) -> Result<Self, HostError> {
        host.start_client()?;
        debug!("Client session started");
        Ok(Self { host })
    }
}

impl<H: Host + ?Sized> Deref for ClientSession<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Host + ?Sized> DerefMut for ClientSession<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Host + ?Sized> Drop for ClientSession<'_, H> {
    fn drop(&mut self) {
        self.host.stop_client();
        debug!("Client session stopped");
    }
}
