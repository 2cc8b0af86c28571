// TiltMorse — Serial Sink
//
// Byte sink for the Morse link.  The UART implementation lives in
// `platform`; `Vec<u8>` collects output on the host.

use core::convert::Infallible;
use core::fmt::Debug;

pub trait SerialTx {
    type Error: Debug;

    /// Blocks until every byte is queued for transmission.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl SerialTx for Vec<u8> {
    type Error = Infallible;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<T: SerialTx + ?Sized> SerialTx for &mut T {
    type Error = T::Error;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_all(bytes)
    }
}
