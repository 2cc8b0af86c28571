// TiltMorse — Symbol Encoder
//
// Wire framing for the serial link:
//   symbol event   "<token>\r\n"                 token ∈ {'.', '-', ' '}
//   text message   "<pattern>\r\n" per character, "\r\n" for anything that
//                  has no pattern (word gaps), then "\r\n\r\n"
//   telemetry      "ax: <f>, ay: <f>, az: <f>, gx: <f>, gy: <f>, gz: <f>\n"

use core::fmt;

use crate::drivers::serial::SerialTx;
use crate::events::{ProgramState, SensorSample};
use crate::morse;

pub const LINE_TERMINATOR: &str = "\r\n";

#[derive(Debug)]
pub enum TransportError<E> {
    Write(E),
    /// `emit` got a state that has nothing to send on its own.
    NothingToEmit(ProgramState),
}

impl<E: fmt::Debug> fmt::Display for TransportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(e) => write!(f, "serial write failed: {:?}", e),
            Self::NothingToEmit(state) => write!(f, "nothing to emit for {:?}", state),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for TransportError<E> {}

pub struct SymbolEncoder<W> {
    tx: W,
}

impl<W: SerialTx> SymbolEncoder<W> {
    pub fn new(tx: W) -> Self {
        Self { tx }
    }

    /// Write the framing for a single-symbol state.  `Sos` and `DataReady`
    /// need extra input and go through `encode_text` / `emit_telemetry`.
    pub fn emit(&mut self, state: ProgramState) -> Result<(), TransportError<W::Error>> {
        match state.symbol() {
            Some(token) => self.emit_symbol(token),
            None => Err(TransportError::NothingToEmit(state)),
        }
    }

    pub fn emit_symbol(&mut self, token: char) -> Result<(), TransportError<W::Error>> {
        let mut buf = [0u8; 4];
        let token = token.encode_utf8(&mut buf);
        self.write_line(token)
    }

    pub fn encode_text(&mut self, text: &str) -> Result<(), TransportError<W::Error>> {
        for c in text.chars() {
            match morse::encode_char(c) {
                Some(pattern) => self.write_line(pattern)?,
                None => self.write_line("")?,
            }
        }
        self.write_line("")?;
        self.write_line("")
    }

    pub fn emit_telemetry(&mut self, s: &SensorSample) -> Result<(), TransportError<W::Error>> {
        let line = format!(
            "ax: {:.6}, ay: {:.6}, az: {:.6}, gx: {:.6}, gy: {:.6}, gz: {:.6}\n",
            s.ax, s.ay, s.az, s.gx, s.gy, s.gz
        );
        self.write(line.as_bytes())
    }

    pub fn into_inner(self) -> W {
        self.tx
    }

    fn write_line(&mut self, body: &str) -> Result<(), TransportError<W::Error>> {
        self.write(body.as_bytes())?;
        self.write(LINE_TERMINATOR.as_bytes())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError<W::Error>> {
        self.tx.write_all(bytes).map_err(TransportError::Write)
    }
}
