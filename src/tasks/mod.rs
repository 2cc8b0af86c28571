pub mod button;
pub mod sensor;
pub mod transport;
