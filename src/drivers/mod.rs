pub mod bus;
pub mod indicator;
pub mod mpu9250;
pub mod serial;
