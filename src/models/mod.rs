mod car;

pub use car::{Car, CarStatus, NewCar, UnknownStatus};
