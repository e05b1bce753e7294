mod car;
mod response;

pub use car::{Car, CarChanges, FieldValue, NewCar};
pub use response::ApiResponse;
