pub mod jwt;

pub use jwt::{decode_data, encode_data};
