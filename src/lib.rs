pub mod aoi;
pub mod check;
pub mod error;
pub mod point;
pub mod polygon;
pub mod read_aoi;
pub mod reference;
