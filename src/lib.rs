#![doc = include_str!("../README.md")]

mod error;
mod geocoder;
pub mod geoname;
pub mod kdtree;
mod r#type;

pub use error::{Result, RevGeoError};
pub use geocoder::ReverseGeocoder;
pub use geoname::GeoName;
pub use r#type::DistanceNum;

#[cfg(test)]
pub(crate) mod test;
