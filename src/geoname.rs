//! Place records parsed from the GeoNames gazetteer dump.
//!
//! Each dump row is one tab-separated record of 19 fields; only the fields
//! this crate consumes are kept. Latitude and longitude are projected onto
//! the unit sphere at parse time, so squared chordal distance between two
//! places is a true Euclidean metric: monotone in great-circle distance and
//! continuous across the antimeridian and at the poles. That projection is
//! what makes the k-d tree's three-axis rotation and per-axis pruning exact.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use csv::StringRecord;

use crate::error::{Result, RevGeoError};
use crate::kdtree::KdPoint;

// Column indices in the GeoNames dump layout.
const GEONAME_ID: usize = 0;
const NAME: usize = 1;
const ASCII_NAME: usize = 2;
const ALTERNATE_NAMES: usize = 3;
const LATITUDE: usize = 4;
const LONGITUDE: usize = 5;
const FEATURE_CLASS: usize = 6;
const COUNTRY_CODE: usize = 8;
const POPULATION: usize = 14;

/// Rows shorter than this cannot carry all consumed fields.
const MIN_FIELDS: usize = POPULATION + 1;

/// One named place from the gazetteer.
#[derive(Debug, Clone)]
pub struct GeoName {
    /// Stable GeoNames identifier.
    pub geoname_id: u64,
    /// Primary (UTF-8) name.
    pub name: String,
    /// Plain-ASCII rendering of the name.
    pub ascii_name: String,
    /// Comma-separated alternate names, as shipped in the dump.
    pub alternate_names: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// ISO-3166 two-letter country code.
    pub country_code: String,
    /// Population, zero where the dump carries no figure.
    pub population: u64,
    /// Whether the row's feature class marks a populated place (`P`).
    pub populated_place: bool,
    /// Unit-sphere Cartesian coordinates derived from latitude/longitude.
    point: [f64; 3],
}

impl GeoName {
    /// Parse one gazetteer row. `line` is carried into the error on failure.
    pub(crate) fn from_record(record: &StringRecord, line: u64) -> Result<Self> {
        if record.len() < MIN_FIELDS {
            return Err(RevGeoError::MalformedRecord {
                line,
                reason: format!(
                    "expected at least {MIN_FIELDS} fields, got {}",
                    record.len()
                ),
            });
        }

        let geoname_id = parse_field(&record[GEONAME_ID], "geoname id", line)?;
        let latitude: f64 = parse_field(&record[LATITUDE], "latitude", line)?;
        let longitude: f64 = parse_field(&record[LONGITUDE], "longitude", line)?;
        let population = match &record[POPULATION] {
            "" => 0,
            raw => parse_field(raw, "population", line)?,
        };

        Ok(Self {
            geoname_id,
            name: record[NAME].to_string(),
            ascii_name: record[ASCII_NAME].to_string(),
            alternate_names: record[ALTERNATE_NAMES].to_string(),
            latitude,
            longitude,
            country_code: record[COUNTRY_CODE].to_string(),
            population,
            populated_place: &record[FEATURE_CLASS] == "P",
            point: project(latitude, longitude),
        })
    }

    /// A bare query point at the given coordinates; every other field is
    /// empty. Only useful as the argument to a nearest-place search.
    pub fn query(latitude: f64, longitude: f64) -> Self {
        Self {
            geoname_id: 0,
            name: String::new(),
            ascii_name: String::new(),
            alternate_names: String::new(),
            latitude,
            longitude,
            country_code: String::new(),
            population: 0,
            populated_place: false,
            point: project(latitude, longitude),
        }
    }

    /// The place's unit-sphere Cartesian coordinates.
    pub fn cartesian(&self) -> [f64; 3] {
        self.point
    }
}

impl fmt::Display for GeoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl KdPoint for GeoName {
    type Dist = f64;
    const DIM: usize = 3;

    fn axis_cmp(&self, other: &Self, axis: usize) -> Ordering {
        self.point[axis].total_cmp(&other.point[axis])
    }

    fn sq_dist(&self, other: &Self) -> f64 {
        self.point
            .iter()
            .zip(other.point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    fn axis_sq_dist(&self, other: &Self, axis: usize) -> f64 {
        let d = self.point[axis] - other.point[axis];
        d * d
    }
}

fn project(latitude: f64, longitude: f64) -> [f64; 3] {
    let (lat, lon) = (latitude.to_radians(), longitude.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn parse_field<T: FromStr>(raw: &str, what: &str, line: u64) -> Result<T> {
    raw.parse().map_err(|_| RevGeoError::MalformedRecord {
        line,
        reason: format!("invalid {what}: {raw:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london_row() -> StringRecord {
        StringRecord::from(vec![
            "2643743",
            "London",
            "London",
            "Londres,Londra,Londen",
            "51.50853",
            "-0.12574",
            "P",
            "PPLC",
            "GB",
            "",
            "ENG",
            "GLA",
            "",
            "",
            "7556900",
            "",
            "25",
            "Europe/London",
            "2011-03-03",
        ])
    }

    #[test]
    fn parses_dump_row() {
        let place = GeoName::from_record(&london_row(), 1).unwrap();

        assert_eq!(place.geoname_id, 2643743);
        assert_eq!(place.name, "London");
        assert_eq!(place.ascii_name, "London");
        assert_eq!(place.alternate_names, "Londres,Londra,Londen");
        assert_eq!(place.latitude, 51.50853);
        assert_eq!(place.longitude, -0.12574);
        assert_eq!(place.country_code, "GB");
        assert_eq!(place.population, 7556900);
        assert!(place.populated_place);
    }

    #[test]
    fn non_populated_feature_class() {
        let mut fields: Vec<String> = london_row().iter().map(str::to_owned).collect();
        fields[6] = "T".to_string();
        let place = GeoName::from_record(&StringRecord::from(fields), 1).unwrap();
        assert!(!place.populated_place);
    }

    #[test]
    fn short_row_is_malformed() {
        let record = StringRecord::from(vec!["2643743", "London"]);
        let err = GeoName::from_record(&record, 7).unwrap_err();
        assert!(matches!(err, RevGeoError::MalformedRecord { line: 7, .. }));
    }

    #[test]
    fn bad_coordinate_is_malformed() {
        let mut fields: Vec<String> = london_row().iter().map(str::to_owned).collect();
        fields[4] = "fifty-one".to_string();
        let record = StringRecord::from(fields);
        let err = GeoName::from_record(&record, 3).unwrap_err();
        assert!(matches!(err, RevGeoError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn empty_population_defaults_to_zero() {
        let mut fields: Vec<String> = london_row().iter().map(str::to_owned).collect();
        fields[14] = String::new();
        let place = GeoName::from_record(&StringRecord::from(fields), 1).unwrap();
        assert_eq!(place.population, 0);
    }

    #[test]
    fn unit_sphere_projection() {
        let origin = GeoName::query(0.0, 0.0);
        let [x, y, z] = origin.cartesian();
        assert!((x - 1.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!(z.abs() < 1e-12);

        let pole = GeoName::query(90.0, 0.0);
        assert!((pole.cartesian()[2] - 1.0).abs() < 1e-12);

        // Two sides of the antimeridian are neighbors on the sphere.
        let east = GeoName::query(0.0, 179.9);
        let west = GeoName::query(0.0, -179.9);
        let greenwich = GeoName::query(0.0, 0.0);
        assert!(east.sq_dist(&west) < east.sq_dist(&greenwich));
    }
}
