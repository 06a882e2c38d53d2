//! Reverse geocoder facade: load a gazetteer, answer nearest-place and
//! name-lookup queries.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use geo_traits::CoordTrait;
use tracing::{debug, info};

use crate::error::Result;
use crate::geoname::GeoName;
use crate::kdtree::KdTree;

/// Maps coordinates to the nearest known named place.
///
/// The place set is fixed at load time and the backing k-d tree is immutable,
/// so a geocoder can be shared freely across threads.
///
/// ```no_run
/// use revgeo::ReverseGeocoder;
///
/// let geocoder = ReverseGeocoder::from_path("AU.txt", true)?;
/// let place = geocoder.nearest_place(-23.456, 123.456)?;
/// println!("nearest place is {place}");
/// # Ok::<(), revgeo::RevGeoError>(())
/// ```
#[derive(Debug)]
pub struct ReverseGeocoder {
    tree: KdTree<GeoName>,
}

impl ReverseGeocoder {
    /// Stream gazetteer rows from `rdr` and build the index.
    ///
    /// With `populated_only`, rows whose feature class is not `P` are
    /// skipped, which keeps the index to towns and cities. A malformed row
    /// aborts the load with [`RevGeoError::MalformedRecord`]; zero rows
    /// still produce a valid (empty) geocoder.
    ///
    /// [`RevGeoError::MalformedRecord`]: crate::RevGeoError::MalformedRecord
    pub fn from_reader(rdr: impl io::Read, populated_only: bool) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(rdr);

        let mut places = Vec::new();
        let mut rows: u64 = 0;
        let mut record = csv::StringRecord::new();
        while reader.read_record(&mut record)? {
            rows += 1;
            let line = record.position().map_or(rows, |pos| pos.line());
            let place = GeoName::from_record(&record, line)?;
            if !populated_only || place.populated_place {
                places.push(place);
            }
        }

        debug!(rows, kept = places.len(), "parsed gazetteer");
        let tree = KdTree::build(places);
        info!(places = tree.len(), "reverse geocoding index ready");

        Ok(Self { tree })
    }

    /// Load a gazetteer file, such as an extract of the GeoNames dump.
    pub fn from_path(path: impl AsRef<Path>, populated_only: bool) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading gazetteer");
        Self::from_reader(BufReader::new(File::open(path)?), populated_only)
    }

    /// The place nearest to the given coordinates, by great-circle distance.
    ///
    /// Fails with [`RevGeoError::EmptyIndex`] when no places were loaded.
    ///
    /// [`RevGeoError::EmptyIndex`]: crate::RevGeoError::EmptyIndex
    pub fn nearest_place(&self, latitude: f64, longitude: f64) -> Result<&GeoName> {
        self.tree.find_nearest(&GeoName::query(latitude, longitude))
    }

    /// The place nearest to a coordinate, with x as longitude and y as
    /// latitude.
    pub fn nearest_coord(&self, coord: &impl CoordTrait<T = f64>) -> Result<&GeoName> {
        self.nearest_place(coord.y(), coord.x())
    }

    /// Case-insensitive name lookup: exact match on the primary or ASCII
    /// name, substring match within the alternate names.
    ///
    /// Scans the whole place set, independent of the tree; when several rows
    /// match, the last one wins.
    pub fn find_by_name(&self, name: &str) -> Option<&GeoName> {
        let needle = name.to_lowercase();
        self.tree
            .points()
            .iter()
            .filter(|place| {
                place.name.to_lowercase() == needle
                    || place.ascii_name.to_lowercase() == needle
                    || place.alternate_names.to_lowercase().contains(&needle)
            })
            .last()
    }

    /// The indexed places.
    pub fn places(&self) -> &[GeoName] {
        self.tree.points()
    }

    /// The number of indexed places.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the geocoder holds no places.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
