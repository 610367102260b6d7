// ---------------------------------------------------------------------------
// Fixed reference data for French wine regions
// ---------------------------------------------------------------------------

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }
}

/// Initial centre of the maps.
pub const FRANCE_CENTER: Coordinate = Coordinate::new(46.603354, 1.888334);

/// One wine region: where to put its marker and which administrative
/// region (INSEE code) it belongs to on the boundary map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WineRegion {
    pub name: &'static str,
    pub coordinate: Coordinate,
    pub boundary_code: &'static str,
}

pub static WINE_REGIONS: [WineRegion; 9] = [
    WineRegion { name: "Bordeaux", coordinate: Coordinate::new(44.837789, -0.57918), boundary_code: "75" },
    WineRegion { name: "Champagne", coordinate: Coordinate::new(49.256, 4.031), boundary_code: "44" },
    WineRegion { name: "Bourgogne", coordinate: Coordinate::new(47.0524, 4.3837), boundary_code: "27" },
    WineRegion { name: "Alsace", coordinate: Coordinate::new(48.3182, 7.4416), boundary_code: "44" },
    WineRegion { name: "Loire", coordinate: Coordinate::new(47.7516, 0.334), boundary_code: "24" },
    WineRegion { name: "Provence", coordinate: Coordinate::new(43.9352, 6.0679), boundary_code: "93" },
    WineRegion { name: "Rhône", coordinate: Coordinate::new(44.9334, 4.8924), boundary_code: "84" },
    WineRegion { name: "Languedoc-Roussillon", coordinate: Coordinate::new(43.6119, 3.8777), boundary_code: "76" },
    WineRegion { name: "Corsica", coordinate: Coordinate::new(42.0396, 9.0129), boundary_code: "94" },
];

/// Exact, case-sensitive lookup.
pub fn lookup(name: &str) -> Option<&'static WineRegion> {
    WINE_REGIONS.iter().find(|r| r.name == name)
}

pub fn coordinate(name: &str) -> Option<Coordinate> {
    lookup(name).map(|r| r.coordinate)
}

pub fn boundary_code(name: &str) -> Option<&'static str> {
    lookup(name).map(|r| r.boundary_code)
}
