use serde::Serialize;

pub const DEFAULT_ZOOM: i32 = 13;

/// A rectangular map extent in decimal degrees.
///
/// Containment is literal: a viewport that crosses the antimeridian
/// (`west > east`) contains nothing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Builds bounds only when all four edges are supplied.
    pub fn from_edges(
        north: Option<f64>,
        south: Option<f64>,
        east: Option<f64>,
        west: Option<f64>,
    ) -> Option<Bounds> {
        match (north, south, east, west) {
            (Some(north), Some(south), Some(east), Some(west)) => Some(Bounds {
                north,
                south,
                east,
                west,
            }),
            _ => None,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.south <= latitude
            && latitude <= self.north
            && self.west <= longitude
            && longitude <= self.east
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub bounds: Option<Bounds>,
    pub zoom: i32,
}

impl Viewport {
    pub fn new(bounds: Option<Bounds>, zoom: i32) -> Self {
        Viewport { bounds, zoom }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        match &self.bounds {
            Some(bounds) => bounds.contains(latitude, longitude),
            None => true,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            bounds: None,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Parses a zoom parameter the way the registry always has: the leading
/// number is read and truncated towards zero, trailing junk is ignored, and
/// text with no leading number reads as zoom 0. Only a missing or blank
/// parameter falls back to [`DEFAULT_ZOOM`].
pub fn parse_zoom(raw: Option<&str>) -> i32 {
    let Some(raw) = raw.map(str::trim_start).filter(|raw| !raw.is_empty()) else {
        return DEFAULT_ZOOM;
    };

    match leading_number(raw).parse::<f64>() {
        // `as` saturates, so huge values clamp to the i32 range
        Ok(zoom) if zoom.is_finite() => zoom.trunc() as i32,
        _ => 0,
    }
}

/// The longest prefix of `raw` shaped like a decimal number
/// (`-12`, `12.5`, `1e2`).
fn leading_number(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let integer_end = digits_from(end);
    let mut seen_digits = integer_end > end;
    end = integer_end;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        if fraction_end > end + 1 || seen_digits {
            seen_digits |= fraction_end > end + 1;
            end = fraction_end;
        }
    }

    if !seen_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_start = end + 1;
        if matches!(bytes.get(exponent_start), Some(b'+' | b'-')) {
            exponent_start += 1;
        }
        let exponent_end = digits_from(exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }

    &raw[..end]
}

/// Parses one bounds edge. Non-finite values count as absent.
pub fn parse_edge(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
