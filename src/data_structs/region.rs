use std::fmt::{
    Display,
    Formatter,
};
use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{
    Deserialize,
    Serialize,
};

use super::typedef::PosType;
use crate::error::invalid_input;
use crate::{
    LayoutError,
    Result,
};

/// Share of the region length added on both sides before querying nearby
/// genes and signal.
pub const FETCH_PADDING_FRACTION: f64 = 0.25;
/// Share of the region length used as the backend signal bin width.
pub const BACKEND_BIN_FRACTION: f64 = 0.005;

/// Closed coordinate interval without a chromosome, e.g. the span of a focal
/// gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: PosType,
    pub end:   PosType,
}

impl Interval {
    pub fn new(
        start: PosType,
        end: PosType,
    ) -> Self {
        if start <= end {
            Self { start, end }
        }
        else {
            Self {
                start: end,
                end:   start,
            }
        }
    }

    /// Interval of a single position.
    pub fn point(position: PosType) -> Self {
        Self {
            start: position,
            end:   position,
        }
    }

    pub fn length(&self) -> PosType { self.end - self.start }

    pub fn contains(
        &self,
        position: PosType,
    ) -> bool {
        self.start <= position && position <= self.end
    }
}

/// Visible genomic window: a chromosome and a non-empty coordinate interval.
#[derive(Clone, Hash, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawRegion")]
pub struct Region {
    chromosome: String,
    start:      PosType,
    end:        PosType,
}

#[derive(Deserialize)]
struct RawRegion {
    chromosome: String,
    start:      PosType,
    end:        PosType,
}

impl TryFrom<RawRegion> for Region {
    type Error = LayoutError;

    fn try_from(value: RawRegion) -> Result<Self> {
        Region::new(value.chromosome, value.start, value.end)
    }
}

impl Region {
    /// Creates a new region. Fails for empty chromosome names, negative
    /// coordinates and zero-width or inverted intervals.
    pub fn new(
        chromosome: impl Into<String>,
        start: PosType,
        end: PosType,
    ) -> Result<Self> {
        let chromosome = chromosome.into();
        if chromosome.trim().is_empty() {
            return Err(invalid_input!("region chromosome must not be empty"));
        }
        if start < 0 {
            return Err(invalid_input!(
                "region start must not be negative, got {}",
                start
            ));
        }
        if start >= end {
            return Err(invalid_input!(
                "start position must be less than end position ({}:{}-{})",
                chromosome,
                start,
                end
            ));
        }
        Ok(Self {
            chromosome,
            start,
            end,
        })
    }

    pub fn chromosome(&self) -> &str { self.chromosome.as_str() }

    pub fn start(&self) -> PosType { self.start }

    pub fn end(&self) -> PosType { self.end }

    pub fn length(&self) -> PosType { self.end - self.start }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end:   self.end,
        }
    }

    pub fn contains(
        &self,
        position: PosType,
    ) -> bool {
        self.start <= position && position <= self.end
    }

    /// Expands both bounds of the region by `value`. The start is clamped at
    /// zero.
    pub fn expand(
        mut self,
        value: PosType,
    ) -> Self {
        self.start = (self.start - value).max(0);
        self.end += value;
        self
    }

    /// Window that is actually queried from the backend: the region widened
    /// by a quarter of its length on both sides.
    pub fn fetch_window(&self) -> Region {
        let padding =
            (self.length() as f64 * FETCH_PADDING_FRACTION).ceil() as PosType;
        let window = self.clone().expand(padding);
        debug!("Fetch window for {} is {}", self, window);
        window
    }

    /// Bin width the backend should aggregate signal into for this region.
    pub fn backend_bin_size(&self) -> PosType {
        ((self.length() as f64 * BACKEND_BIN_FRACTION).ceil() as PosType).max(1)
    }
}

impl Display for Region {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

const CHR_PREFIX: &str = "chr";

static REGION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)[:\s]+([\d,]+)[-\s]+([\d,]+)$").expect("region pattern is valid")
});

fn parse_coordinate(
    raw: &str,
    source: &str,
) -> Result<PosType> {
    raw.replace(',', "")
        .parse::<PosType>()
        .map_err(|_| LayoutError::RegionParse(source.to_string()))
}

/// Parses `chr1:1,000-2,000`, `1:1000-2000` and `chr1 1000 2000`. The whole
/// string must match. Names without the `chr` prefix get one, and a bare
/// `chr` is not a chromosome name.
impl FromStr for Region {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let captures = REGION_PATTERN
            .captures(trimmed)
            .ok_or_else(|| LayoutError::RegionParse(trimmed.to_string()))?;

        let name = &captures[1];
        let chromosome = match name.get(..CHR_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(CHR_PREFIX) => {
                if name.len() == CHR_PREFIX.len() {
                    return Err(LayoutError::RegionParse(trimmed.to_string()));
                }
                name.to_string()
            },
            _ => format!("{}{}", CHR_PREFIX, name),
        };
        let start = parse_coordinate(&captures[2], trimmed)?;
        let end = parse_coordinate(&captures[3], trimmed)?;
        Region::new(chromosome, start, end)
    }
}
