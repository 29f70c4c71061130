//! Degrees-minutes-seconds input handling
//!
//! Geographic coordinates may be entered as a DMS triple plus a compass
//! direction. Conversion to signed decimal degrees happens here; everything
//! downstream works in decimal degrees only.

/// Compass direction attached to a DMS angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// South and West map onto the negative half of the axis
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    /// Parses a single compass letter, case-insensitive
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }
}

impl Default for Hemisphere {
    fn default() -> Self {
        Hemisphere::North
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hemisphere::North => write!(f, "N"),
            Hemisphere::South => write!(f, "S"),
            Hemisphere::East => write!(f, "E"),
            Hemisphere::West => write!(f, "W"),
        }
    }
}

/// An angle in degrees-minutes-seconds notation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsAngle {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl DmsAngle {
    pub fn new(degrees: f64, minutes: f64, seconds: f64, hemisphere: Hemisphere) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        }
    }

    /// Converts to signed decimal degrees.
    ///
    /// The magnitude is `|deg| + |min|/60 + |sec|/3600`; the result is
    /// negative when the hemisphere is South/West or the degree value itself
    /// was entered negative. A NaN degree value yields NaN.
    pub fn to_decimal_degrees(&self) -> f64 {
        if self.degrees.is_nan() {
            return f64::NAN;
        }
        let magnitude =
            self.degrees.abs() + self.minutes.abs() / 60.0 + self.seconds.abs() / 3600.0;
        if self.hemisphere.is_negative() || self.degrees < 0.0 {
            -magnitude
        } else {
            magnitude
        }
    }
}
