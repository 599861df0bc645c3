//! Last-known pose for a tracked station

use std::fmt;

/// Position and orientation of one tracked station.
///
/// Created once per station and updated in place on every successfully
/// decoded record, so it always holds the last known good pose. Before the
/// first decode it holds the documented initial state: zero displacement
/// and the identity quaternion. That is a defined state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    /// Station label used in published output (not a protocol address)
    pub name: String,

    // Position in centimeters (the driver always selects metric units)
    pub px: f64,
    pub py: f64,
    pub pz: f64,

    // Orientation quaternion
    pub qx: f64,
    pub qy: f64,
    pub qz: f64,
    pub qw: f64,
}

impl Pose {
    /// Create a pose for `name` in the initial state
    pub fn new(name: impl Into<String>) -> Self {
        Pose {
            name: name.into(),
            px: 0.0,
            py: 0.0,
            pz: 0.0,
            qx: 0.0,
            qy: 0.0,
            qz: 0.0,
            qw: 1.0,
        }
    }

    /// Overwrite all seven components at once.
    ///
    /// Fields arrive in record order: px, py, pz, qx, qy, qz, qw. Partial
    /// updates never happen; the record codec rejects a record unless all
    /// seven fields parsed.
    pub fn update(&mut self, fields: [f64; 7]) {
        let [px, py, pz, qx, qy, qz, qw] = fields;
        self.px = px;
        self.py = py;
        self.pz = pz;
        self.qx = qx;
        self.qy = qy;
        self.qz = qz;
        self.qw = qw;
    }

    /// Machine-readable record: comma-separated, position at two and
    /// quaternion at four decimal places
    pub fn csv_record(&self) -> String {
        format!(
            "{},{:.2},{:.2},{:.2},{:.4},{:.4},{:.4},{:.4}",
            self.name, self.px, self.py, self.pz, self.qx, self.qy, self.qz, self.qw
        )
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ({:.2}, {:.2}, {:.2}) | ({:.2}, {:.2}, {:.2}, {:.2})",
            self.name, self.px, self.py, self.pz, self.qx, self.qy, self.qz, self.qw
        )
    }
}
