//! Isotrak ASCII command set
//!
//! Every device command is a single wire byte: a printable ASCII letter or
//! a control character. Composite configuration commands concatenate a
//! mode code, a units code, and the output-list code with comma-separated
//! field selectors, terminated by CR LF. This layer performs no validation
//! of arbitrary combinations; the device documentation governs which
//! sequences are meaningful.

pub mod record;

/// Command terminator (carriage return, line feed)
pub const CRLF: &[u8] = b"\r\n";

/// Isotrak device commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Get/set the alignment reference frame
    AlignRefFrame = b'A',
    /// Reset the alignment reference frame
    ResetAlignRefFrame = b'R',
    /// Boresight a station
    Boresight = b'B',
    /// Unboresight a station
    Unboresight = b'b',
    /// Enable continuous record output
    ContinuousPrintEnable = b'C',
    /// Disable continuous record output
    ContinuousPrintDisable = b'c',
    /// Enable digitizer mode
    DigitizerMode = b'Y',
    /// Enable run digitizer mode
    DigitizerRunMode = b'e',
    /// Enable point digitizer mode
    DigitizerPointMode = b'E',
    /// Set track digitizer mode
    DigitizerTrackMode = b'i',
    /// End track digitizer mode (Ctrl-E)
    DigitizerTrackModeEnd = 0x05,
    /// ASCII record output format
    AsciiFormat = b'F',
    /// Binary record output format
    BinaryFormat = b'f',
    /// Get/set the hemisphere of operation
    Hemisphere = b'H',
    /// Get/set the output increment
    DefineIncrement = b'I',
    /// Enable quiet mode
    QuietModeEnable = b'K',
    /// Disable quiet mode
    QuietModeDisable = b'm',
    /// Get/set the active station state
    ActiveStationState = b'l',
    /// Get/set stylus tip offsets
    DefineTipOffsets = b'N',
    /// Select the output data list
    OutputDataList = b'O',
    /// Request a single data record
    OutputSingleRecord = b'P',
    /// Get/set the transmitter mounting frame
    TransmitterMountingFrame = b'r',
    /// Request the system status record
    SystemStatus = b'S',
    /// Request the extended configuration
    ExtendedConfig = b't',
    /// Tracker commands
    TrackerCommands = b'T',
    /// English (inches) conversion units
    UnitsEnglish = b'U',
    /// Metric (centimeters) conversion units
    UnitsMetric = b'u',
    /// Get/set the position operational envelope
    PositionEnvelope = b'V',
    /// Get/set attitude filter parameters
    AttitudeFilter = b'v',
    /// Get/set position filter parameters
    PositionFilter = b'x',
    /// Reinitialize the system (Ctrl-Y)
    Reinitialize = 0x19,
    /// Compatibility mode (Ctrl-D)
    CompatibilityMode = 0x04,
    /// Suspend data transmission (Ctrl-S)
    SuspendTransmission = 0x13,
    /// Resume data transmission (Ctrl-Q)
    ResumeTransmission = 0x11,
}

impl Command {
    /// Wire byte for this command
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Output-field selector codes for the output data list (`O`) command.
///
/// Each selector names one quantity a data record contains and maps to the
/// ASCII digits used in the command body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCode {
    /// ASCII space character
    Space,
    /// ASCII carriage return, line feed pair
    Crlf,
    /// x,y,z Cartesian position, 3(Sxxx.xx)
    Position,
    /// Relative x,y,z movement since the last output, 3(Sxxx.xx)
    PositionRelative,
    /// Azimuth, elevation, roll Euler angles, 3(Sxxx.xx)
    EulerAngles,
    /// X-axis direction cosines, 3(Sx.xxxx)
    DirectionCosinesX,
    /// Y-axis direction cosines, 3(Sx.xxxx)
    DirectionCosinesY,
    /// Z-axis direction cosines, 3(Sx.xxxx)
    DirectionCosinesZ,
    /// X-axis receiver data (factory use only)
    RawX,
    /// Y-axis receiver data (factory use only)
    RawY,
    /// Z-axis receiver data (factory use only)
    RawZ,
    /// Orientation quaternion, 4(Sx.xxxx)
    Quaternion,
}

impl OutputCode {
    /// Selector digits as they appear in the command body
    pub fn code(self) -> &'static str {
        match self {
            OutputCode::Space => "0",
            OutputCode::Crlf => "1",
            OutputCode::Position => "2",
            OutputCode::PositionRelative => "3",
            OutputCode::EulerAngles => "4",
            OutputCode::DirectionCosinesX => "5",
            OutputCode::DirectionCosinesY => "6",
            OutputCode::DirectionCosinesZ => "7",
            OutputCode::RawX => "8",
            OutputCode::RawY => "9",
            OutputCode::RawZ => "10",
            OutputCode::Quaternion => "11",
        }
    }
}

/// Build the output data list command selecting `codes` as the record
/// contents, without a terminator
pub fn output_list_command(codes: &[OutputCode]) -> Vec<u8> {
    let mut cmd = vec![Command::OutputDataList.code()];
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            cmd.push(b',');
        }
        cmd.extend_from_slice(code.code().as_bytes());
    }
    cmd
}

/// Build the initialization command sent after every (re)connect:
/// continuous print, metric units, output list = position + quaternion +
/// CRLF field, CR LF terminated. Byte-exact: `CuO2,11,1\r\n`.
pub fn initialize_command() -> Vec<u8> {
    let mut cmd = vec![
        Command::ContinuousPrintEnable.code(),
        Command::UnitsMetric.code(),
    ];
    cmd.extend_from_slice(&output_list_command(&[
        OutputCode::Position,
        OutputCode::Quaternion,
        OutputCode::Crlf,
    ]));
    cmd.extend_from_slice(CRLF);
    cmd
}

/// The single data record query: one byte, sent standalone with no
/// terminator
pub fn single_record_query() -> [u8; 1] {
    [Command::OutputSingleRecord.code()]
}
