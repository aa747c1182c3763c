/// Command opcodes understood by the panel controller.
///
/// Sent with the data/command line low; any parameters follow as data bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cmd {
    // Init
    /// Panel setting (resolution select, scan direction, booster)
    PanelSetting = 0x00,
    /// Power on, issued as the software reset step of the init sequence
    PowerOn = 0x04,
    /// Resolution setting, 3 parameter bytes
    ResolutionSetting = 0x61,
    /// VCOM and data interval setting (border and data polarity)
    VcomAndDataIntervalSetting = 0x50,

    // Update
    /// Start transmission of the black plane
    DataStartTransmission1 = 0x10,
    /// Start transmission of the red/yellow plane
    DataStartTransmission2 = 0x13,
    /// Refresh the panel from its SRAM
    DisplayRefresh = 0x12,
    /// Get status, issued between busy polls
    GetStatus = 0x71,

    // Power
    /// Power off the charge pumps
    PowerOff = 0x02,
    /// Deep sleep, needs the check code parameter
    DeepSleep = 0x07,
}

impl Cmd {
    /// The raw opcode byte
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

impl From<Cmd> for u8 {
    fn from(cmd: Cmd) -> u8 {
        cmd.opcode()
    }
}
