/// Parameter bytes sent after the commands in [`crate::Cmd`].
///
/// All values are fixed for the 128x296 tri-color panel.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Panel Setting (0x00): 128x296, LUT from OTP, black/white/red mode,
    // scan up, shift right, booster on, no soft reset
    pub const PANEL_SETTING: [u8; 2] = [0x0F, 0x89];

    // Resolution Setting (0x61): HRES = 0x80 (128), VRES = 0x0128 (296)
    pub const RESOLUTION_SETTING: [u8; 3] = [0x80, 0x01, 0x28];

    // VCOM and Data Interval Setting (0x50): white border, default interval
    pub const VCOM_AND_DATA_INTERVAL: u8 = 0x77;

    // Deep Sleep (0x07) check code, anything else is ignored by the controller
    pub const DEEP_SLEEP_CHECK_CODE: u8 = 0xA5;

    // Byte value for eight white pixels in either plane
    pub const RAM_ALL_WHITE: u8 = 0xFF;
}
