// Global theme colours and layout constants
// All colours are u32 in packed ARGB format: 0xAARRGGBB

/// (background, accent) pairs for sticky notes
pub const NOTE_SCHEMES: [(u32, u32); 7] = [
    (0xFF_FF_FD_E7, 0xFF_FB_C0_2D), // yellow
    (0xFF_E8_F5_E9, 0xFF_66_BB_6A), // green
    (0xFF_FC_E4_EC, 0xFF_EC_40_7A), // pink
    (0xFF_E3_F2_FD, 0xFF_42_A5_F5), // blue
    (0xFF_FF_F3_E0, 0xFF_FF_A7_26), // orange
    (0xFF_EE_EE_EE, 0xFF_75_75_75), // grey
    (0xFF_F3_E5_F5, 0xFF_AB_47_BC), // purple
];

/// Todo lists use a softer blue accent
pub const TODO_SCHEMES: [(u32, u32); 7] = [
    (0xFF_FF_FD_E7, 0xFF_FB_C0_2D),
    (0xFF_E8_F5_E9, 0xFF_66_BB_6A),
    (0xFF_FC_E4_EC, 0xFF_EC_40_7A),
    (0xFF_E3_F2_FD, 0xFF_64_B5_F6),
    (0xFF_FF_F3_E0, 0xFF_FF_A7_26),
    (0xFF_EE_EE_EE, 0xFF_75_75_75),
    (0xFF_F3_E5_F5, 0xFF_AB_47_BC),
];

// Hover/pressed factors applied per RGB channel
pub const HOVER_FACTOR: f32 = 1.2;
pub const NORMAL_FACTOR: f32 = 0.9;

// Launcher capsule
pub const LAUNCHER_WIDTH: u32 = 160;
pub const LAUNCHER_HEIGHT: u32 = 60;
pub const CAPSULE_RADIUS: f32 = 30.;
pub const CAPSULE_BASE: u32 = 0xFF_F5_F5_F5;
pub const CAPSULE_LABEL: u32 = 0xFF_33_33_33;
pub const LAUNCHER_LEFT_LABEL: &str = "Note";
pub const LAUNCHER_RIGHT_LABEL: &str = "Todo";
pub const LAUNCHER_FONT_SIZE: f32 = 16.;

// Panels
pub const PANEL_RADIUS: f32 = 16.;
pub const NOTE_WIDTH: u32 = 300;
pub const NOTE_HEIGHT: u32 = 200;
pub const TODO_WIDTH: u32 = 300;
pub const TODO_HEIGHT: u32 = 400;

// Title bar: title field on the left, minimize + close on the right
pub const TITLE_BAR_HEIGHT: i32 = 30;
pub const TITLE_MARGIN_LEFT: i32 = 8;
pub const TITLE_MARGIN_RIGHT: i32 = 8;
pub const TITLE_MARGIN_TOP: i32 = 4;
pub const TITLE_FIELD_WIDTH: i32 = 120;
pub const TITLE_FIELD_PADDING: i32 = 6;
pub const TITLE_BUTTON_SIZE: i32 = 24;
pub const TITLE_BUTTON_SPACING: i32 = 6;
pub const TITLE_FONT_SIZE: f32 = 14.;
pub const GLYPH_COLOUR: u32 = 0xFF_FF_FF_FF;

// Note body
pub const CONTENT_PADDING: i32 = 6;
pub const CONTENT_FONT_SIZE: f32 = 14.;

// Text
pub const TEXT_COLOUR: u32 = 0xFF_21_21_21;
pub const PLACEHOLDER_COLOUR: u32 = 0xFF_9E_9E_9E;
pub const SELECTION_ALPHA: u8 = 0x60;
pub const BLINKEY_WIDTH: i32 = 1;
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
pub const FONT_WEIGHT_REGULAR: u16 = 400;
pub const FONT_WEIGHT_BOLD: u16 = 700;

// Todo rows
pub const TODO_MARGIN_LEFT: i32 = 12;
pub const TODO_MARGIN_TOP: i32 = 8;
pub const TODO_MARGIN_RIGHT: i32 = 12;
pub const TODO_MARGIN_BOTTOM: i32 = 8;
pub const TODO_ROW_SPACING: i32 = 12;
pub const TODO_ROW_PADDING: i32 = 4;
pub const TODO_LINE_HEIGHT: i32 = 22;
pub const TODO_SEPARATOR_GAP: i32 = 4;
pub const TODO_FONT_SIZE: f32 = 13.;
pub const CHECKBOX_SIZE: i32 = 16;
pub const CHECKBOX_SPACING: i32 = 8;
pub const CHECKBOX_BORDER: u32 = 0xFF_75_75_75;
pub const CHECKBOX_FILL: u32 = 0xFF_FF_FF_FF;
pub const SEPARATOR_COLOUR: u32 = 0xFF_AA_AA_AA;
pub const SEPARATOR_DASH: i32 = 4;
pub const SEPARATOR_GAP: i32 = 3;
pub const TODO_TITLE: &str = "Todo List";

// Scrollbar (drawn only when content overflows)
pub const SCROLLBAR_WIDTH: i32 = 6;
pub const SCROLLBAR_MARGIN_TOP: i32 = 4;
pub const SCROLLBAR_MARGIN_RIGHT: i32 = 2;
pub const SCROLLBAR_MARGIN_BOTTOM: i32 = 4;
pub const SCROLLBAR_MIN_HANDLE: i32 = 24;
pub const SCROLLBAR_RADIUS: f32 = 3.;
pub const SCROLL_LINE_PIXELS: f32 = 20.;
