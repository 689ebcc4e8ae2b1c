use std::fmt;

use serde::{Serialize, Serializer};

/// An RGB color, displayed as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb::from_hex(0xFFFFFF);

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The 16 legacy Minecraft chat colors, in code order (`0`..=`f`).
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl ChatColor {
    /// Look up a color by its code character, case-insensitive.
    pub fn from_code(code: char) -> Option<Self> {
        code.to_digit(16)
            .and_then(|digit| u8::try_from(digit).ok())
            .and_then(Self::from_repr)
    }

    /// The lowercase code character for this color.
    pub fn code(self) -> char {
        char::from_digit(self as u32, 16).unwrap_or('f')
    }

    pub fn rgb(self) -> Rgb {
        let hex = match self {
            ChatColor::Black => 0x000000,
            ChatColor::DarkBlue => 0x0000AA,
            ChatColor::DarkGreen => 0x00AA00,
            ChatColor::DarkAqua => 0x00AAAA,
            ChatColor::DarkRed => 0xAA0000,
            ChatColor::DarkPurple => 0xAA00AA,
            ChatColor::Gold => 0xFFAA00,
            ChatColor::Gray => 0xAAAAAA,
            ChatColor::DarkGray => 0x555555,
            ChatColor::Blue => 0x5555FF,
            ChatColor::Green => 0x55FF55,
            ChatColor::Aqua => 0x55FFFF,
            ChatColor::Red => 0xFF5555,
            ChatColor::LightPurple => 0xFF55FF,
            ChatColor::Yellow => 0xFFFF55,
            ChatColor::White => 0xFFFFFF,
        };
        Rgb::from_hex(hex)
    }
}

/// A decoded player rank: the visible label and the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankInfo {
    pub label: String,
    pub color: Rgb,
}

impl RankInfo {
    /// Rank shown when neither the player record nor the rank service
    /// provides one.
    pub fn member() -> Self {
        Self {
            label: "Member".to_string(),
            color: ChatColor::Gray.rgb(),
        }
    }
}
