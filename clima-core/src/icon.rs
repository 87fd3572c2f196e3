use std::fmt;

use serde::Serialize;

/// Icon shown next to the weather description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKey {
    Soleado,
    Nublado,
    Lluvioso,
    Tormenta,
    #[serde(rename = "default")]
    Generic,
}

impl IconKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::Soleado => "soleado",
            IconKey::Nublado => "nublado",
            IconKey::Lluvioso => "lluvioso",
            IconKey::Tormenta => "tormenta",
            IconKey::Generic => "default",
        }
    }

    /// Image bundled with the mobile screen for this key.
    pub fn asset(&self) -> &'static str {
        match self {
            IconKey::Soleado => "icons/sunny.jpg",
            IconKey::Nublado => "icons/cloudy.png",
            IconKey::Lluvioso => "icons/rainy.jpg",
            IconKey::Tormenta => "icons/storm.png",
            IconKey::Generic => "icons/default.png",
        }
    }

    /// Terminal rendition of the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconKey::Soleado => "☀",
            IconKey::Nublado => "☁",
            IconKey::Lluvioso => "☂",
            IconKey::Tormenta => "⚡",
            IconKey::Generic => "·",
        }
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a (lowercase) description to its icon. Anything unrecognised gets
/// [`IconKey::Generic`].
pub fn icon_for(description: &str) -> IconKey {
    match description {
        "soleado" => IconKey::Soleado,
        "nublado" => IconKey::Nublado,
        "lluvioso" => IconKey::Lluvioso,
        "tormenta" => IconKey::Tormenta,
        _ => IconKey::Generic,
    }
}
