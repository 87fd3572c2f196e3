use std::fmt;

use thiserror::Error;

/// The eight Andalusian provinces known to the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Province {
    Almeria,
    Cadiz,
    Cordoba,
    Granada,
    Huelva,
    Jaen,
    Malaga,
    Sevilla,
}

impl Province {
    /// Two-digit code the upstream provider assigns to the province.
    pub fn code(&self) -> &'static str {
        match self {
            Province::Almeria => "04",
            Province::Cadiz => "11",
            Province::Cordoba => "14",
            Province::Granada => "18",
            Province::Huelva => "21",
            Province::Jaen => "23",
            Province::Malaga => "29",
            Province::Sevilla => "41",
        }
    }

    /// Display name, exactly as the user has to type it.
    pub fn name(&self) -> &'static str {
        match self {
            Province::Almeria => "Almería",
            Province::Cadiz => "Cádiz",
            Province::Cordoba => "Córdoba",
            Province::Granada => "Granada",
            Province::Huelva => "Huelva",
            Province::Jaen => "Jaén",
            Province::Malaga => "Málaga",
            Province::Sevilla => "Sevilla",
        }
    }

    pub const fn all() -> &'static [Province] {
        &[
            Province::Almeria,
            Province::Cadiz,
            Province::Cordoba,
            Province::Granada,
            Province::Huelva,
            Province::Jaen,
            Province::Malaga,
            Province::Sevilla,
        ]
    }

    pub fn from_code(code: &str) -> Option<Province> {
        Province::all().iter().copied().find(|p| p.code() == code)
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when the text does not name one of the known provinces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Unknown province '{input}'. Known provinces: Almería, Cádiz, Córdoba, Granada, Huelva, Jaén, Málaga, Sevilla."
)]
pub struct UnknownProvince {
    pub input: String,
}

impl UnknownProvince {
    pub fn user_message(&self) -> &'static str {
        "Por favor, ingresa una provincia andaluza válida"
    }
}

impl TryFrom<&str> for Province {
    type Error = UnknownProvince;

    /// Only surrounding whitespace is ignored; case and accents must match.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();

        Province::all()
            .iter()
            .copied()
            .find(|p| p.name() == trimmed)
            .ok_or_else(|| UnknownProvince { input: trimmed.to_string() })
    }
}

/// Resolve free text typed by the user into a province.
pub fn resolve_province(raw: &str) -> Result<Province, UnknownProvince> {
    Province::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves_to_its_code() {
        let expected = [
            ("Almería", "04"),
            ("Cádiz", "11"),
            ("Córdoba", "14"),
            ("Granada", "18"),
            ("Huelva", "21"),
            ("Jaén", "23"),
            ("Málaga", "29"),
            ("Sevilla", "41"),
        ];

        for (name, code) in expected {
            let padded = format!("  {name}\t\n");
            let province = resolve_province(&padded).expect("known province must resolve");
            assert_eq!(province.code(), code);
            assert_eq!(province.name(), name);
        }
    }

    #[test]
    fn surrounding_spaces_are_trimmed() {
        assert_eq!(resolve_province(" Sevilla ").unwrap().code(), "41");
    }

    #[test]
    fn unknown_text_is_not_found() {
        for input in ["", "   ", "Madrid", "sevilla", "SEVILLA", "Malaga", "Cadiz", "Se villa"] {
            let err = resolve_province(input).unwrap_err();
            assert_eq!(err.input, input.trim());
        }
    }

    #[test]
    fn resolution_is_repeatable() {
        assert_eq!(resolve_province("Jaén"), resolve_province("Jaén"));
        assert_eq!(resolve_province("Jaen"), resolve_province("Jaen"));
    }

    #[test]
    fn code_roundtrip() {
        for p in Province::all() {
            assert_eq!(Province::from_code(p.code()), Some(*p));
        }
        assert_eq!(Province::from_code("28"), None);
    }

    #[test]
    fn error_mentions_input() {
        let err = resolve_province("Toledo").unwrap_err();
        assert!(err.to_string().contains("Unknown province 'Toledo'"));
        assert_eq!(err.user_message(), "Por favor, ingresa una provincia andaluza válida");
    }
}
