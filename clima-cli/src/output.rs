use std::fmt::Write as _;

use chrono::Local;
use clima_core::{IconKey, NormalizedWeather, Province};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    province: &'a str,
    code: &'a str,
    #[serde(flatten)]
    weather: &'a NormalizedWeather,
    icon: IconKey,
    icon_asset: &'a str,
}

pub fn render_json(province: Province, weather: &NormalizedWeather) -> anyhow::Result<String> {
    let icon = weather.icon();
    let out = ShowOutput {
        province: province.name(),
        code: province.code(),
        weather,
        icon,
        icon_asset: icon.asset(),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn render_weather(province: Province, weather: &NormalizedWeather) -> String {
    let icon = weather.icon();
    let mut out = String::new();

    let _ = writeln!(out, "Clima en {} ({})", province.name(), province.code());
    if let Some(title) = &weather.title {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(out, "{}ºC de máxima", weather.temp_max);
    let _ = writeln!(out, "{}ºC de mínima", weather.temp_min);
    let _ = writeln!(out, "{} {}", icon.glyph(), weather.description);
    if let Some(today) = &weather.today_precipitation {
        let _ = writeln!(out, "Hoy: {today}");
    }
    let _ = writeln!(out, "Consultado: {}", Local::now().format("%Y-%m-%d %H:%M"));

    out
}

pub fn render_provinces() -> String {
    let mut out = String::new();
    for p in Province::all() {
        let _ = writeln!(out, "{}  {}", p.code(), p.name());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> NormalizedWeather {
        NormalizedWeather {
            temp_max: 30.0,
            temp_min: 18.5,
            description: "soleado".into(),
            title: Some("El tiempo en Sevilla".into()),
            today_precipitation: Some("Sin lluvias.".into()),
        }
    }

    #[test]
    fn weather_text_lists_temperatures_and_icon() {
        let text = render_weather(Province::Sevilla, &weather());
        assert!(text.starts_with("Clima en Sevilla (41)\n"));
        assert!(text.contains("30ºC de máxima"));
        assert!(text.contains("18.5ºC de mínima"));
        assert!(text.contains("☀ soleado"));
        assert!(text.contains("Hoy: Sin lluvias."));
    }

    #[test]
    fn json_includes_icon_and_code() {
        let json: serde_json::Value =
            serde_json::from_str(&render_json(Province::Sevilla, &weather()).unwrap()).unwrap();
        assert_eq!(json["code"], "41");
        assert_eq!(json["temp_max"], 30.0);
        assert_eq!(json["icon"], "soleado");
        assert_eq!(json["icon_asset"], "icons/sunny.jpg");
    }

    #[test]
    fn province_list_has_all_eight() {
        let list = render_provinces();
        assert_eq!(list.lines().count(), 8);
        assert!(list.contains("04  Almería"));
        assert!(list.contains("41  Sevilla"));
    }
}
