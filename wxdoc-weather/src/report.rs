//! Provider payloads and the human-readable summary.

use serde::Deserialize;

use crate::config::Units;

/// Number of forecast entries shown under the current conditions.
pub const FORECAST_ENTRIES: usize = 5;

/// `/weather` response, only the fields the summary uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditions {
    /// City name as resolved by the provider.
    #[serde(default)]
    pub name: Option<String>,
    /// Conditions, most significant first.
    #[serde(default)]
    pub weather: Vec<Condition>,
    /// Temperature and humidity.
    #[serde(default)]
    pub main: Readings,
    /// Wind readings.
    #[serde(default)]
    pub wind: Wind,
}

/// `/forecast` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Forecast {
    /// Steps in chronological order.
    #[serde(default)]
    pub list: Vec<ForecastStep>,
}

/// One 3-hour forecast step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastStep {
    /// Temperature and humidity for this step.
    #[serde(default)]
    pub main: Readings,
    /// Conditions for this step.
    #[serde(default)]
    pub weather: Vec<Condition>,
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    /// Lowercase text such as "light rain".
    #[serde(default)]
    pub description: String,
}

/// The `main` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Readings {
    /// Temperature in the requested units.
    pub temp: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
}

/// The `wind` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    /// m/s for metric, mph for imperial.
    pub speed: Option<f64>,
}

fn first_description(conditions: &[Condition]) -> String {
    conditions.first().map(|c| title_case(&c.description)).unwrap_or_default()
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}

/// Upper-case the first letter of every word and lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Render the summary: one line of current conditions followed by up to
/// [`FORECAST_ENTRIES`] forecast lines.
///
/// `city` is shown when the provider did not return a place name.
pub fn render(current: &CurrentConditions, forecast: &Forecast, city: &str, units: Units) -> String {
    let name = current.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(city);
    let temp_unit = units.temperature_suffix();

    let mut lines = vec![format!(
        "**{name}**: {}, {}{temp_unit}, humidity {}%, wind {} {}.",
        first_description(&current.weather),
        number(current.main.temp),
        number(current.main.humidity),
        number(current.wind.speed),
        units.speed_unit(),
    )];

    lines.extend(forecast.list.iter().take(FORECAST_ENTRIES).map(|step| {
        format!("- {}, {}{temp_unit}", first_description(&step.weather), number(step.main.temp))
    }));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> CurrentConditions {
        serde_json::from_str(
            r#"{"name":"Pune","weather":[{"description":"scattered clouds"}],
                "main":{"temp":28.5,"humidity":65},"wind":{"speed":3.1}}"#,
        )
        .unwrap()
    }

    #[test]
    fn renders_current_line_metric() {
        let summary = render(&current(), &Forecast::default(), "pune", Units::Metric);
        assert_eq!(summary, "**Pune**: Scattered Clouds, 28.5°C, humidity 65%, wind 3.1 m/s.");
    }

    #[test]
    fn renders_at_most_five_forecast_lines() {
        let step = r#"{"main":{"temp":30},"weather":[{"description":"light rain"}]}"#;
        let body = format!(r#"{{"list":[{}]}}"#, vec![step; 8].join(","));
        let forecast: Forecast = serde_json::from_str(&body).unwrap();

        let summary = render(&current(), &forecast, "Pune", Units::Imperial);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "- Light Rain, 30°F");
        assert!(lines[0].ends_with("wind 3.1 mph."));
    }

    #[test]
    fn missing_fields_fall_back() {
        let summary = render(&CurrentConditions::default(), &Forecast::default(), "Nowhere", Units::Metric);
        assert_eq!(summary, "**Nowhere**: , n/a°C, humidity n/a%, wind n/a m/s.");
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("overcast CLOUDS"), "Overcast Clouds");
        assert_eq!(title_case("thunderstorm with light-rain"), "Thunderstorm With Light-Rain");
    }
}
