//! Themed card rendering for search results.

use chrono::Local;
use crossterm::style::{Color, Stylize};
use insight_core::{SearchState, Tier, Weather};

/// Color set for one theme.
struct Palette {
    title: Color,
    muted: Color,
    rule: Color,
    error: Color,
}

impl Palette {
    fn light() -> Self {
        Self {
            title: Color::Rgb { r: 51, g: 65, b: 85 },
            muted: Color::Rgb { r: 100, g: 116, b: 139 },
            rule: Color::Rgb { r: 203, g: 213, b: 225 },
            error: Color::Rgb { r: 220, g: 38, b: 38 },
        }
    }

    fn dark() -> Self {
        Self {
            title: Color::Rgb { r: 226, g: 232, b: 240 },
            muted: Color::Rgb { r: 148, g: 163, b: 184 },
            rule: Color::Rgb { r: 51, g: 65, b: 85 },
            error: Color::Rgb { r: 248, g: 113, b: 113 },
        }
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Hot => Color::Rgb { r: 249, g: 115, b: 22 },
        Tier::Warm => Color::Rgb { r: 251, g: 191, b: 36 },
        Tier::Mild => Color::Rgb { r: 52, g: 211, b: 153 },
        Tier::Cool => Color::Rgb { r: 56, g: 189, b: 248 },
        Tier::Cold => Color::Rgb { r: 59, g: 130, b: 246 },
    }
}

fn tier_glyph(tier: Tier) -> char {
    match tier {
        Tier::Hot => '☀',
        Tier::Warm => '☼',
        Tier::Mild => '○',
        Tier::Cool => '✳',
        Tier::Cold => '❄',
    }
}

/// Print the current search state: a card on success, the error message
/// on failure, a hint when nothing has been searched yet.
pub fn render(state: &SearchState, dark: bool) {
    let palette = if dark { Palette::dark() } else { Palette::light() };

    if let Some(message) = &state.error {
        println!("{} {}", "✖".with(palette.error), message.as_str().with(palette.error));
        return;
    }

    match &state.data {
        Some(weather) => print_card(weather, &palette),
        None => println!(
            "{}",
            "Enter a city to get the latest weather.".with(palette.muted)
        ),
    }
}

fn print_card(weather: &Weather, palette: &Palette) {
    let tier = weather.tier();
    let badge = tier_color(tier);
    let updated = weather.fetched_at.with_timezone(&Local).format("%H:%M");
    let delta = (weather.feels_like_c - weather.temp_c).round() as i64;

    let rule = "─".repeat(44);

    println!();
    println!("  {}", rule.as_str().with(palette.rule));
    println!(
        "  {} {}  {} {}",
        weather.city.as_str().with(palette.title).bold(),
        weather.country.as_str().with(palette.muted),
        tier_glyph(tier).with(badge),
        tier.as_str().with(badge),
    );
    println!(
        "  {}  {} {}  {}",
        format!("{:.1}°C", weather.temp_c).with(palette.title).bold(),
        "feels like".with(palette.muted),
        format!("{:.1}°C", weather.feels_like_c).with(palette.title),
        format!("(delta {delta}°)").with(palette.muted),
    );
    println!("  {}", format!("updated {updated}").with(palette.muted));
    println!("  {}", rule.as_str().with(palette.rule));
    println!();
}
