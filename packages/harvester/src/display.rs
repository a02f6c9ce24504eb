//! Plain-text rendering of a catalogue.
//!
//! Output is a column of centred blocks: a boxed profession banner, a boxed
//! banner per trade level, then one line per exchange (two in full mode).

use std::fs;
use std::path::Path;

use villager_trades_catalogue::{Catalogue, Exchange, ProfessionRecord, TradeLevel};

use crate::config::DISPLAY_WIDTH;
use crate::error::Result;
use crate::settings::{DisplayMode, Settings};

/// Inner width of the profession banner.
const PROFESSION_BANNER_WIDTH: usize = 38;

/// Inner width of the level banner.
const LEVEL_BANNER_WIDTH: usize = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub mode: DisplayMode,
    pub show_job_site: bool,
    pub width: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            show_job_site: false,
            width: DISPLAY_WIDTH,
        }
    }
}

impl DisplayOptions {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: settings.display_mode,
            show_job_site: settings.display_job_site,
            width: DISPLAY_WIDTH,
        }
    }
}

/// Render the whole catalogue; every line ends with `'\n'`.
#[must_use]
pub fn render(catalogue: &Catalogue, options: &DisplayOptions) -> String {
    let mut lines = Vec::new();
    for profession in catalogue {
        render_profession(&mut lines, profession, options);
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Render and write the catalogue to `path`.
pub fn write_output(path: &Path, catalogue: &Catalogue, options: &DisplayOptions) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render(catalogue, options))?;
    tracing::info!(path = %path.display(), "Wrote trade listing");
    Ok(())
}

fn render_profession(
    lines: &mut Vec<String>,
    profession: &ProfessionRecord,
    options: &DisplayOptions,
) {
    let centred = |text: &str| centred_line(text, options.width);
    let border = format!("+{}+", "-".repeat(PROFESSION_BANNER_WIDTH));

    lines.push(centred(&border));
    lines.push(centred(&format!(
        "|{}|",
        center(&title_case(&profession.profession), PROFESSION_BANNER_WIDTH)
    )));
    if options.show_job_site {
        let site = format!("Job Site: {}", title_case(&profession.job_site_block));
        lines.push(centred(&format!("|{}|", center(&site, PROFESSION_BANNER_WIDTH))));
    }
    lines.push(centred(&border));

    for level in &profession.trades {
        render_level(lines, level, options);
    }

    lines.push("=".repeat(options.width));
}

fn render_level(lines: &mut Vec<String>, level: &TradeLevel, options: &DisplayOptions) {
    let border = format!("+{}+", "-".repeat(LEVEL_BANNER_WIDTH));

    lines.push(centred_line(&border, options.width));
    lines.push(centred_line(
        &format!("|{}|", center(&title_case(&level.level_name), LEVEL_BANNER_WIDTH)),
        options.width,
    ));
    lines.push(centred_line(&border, options.width));

    for exchange in &level.exchanges {
        for line in exchange_lines(exchange, options.mode) {
            lines.push(centred_line(&line, options.width));
        }
    }
}

/// Lines describing one exchange in the given mode.
///
/// # Examples
/// ```
/// use villager_trades_catalogue::{Exchange, GivenSide, ItemRef, WantedSide};
/// use villager_trades_harvester::display::exchange_lines;
/// use villager_trades_harvester::settings::DisplayMode;
///
/// let exchange = Exchange {
///     wanted: WantedSide {
///         items: vec![ItemRef::new("wheat")],
///         default_quantities: vec!["20".to_string()],
///         price_multiplier: "0.05".to_string(),
///     },
///     given: GivenSide { item: ItemRef::new("emerald"), quantity: "1".to_string() },
///     trades_until_disabled: "16".to_string(),
///     xp_to_villager: "2".to_string(),
/// };
///
/// assert_eq!(exchange_lines(&exchange, DisplayMode::Simple), vec!["wheat -> emerald"]);
/// assert_eq!(
///     exchange_lines(&exchange, DisplayMode::Complex),
///     vec!["20 wheat -<0.05>-> 1 emerald"]
/// );
/// ```
#[must_use]
pub fn exchange_lines(exchange: &Exchange, mode: DisplayMode) -> Vec<String> {
    let wanted = &exchange.wanted;
    let given = &exchange.given;

    if mode == DisplayMode::Simple {
        let items: Vec<&str> = wanted.items.iter().map(|i| i.name()).collect();
        return vec![format!("{} -> {}", items.join(", "), given.item)];
    }

    let parts: Vec<String> = wanted
        .pairs()
        .map(|(item, quantity)| format!("{quantity} {item}"))
        .collect();
    let mut lines = vec![format!(
        "{} -<{}>-> {} {}",
        parts.join(", "),
        wanted.price_multiplier,
        given.quantity,
        given.item
    )];

    if mode == DisplayMode::Full {
        lines.push(format!(
            "{} XP to villager, {} until disabled",
            exchange.xp_to_villager, exchange.trades_until_disabled
        ));
        lines.push(String::new());
    }
    lines
}

/// Centre `text` in `width` columns; text at least `width` wide is kept as is.
///
/// An odd margin puts the extra column on the right, except when `width` is
/// odd as well.
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(margin - left))
}

/// [`center`] without the trailing padding.
fn centred_line(text: &str, width: usize) -> String {
    let mut line = center(text, width);
    line.truncate(line.trim_end().len());
    line
}

/// Upper-case the first letter of every word.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
