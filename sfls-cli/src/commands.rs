// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use std::io::Write;
use std::path::PathBuf;

use console::{style, Term};
use sfls_core::{
    color::{BSD_ENV_VAR, GNU_ENV_VAR},
    read_all, ColorMap, JsonSource, RenderOptions, Renderer, SflsResult, DEFAULT_TERMINAL_WIDTH,
};
use tracing::debug;

use crate::config::{ColorChoice, Config, DisplayConfig};

/// Flags of the `ls` subcommand
#[derive(Debug, Clone, Default)]
pub struct LsFlags {
    pub input: PathBuf,
    pub long: bool,
    pub one: bool,
    pub human: bool,
    pub dir: bool,
    pub dirs_first: bool,
    pub sort_time: bool,
    pub sort_size: bool,
    pub reverse: bool,
    pub all: bool,
    pub color: Option<ColorChoice>,
    pub width: Option<usize>,
}

/// Merge flags over the config file
fn resolve_options(flags: &LsFlags, display: &DisplayConfig, is_term: bool) -> RenderOptions {
    let color = flags.color.or(display.color).unwrap_or_default();
    RenderOptions {
        long: flags.long || display.long,
        one: flags.one || display.one,
        color: color.enabled(is_term),
        human: flags.human || display.human,
        dir: flags.dir || display.dir,
        dirs_first: flags.dirs_first || display.dirs_first,
        sort_time: flags.sort_time || display.sort_time,
        sort_size: flags.sort_size || display.sort_size,
        sort_reverse: flags.reverse || display.sort_reverse,
    }
}

fn resolve_width(flag: Option<usize>, config: Option<usize>, terminal: Option<usize>) -> usize {
    flag.or(config).or(terminal).unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// List directory contents
pub async fn ls(path: &str, flags: &LsFlags, config: &Config) -> SflsResult<()> {
    let source = JsonSource::new(&flags.input);
    debug!(path, input = %flags.input.display(), "Listing");

    let mut entries = read_all(&source, path).await?;
    if !(flags.all || config.display.all) {
        entries.retain(|e| !e.is_hidden());
    }

    let term = Term::stdout();
    let options = resolve_options(flags, &config.display, term.is_term());
    let colors = ColorMap::from_env();
    let terminal_width = term.size_checked().map(|(_, cols)| usize::from(cols));
    let width = resolve_width(flags.width, config.display.width, terminal_width);

    let renderer = Renderer::new(&options, &colors, width)?;
    let mut stdout = std::io::stdout().lock();
    renderer.render_to(&entries, &mut stdout)
}

/// Show the resolved color map
pub fn colors(color: Option<ColorChoice>, config: &Config) -> SflsResult<()> {
    let enabled = color
        .or(config.display.color)
        .unwrap_or_default()
        .enabled(Term::stdout().is_term());
    let map = ColorMap::from_env();

    let origin = if std::env::var(BSD_ENV_VAR).is_ok_and(|v| !v.is_empty()) {
        BSD_ENV_VAR
    } else if std::env::var(GNU_ENV_VAR).is_ok_and(|v| !v.is_empty()) {
        GNU_ENV_VAR
    } else {
        "built-in default"
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", style(format!("Colors from {origin}")).bold())?;
    for (key, sequence) in map.iter() {
        let label = if enabled {
            format!("{sequence}{key}{}", map.end())
        } else {
            key.to_string()
        };
        let padding = " ".repeat(8usize.saturating_sub(key.len()));
        writeln!(stdout, "  {label}{padding}{}", style(sequence.escape_debug()).dim())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let display = DisplayConfig {
            human: true,
            color: Some(ColorChoice::Always),
            ..Default::default()
        };
        let flags = LsFlags {
            long: true,
            color: Some(ColorChoice::Never),
            ..Default::default()
        };
        let options = resolve_options(&flags, &display, true);
        assert!(options.long);
        assert!(options.human);
        assert!(!options.color);
    }

    #[test]
    fn test_auto_color_follows_terminal() {
        let flags = LsFlags::default();
        let display = DisplayConfig::default();
        assert!(resolve_options(&flags, &display, true).color);
        assert!(!resolve_options(&flags, &display, false).color);
    }

    #[test]
    fn test_reverse_maps_to_sort_reverse() {
        let flags = LsFlags { reverse: true, sort_time: true, ..Default::default() };
        let options = resolve_options(&flags, &DisplayConfig::default(), false);
        assert!(options.sort_reverse);
        assert!(options.sort_time);
    }

    #[test]
    fn test_width_precedence() {
        assert_eq!(resolve_width(Some(40), Some(100), Some(120)), 40);
        assert_eq!(resolve_width(None, Some(100), Some(120)), 100);
        assert_eq!(resolve_width(None, None, Some(120)), 120);
        assert_eq!(resolve_width(None, None, None), DEFAULT_TERMINAL_WIDTH);
    }

    #[tokio::test]
    async fn test_ls_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("listing.json");
        std::fs::write(&input, r#"[{"name":"a","type":"file"},{"name":".hidden","type":"file"}]"#)
            .unwrap();

        let flags = LsFlags { input, one: true, width: Some(80), ..Default::default() };
        ls("/", &flags, &Config::default()).await.unwrap();
    }

    #[tokio::test]
    async fn test_ls_zero_width_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("listing.json");
        std::fs::write(&input, "[]").unwrap();

        let flags = LsFlags { input, width: Some(0), ..Default::default() };
        let err = ls("/", &flags, &Config::default()).await.unwrap_err();
        assert!(matches!(err, sfls_core::SflsError::InvalidWidth(0)));
    }
}
