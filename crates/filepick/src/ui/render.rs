//! Plain-text rendering of page menus.

use std::io::{self, Write};

use crate::app::pages::{InputMode, PageMenu};
use crate::domain::model::Page;

/// Write `menu` as a numbered list followed by a usage hint.
pub fn render_menu(menu: &PageMenu, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "*** {} ***", menu.title)?;

    let width = menu
        .options
        .iter()
        .map(|option| option.id.to_string().len())
        .max()
        .unwrap_or(1);
    for option in menu.options.iter() {
        let marker = match (menu.policy.accepts_many, option.is_selected) {
            (false, _) => "",
            (true, true) => "[x] ",
            (true, false) => "[ ] ",
        };
        writeln!(out, "  {:>width$}) {marker}{}", option.id, option.label)?;
    }

    if let Some(note) = &menu.note {
        writeln!(out, "{note}")?;
    }
    if let Some(hint) = hint(menu) {
        writeln!(out, "{hint}")?;
    }
    out.flush()
}

fn hint(menu: &PageMenu) -> Option<&'static str> {
    if menu.input == InputMode::Pattern {
        return None;
    }
    if menu.page == Page::Main {
        return Some("Pick one by number or name; blank to finish.");
    }
    if menu.options.is_empty() {
        return Some("Blank to go back.");
    }
    Some("Pick numbers, ranges (1-3), names or *; prefix - to unselect; blank to go back.")
}
