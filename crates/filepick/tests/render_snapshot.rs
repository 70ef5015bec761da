use std::path::PathBuf;

use anyhow::Result;
use filepick::app::menu::MenuOptionSet;
use filepick::app::pages::{Entry, InputMode, PageContext, PageMenu};
use filepick::app::store::StoreState;
use filepick::domain::model::{Page, Policy};
use filepick::infra::config::Config;
use filepick::ui::render::render_menu;
use insta::assert_snapshot;

fn render(menu: &PageMenu) -> Result<String> {
    let mut out = Vec::new();
    render_menu(menu, &mut out)?;
    Ok(String::from_utf8(out)?.trim_start().to_owned())
}

fn build(state: &StoreState) -> Result<PageMenu> {
    PageContext::new(state.base_dir.clone(), Config::default()).build(state)
}

#[test]
fn main_menu_renders() -> Result<()> {
    let mut state = StoreState::new("/repo", Page::Main);
    state.selection.add("/repo/src/lib.rs");
    let rendered = render(&build(&state)?)?;
    assert_snapshot!("main_menu", rendered);
    Ok(())
}

#[test]
fn file_list_renders_markers_aligned() -> Result<()> {
    let entries = (1..=11).map(|n| {
        let name = format!("src/mod{n:02}.rs");
        let path = PathBuf::from("/repo").join(&name);
        (name.clone(), name, Entry::File(path), n == 2 || n == 11)
    });
    let menu = PageMenu {
        page: Page::Files,
        title: Page::Files.title().to_owned(),
        options: MenuOptionSet::from_entries(entries),
        policy: Policy::many(),
        input: InputMode::Query,
        note: None,
    };
    let rendered = render(&menu)?;
    assert_snapshot!("file_list", rendered);
    Ok(())
}

#[test]
fn glob_prompt_renders() -> Result<()> {
    let state = StoreState::new("/repo", Page::Glob);
    let rendered = render(&build(&state)?)?;
    assert_snapshot!("glob_prompt", rendered);
    Ok(())
}
