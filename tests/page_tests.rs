use minesweeper_page::{
    CellState, Control, Grid, GridState, HtmlRenderer, ModValue, Node, Page, UiEvent, View, ViewRenderer,
};

fn page(width: usize, height: usize, mines: &[(usize, usize)]) -> Page {
    Page::new(Grid::with_mines(width, height, mines).expect("grid"), HtmlRenderer)
}

#[test]
fn clicks_reach_the_grid() {
    let mut p = page(3, 3, &[(2, 2)]);
    let response = p.handle(UiEvent::Click { x: 0, y: 0 });
    assert!(response.changed);
    assert!(!response.prevent_default);
    assert_eq!(p.grid().cell(0, 0).unwrap().state(), CellState::Open);

    let again = p.handle(UiEvent::Click { x: 0, y: 0 });
    assert!(!again.changed);
}

#[test]
fn context_menu_is_always_suppressed() {
    let mut p = page(3, 3, &[(2, 2)]);
    let flag = p.handle(UiEvent::ContextMenu { x: 2, y: 2 });
    assert!(flag.prevent_default && flag.changed);
    assert_eq!(p.grid().cell(2, 2).unwrap().state(), CellState::Maybe);

    p.handle(UiEvent::Click { x: 1, y: 1 });
    let on_open = p.handle(UiEvent::ContextMenu { x: 1, y: 1 });
    assert!(on_open.prevent_default);
    assert!(!on_open.changed);
}

#[test]
fn controls_travel_over_the_channel() {
    let mut p = page(2, 1, &[(0, 0)]);

    p.handle(UiEvent::Control(Control::Cheat));
    assert!(p.menu().is_cheating());
    assert!(p.grid().is_cheating());

    p.handle(UiEvent::ContextMenu { x: 0, y: 0 });
    let validate = p.handle(UiEvent::Control(Control::Validate));
    assert!(validate.changed);
    assert_eq!(p.grid().state(), GridState::Won);

    let reset = p.handle(UiEvent::Control(Control::Reset));
    assert!(reset.changed);
    assert_eq!(p.grid().state(), GridState::Gaming);
    assert!(p.grid().is_cheating());
    assert_eq!(p.dispatch(), 0);
}

#[test]
fn failed_validate_changes_nothing() {
    let mut p = page(3, 3, &[(0, 0)]);
    let response = p.handle(UiEvent::Control(Control::Validate));
    assert!(!response.changed);
    assert_eq!(p.grid().state(), GridState::Gaming);
}

#[test]
fn grid_view_has_a_line_per_row_and_a_cell_per_column() {
    let grid = Grid::with_mines(4, 2, &[(3, 1)]).expect("grid");
    let node = grid.view();
    assert_eq!(node.block, "grid");
    assert_eq!(node.mod_value("state"), Some(&ModValue::Value("gaming")));
    assert_eq!(node.mod_value("cheat"), Some(&ModValue::Flag(false)));
    assert_eq!(node.content.len(), 2);
    for line in &node.content {
        assert_eq!(line.entity(), "grid__line");
        assert_eq!(line.content.len(), 4);
        assert!(line.content.iter().all(|c| c.mod_value("state") == Some(&ModValue::Value("closed"))));
    }
    let mine: &Node = &node.content[1].content[3];
    assert_eq!(mine.mod_value("che"), Some(&ModValue::Flag(true)));
    assert_eq!(mine.js, Some(serde_json::json!({ "x": 3, "y": 1, "mine": true })));
}

#[test]
fn fresh_page_renders_every_cell_closed() {
    let p = Page::new(Grid::with_seed(5, 4, 3, 11).expect("grid"), HtmlRenderer);
    let html = p.render();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Minesweeper</title>"));
    assert_eq!(html.matches("cell_state_closed").count(), 20);
    assert_eq!(html.matches("cell_che").count(), 3);
    assert_eq!(html.matches("class=\"grid__line\"").count(), 4);
    assert!(html.contains("class=\"grid grid_state_gaming i-bem\""));
    assert!(html.contains(
        "data-bem=\"{&quot;grid&quot;:{&quot;height&quot;:4,&quot;totalMines&quot;:3,&quot;width&quot;:5}}\""
    ));
    assert!(html.contains("<a class=\"menu__reset\" href=\"#\">Reset</a>"));
}

#[test]
fn rendered_cells_carry_params_and_labels() {
    let mut p = page(3, 1, &[(0, 0)]);
    p.handle(UiEvent::Click { x: 1, y: 0 });
    let html = HtmlRenderer.render(&p.grid().view());
    assert!(html.contains(
        "<div class=\"cell cell_state_open i-bem\" data-bem=\"{&quot;cell&quot;:{&quot;mine&quot;:false,&quot;x&quot;:1,&quot;y&quot;:0}}\">1</div>"
    ));
    assert!(html.contains("class=\"cell cell_state_closed cell_che i-bem\""));
}

#[test]
fn game_over_and_cheat_show_in_markup() {
    let mut p = page(2, 2, &[(0, 0), (1, 1)]);
    p.handle(UiEvent::Control(Control::Cheat));
    let cheating = p.render();
    assert!(cheating.contains("grid_cheat"));
    assert!(cheating.contains("class=\"menu menu_cheat i-bem\""));

    p.handle(UiEvent::Click { x: 0, y: 0 });
    let html = p.render();
    assert!(html.contains("grid_state_gameover"));
    assert_eq!(html.matches("cell_state_mine").count(), 2);
}

#[test]
fn custom_title_is_escaped() {
    let p = page(1, 1, &[]).with_title("Mines & <more>");
    assert!(p.render().contains("<title>Mines &amp; &lt;more&gt;</title>"));
}
