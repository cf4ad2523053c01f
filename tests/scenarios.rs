//! End-to-end scenarios over the public API.

use rusty_csv::{
    build, detect, escape_field, page_list, parse, total_pages, ColumnType, Delimiter, Explorer,
    PageItem, SortDirection, SortOrder, ViewAction, ViewState,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn parse_simple_comma_text() {
    let parsed = parse("a,b,c\n1,2,3");
    assert_eq!(parsed.delimiter, Delimiter::Comma);
    assert_eq!(parsed.rows, vec![strings(&["a", "b", "c"]), strings(&["1", "2", "3"])]);
}

#[test]
fn thousands_separators_detect_as_number() {
    let rows = vec![strings(&["1,000"]), strings(&["2,500"]), strings(&["10,000"])];
    let types = detect(&strings(&["n"]), &rows);
    assert_eq!(types.get(0), ColumnType::Number);
}

#[test]
fn escape_field_doubles_quotes() {
    assert_eq!(escape_field("he said \"hi\""), "\"he said \"\"hi\"\"\"");
}

#[test]
fn page_list_with_ellipses() {
    use PageItem::{Ellipsis, Page};
    assert_eq!(
        page_list(10, 20),
        vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
    );
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(51, 25), 3);
}

#[test]
fn quoted_fields_survive_build() {
    let table = build(parse("id;note\r\n1;\"semi;colon\"\r\n2;\"multi\nline \"\"quoted\"\"\"\r\n").rows);
    assert_eq!(table.headers, strings(&["id", "note"]));
    assert_eq!(table.get(0, 1), "semi;colon");
    assert_eq!(table.get(1, 1), "multi\nline \"quoted\"");
}

#[test]
fn explore_and_export_semicolon_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("sales.csv");
    std::fs::write(
        &source,
        "region;amount;date\n\
         North;1,200;2023-03-01\n\
         South;950;2023-01-15\n\
         north east;15,000;2023-02-10\n\
         West;;2023-04-20\n",
    )
    .unwrap();

    let explorer = Explorer::open(&source).unwrap();
    assert_eq!(explorer.delimiter(), Delimiter::Semicolon);
    assert_eq!(explorer.types().get(1), ColumnType::Number);
    assert_eq!(explorer.types().get(2), ColumnType::Date);

    let state = ViewState::default()
        .apply(ViewAction::Search("north".into()))
        .apply(ViewAction::SetSort(SortOrder::new(1, SortDirection::Desc)));
    let view = explorer.view(&state);
    let regions: Vec<&str> = view.page_rows().iter().map(|row| row[0].as_str()).collect();
    assert_eq!(regions, vec!["north east", "North"]);

    let target = dir.path().join("north.csv");
    view.export_to(&target).unwrap();
    let exported = std::fs::read_to_string(&target).unwrap();
    assert_eq!(
        exported,
        "\u{FEFF}region,amount,date\r\nnorth east,\"15,000\",2023-02-10\r\nNorth,\"1,200\",2023-03-01"
    );

    let reloaded = Explorer::open(&target).unwrap();
    assert_eq!(reloaded.delimiter(), Delimiter::Comma);
    assert_eq!(reloaded.table().row_count(), 2);
    assert_eq!(reloaded.table().get(0, 1), "15,000");
}

#[test]
fn empty_cells_sort_first_ascending() {
    let explorer = Explorer::from_text("n,v\na,3\nb,\nc,1\n").unwrap();
    let view = explorer.view(&ViewState::default().apply(ViewAction::ToggleSort(1)));
    let names: Vec<&str> = view.rows().iter().map(|row| row[0].as_str()).collect();
    assert_eq!(names, vec!["b", "c", "a"]);
}

#[test]
fn toggle_sort_cycles_back_to_input_order() {
    let explorer = Explorer::from_text("name\nfile10\nfile2\nFile1\n").unwrap();
    let names = |state: &ViewState| -> Vec<String> {
        explorer.view(state).rows().iter().map(|row| row[0].clone()).collect()
    };

    let ascending = ViewState::default().apply(ViewAction::ToggleSort(0));
    assert_eq!(names(&ascending), vec!["File1", "file2", "file10"]);
    let descending = ascending.apply(ViewAction::ToggleSort(0));
    assert_eq!(names(&descending), vec!["file10", "file2", "File1"]);
    let unsorted = descending.apply(ViewAction::ToggleSort(0));
    assert_eq!(unsorted.sort.active_column(), None);
    assert_eq!(names(&unsorted), vec!["file10", "file2", "File1"]);
}

#[test]
fn saved_view_state_restores_the_same_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.json");
    let explorer = Explorer::from_text("a,b\n1,x\n2,y\n3,x\n").unwrap();
    let state = ViewState::default()
        .apply(ViewAction::FilterColumn { column: 1, value: "X".into() })
        .apply(ViewAction::SetPageSize(1))
        .apply(ViewAction::GoToPage(2));
    state.save(&path).unwrap();

    let restored = ViewState::load(&path).unwrap();
    assert_eq!(restored, state);
    let view = explorer.view(&restored);
    assert_eq!(view.page(), 2);
    assert_eq!(view.page_rows()[0][0], "3");
}

#[test]
fn empty_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "\u{FEFF}\r\n").unwrap();
    let error = Explorer::open(&path).unwrap_err();
    assert!(error.to_string().contains("File is empty or unreadable"));
}
