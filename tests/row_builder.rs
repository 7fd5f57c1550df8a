//! Row builder behaviour against the in-memory page handles

use permtable::*;

type Builder = RowBuilder<TextField, PermissionTable, Notifications>;

fn builder(items: &[&str], id: &str) -> Builder {
    RowBuilder::new(
        items.iter().copied().collect(),
        TextField::new(id),
        PermissionTable::new(),
        Notifications::new(),
    )
}

fn names(row: &TableRow) -> Vec<&str> {
    row.checkboxes.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn user_row_gets_one_checkbox_per_item() {
    let mut b = builder(&["read", "write"], "alice");
    b.add_user_row();

    let rows = b.table().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tag(), "USER:alice");
    assert_eq!(rows[0].id_cell(), "alice");
    assert_eq!(names(&rows[0]), vec!["[read]", "[write]"]);
    assert_eq!(rows[0].cell_count(), 3);
    assert!(b.notifier().is_empty());
}

#[test]
fn group_row_with_no_items_has_only_id_cell() {
    let mut b = builder(&[], "admins");
    b.add_group_row();

    let row = b.table().last().unwrap();
    assert_eq!(row.tag(), "GROUP:admins");
    assert_eq!(row.cell_count(), 1);
    assert!(row.checkboxes.is_empty());
}

#[test]
fn empty_id_notifies_once_and_adds_nothing() {
    let mut b = builder(&["read"], "");
    b.add_user_row();

    assert!(b.table().is_empty());
    assert_eq!(b.notifier().messages(), ["Please enter a username or a group name"]);
}

#[test]
fn whitespace_id_is_missing() {
    for id in [" ", "\t", "  \n "] {
        let mut b = builder(&["read"], id);
        b.add_group_row();
        assert!(b.table().is_empty(), "id {:?} should not add a row", id);
        assert_eq!(b.notifier().len(), 1);
    }
}

#[test]
fn build_row_reports_missing_identifier() {
    let b = builder(&["read"], "");
    assert_eq!(b.build_row(PrincipalType::User), Err(MatrixError::MissingIdentifier));
    assert_eq!(MatrixError::MissingIdentifier.to_string(), MISSING_IDENTIFIER_MESSAGE);
}

#[test]
fn id_is_kept_verbatim() {
    let mut b = builder(&["read"], " bob ");
    b.add_user_row();
    assert_eq!(b.table().rows()[0].tag(), "USER: bob ");
    assert_eq!(b.table().rows()[0].id_cell(), " bob ");
}

#[test]
fn same_id_twice_gives_two_rows() {
    let mut b = builder(&["read"], "alice");
    b.add_user_row();
    b.add_user_row();

    let rows = b.table().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], rows[1]);
    assert_eq!(b.table().find_by_tag("USER:alice").count(), 2);
}

#[test]
fn rows_append_in_call_order() {
    let mut b = builder(&["read"], "alice");
    b.add_user_row();
    b.input_mut().set("devs");
    b.add_group_row();
    b.input_mut().set("");
    b.add_user_row();
    b.input_mut().set("carol");
    b.add_principal_row(PrincipalType::User);

    let tags: Vec<String> = b.table().rows().iter().map(TableRow::tag).collect();
    assert_eq!(tags, vec!["USER:alice", "GROUP:devs", "USER:carol"]);
    assert_eq!(b.notifier().len(), 1);
}

#[test]
fn existing_rows_keep_their_checkbox_snapshot() {
    let mut b = builder(&["read"], "alice");
    b.add_user_row();
    b.register("write");
    b.add_user_row();

    let rows = b.table().rows();
    assert_eq!(names(&rows[0]), vec!["[read]"]);
    assert_eq!(names(&rows[1]), vec!["[read]", "[write]"]);
    assert_eq!(b.registry().items(), ["read", "write"]);
}

#[test]
fn duplicate_items_give_duplicate_columns() {
    let mut b = builder(&["read", "read", ""], "alice");
    b.add_user_row();
    assert_eq!(names(&b.table().rows()[0]), vec!["[read]", "[read]", "[]"]);
}

#[test]
fn borrowed_handles_work_too() {
    let input = TextField::new("ops");
    let mut table = PermissionTable::new();
    let mut alerts = Notifications::new();
    {
        let mut b = RowBuilder::new(ItemRegistry::new(), &input, &mut table, &mut alerts);
        b.register("admin");
        b.add_group_row();
    }
    assert_eq!(table.rows()[0].tag(), "GROUP:ops");
    assert!(alerts.is_empty());
}

struct FailingTable;

impl RowSink for FailingTable {
    fn append_row(&mut self, _row: &TableRow) -> Result<()> {
        Err(MatrixError::Dom("detached".into()))
    }
}

#[test]
fn sink_failure_is_not_a_notification() {
    let mut b = RowBuilder::new(
        ItemRegistry::new(),
        TextField::new("alice"),
        FailingTable,
        Notifications::new(),
    );
    b.add_user_row();
    assert!(b.notifier().is_empty());
}
