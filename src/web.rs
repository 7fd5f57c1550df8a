//! Browser binding over the page's input and table elements.
//!
//! ```js
//! const m = PermissionMatrix.defaultPage();
//! m.addItem("hudson.model.Item.Read");
//! m.addUserRow();
//! ```

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, HtmlTableElement, HtmlTableRowElement, Window};

use crate::builder::RowBuilder;
use crate::config::MatrixConfig;
use crate::constants::ROW_TAG_ATTRIBUTE;
use crate::error::{MatrixError, Result};
use crate::registry::ItemRegistry;
use crate::table::{IdentifierSource, Notifier, RowSink, TableRow};

fn dom_err(e: JsValue) -> MatrixError {
    MatrixError::Dom(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| MatrixError::Dom("no window".into()))
}

fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| MatrixError::Dom("no document".into()))
}

fn element_by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T> {
    doc.get_element_by_id(id)
        .and_then(|e| e.dyn_into::<T>().ok())
        .ok_or_else(|| MatrixError::ElementNotFound(id.to_string()))
}

pub struct DomInput(HtmlInputElement);

impl IdentifierSource for DomInput {
    fn read_identifier(&self) -> String {
        self.0.value()
    }
}

pub struct DomTable {
    table: HtmlTableElement,
    document: Document,
}

impl DomTable {
    pub fn new(table: HtmlTableElement, document: Document) -> Self {
        Self { table, document }
    }
}

impl RowSink for DomTable {
    fn append_row(&mut self, row: &TableRow) -> Result<()> {
        let tr: HtmlTableRowElement = self
            .table
            .insert_row_with_index(-1)
            .map_err(dom_err)?
            .unchecked_into();
        tr.set_attribute(ROW_TAG_ATTRIBUTE, &row.tag()).map_err(dom_err)?;

        let id_cell = tr.insert_cell_with_index(-1).map_err(dom_err)?;
        id_cell.set_text_content(Some(row.id_cell()));

        for c in &row.checkboxes {
            let cell = tr.insert_cell_with_index(-1).map_err(dom_err)?;
            let input: HtmlInputElement = self
                .document
                .create_element("input")
                .map_err(dom_err)?
                .unchecked_into();
            input.set_class_name("");
            input.set_type("checkbox");
            input.set_name(&c.name);
            input.set_checked(c.checked);
            cell.append_child(&input).map_err(dom_err)?;
        }
        Ok(())
    }
}

pub struct AlertNotifier(Window);

impl Notifier for AlertNotifier {
    fn notify(&mut self, message: &str) {
        if let Err(e) = self.0.alert_with_message(message) {
            tracing::warn!(error = %dom_err(e), "alert failed");
        }
    }
}

#[wasm_bindgen]
pub struct PermissionMatrix {
    builder: RowBuilder<DomInput, DomTable, AlertNotifier>,
}

#[wasm_bindgen]
impl PermissionMatrix {
    /// Bind to the input and table with the given element ids
    #[wasm_bindgen(constructor)]
    pub fn new(input_id: &str, table_id: &str) -> std::result::Result<PermissionMatrix, JsError> {
        Ok(Self::bind(input_id, table_id)?)
    }

    /// Bind to `addUserGroupText` and `permissionTable`
    #[wasm_bindgen(js_name = defaultPage)]
    pub fn default_page() -> std::result::Result<PermissionMatrix, JsError> {
        let c = MatrixConfig::default();
        Self::new(&c.input_id, &c.table_id)
    }

    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&mut self, item: String) {
        self.builder.register(item);
    }

    #[wasm_bindgen(js_name = addGroupRow)]
    pub fn add_group_row(&mut self) {
        self.builder.add_group_row();
    }

    #[wasm_bindgen(js_name = addUserRow)]
    pub fn add_user_row(&mut self) {
        self.builder.add_user_row();
    }

    #[wasm_bindgen(getter, js_name = itemCount)]
    pub fn item_count(&self) -> usize {
        self.builder.registry().len()
    }
}

impl PermissionMatrix {
    fn bind(input_id: &str, table_id: &str) -> Result<Self> {
        let window = window()?;
        let document = document()?;
        let input = DomInput(element_by_id(&document, input_id)?);
        let table = DomTable::new(element_by_id(&document, table_id)?, document);
        Ok(Self {
            builder: RowBuilder::new(ItemRegistry::new(), input, table, AlertNotifier(window)),
        })
    }
}
