//! Экспорт видимых строк списка в CSV (открывается в Excel)

/// Типы, которые умеют выгружаться в CSV
pub trait CsvExportable {
    /// Заголовки колонок
    fn headers() -> Vec<&'static str>;

    /// Значения ячеек в порядке заголовков
    fn to_csv_row(&self) -> Vec<String>;
}

/// Собирает CSV: UTF-8 BOM, разделитель `;`, строки через `\n`
pub fn build_csv<T: CsvExportable>(rows: &[T]) -> Result<String, String> {
    if rows.is_empty() {
        return Err("Nothing to export".to_string());
    }

    let mut csv = String::new();
    // BOM, чтобы Excel правильно определил кодировку
    csv.push('\u{FEFF}');
    csv.push_str(&T::headers().join(";"));
    csv.push('\n');

    for row in rows {
        let cells: Vec<String> = row.to_csv_row().iter().map(|c| escape_csv_cell(c)).collect();
        csv.push_str(&cells.join(";"));
        csv.push('\n');
    }
    Ok(csv)
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains([';', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Скачать CSV через браузер
#[cfg(target_arch = "wasm32")]
pub fn download_csv<T: CsvExportable>(rows: &[T], filename: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let content = build_csv(rows)?;

    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(&content));
    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    Ok(())
}
