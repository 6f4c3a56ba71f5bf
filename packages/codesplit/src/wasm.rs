//! WASM bindings for codesplit.
//!
//! Exposes the session to a browser page. Feature-gated behind `wasm`.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { WasmSession } from 'codesplit';
//!
//! await init();
//! const session = new WasmSession();
//! session.setDelimiter('###');
//! session.setInput(await file.text());
//!
//! const files = session.process();   // [{ path, content }, ...]
//! const zip = session.createZip(false);   // Uint8Array (true = deflate)
//! const url = URL.createObjectURL(new Blob([zip], { type: 'application/zip' }));
//! ```

use wasm_bindgen::prelude::*;

use crate::archive::{Compression, PackOptions};
use crate::config::validate_input_size;
use crate::error::SplitterError;
use crate::session::Session;
use crate::splitter::split;

/// Helper to create consistent error JsValues
fn wasm_error(err: &SplitterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Split text into `[{ path, content }]` without keeping any state.
#[wasm_bindgen(js_name = splitText)]
pub fn split_text(text: &str, delimiter: &str) -> Result<JsValue, JsValue> {
    validate_input_size(text.len()).map_err(|e| wasm_error(&e))?;
    let files = split(text, delimiter).map_err(|e| wasm_error(&e))?;
    serde_wasm_bindgen::to_value(&files)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize files: {e}")))
}

/// Browser-side handle on a [`Session`].
///
/// Each method swaps in the next session value; on error the previous value
/// is kept so the page can show the message and let the user retry.
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session with the default delimiter.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Replace the input text (typed or read from an uploaded file).
    #[wasm_bindgen(js_name = setInput)]
    pub fn set_input(&mut self, text: &str) -> Result<(), JsValue> {
        validate_input_size(text.len()).map_err(|e| wasm_error(&e))?;
        self.session = self.session.with_input(text);
        Ok(())
    }

    /// Replace the delimiter.
    ///
    /// Returns the inline validation message, or `undefined` when valid.
    #[wasm_bindgen(js_name = setDelimiter)]
    pub fn set_delimiter(&mut self, delimiter: &str) -> Option<String> {
        self.session = self.session.with_delimiter(delimiter);
        self.session.delimiter_error().map(String::from)
    }

    /// Whether the process button should be enabled.
    #[wasm_bindgen(js_name = canProcess)]
    pub fn can_process(&self) -> bool {
        self.session.can_process()
    }

    /// Split the input and return the records.
    pub fn process(&mut self) -> Result<JsValue, JsValue> {
        self.split_input().map_err(|e| wasm_error(&e))?;
        self.files()
    }

    /// Records from the last successful split.
    pub fn files(&self) -> Result<JsValue, JsValue> {
        let files = self.session.files();
        serde_wasm_bindgen::to_value(&files)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize files: {e}")))
    }

    /// Package the records and return the zip bytes.
    #[wasm_bindgen(js_name = createZip)]
    pub fn create_zip(&mut self, deflate: bool) -> Result<Vec<u8>, JsValue> {
        self.build_zip(deflate).map_err(|e| wasm_error(&e))
    }

    /// Whether an archive is ready for download.
    #[wasm_bindgen(js_name = isZipReady)]
    pub fn is_zip_ready(&self) -> bool {
        self.session.archive().is_some()
    }

    /// Start over, keeping the delimiter.
    pub fn reset(&mut self) {
        self.session = self.session.reset();
    }

    /// Library version.
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

impl WasmSession {
    fn split_input(&mut self) -> crate::Result<()> {
        self.session = self.session.process()?;
        Ok(())
    }

    fn build_zip(&mut self, deflate: bool) -> crate::Result<Vec<u8>> {
        let compression = if deflate {
            Compression::Deflated
        } else {
            Compression::Stored
        };
        let options = PackOptions::default().with_compression(compression);
        self.session = self.session.package(&options)?;
        Ok(self.session.archive().map(<[u8]>::to_vec).unwrap_or_default())
    }
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}
