//! Browser bindings used by the renderer.

use wasm_bindgen::prelude::*;

use crate::diagram::DiagramAggregator;
use crate::handler::TransferObjectHandler;

/// Decode one document and hand it back as JSON tagged with `kind`.
#[wasm_bindgen]
pub fn decode_document(json: &str) -> Result<String, JsError> {
    let decoded = TransferObjectHandler::new().parse(json)?;
    Ok(serde_json::to_string(&decoded)?)
}

#[wasm_bindgen]
pub struct DiagramSession {
    handler: TransferObjectHandler,
    aggregator: DiagramAggregator,
}

#[wasm_bindgen]
impl DiagramSession {
    #[wasm_bindgen(constructor)]
    pub fn new(title: &str) -> DiagramSession {
        DiagramSession {
            handler: TransferObjectHandler::new(),
            aggregator: DiagramAggregator::new(title),
        }
    }

    /// A document that fails to decode leaves the session untouched.
    pub fn add_document(&mut self, json: &str) -> Result<bool, JsError> {
        let decoded = self.handler.parse(json)?;
        Ok(self.aggregator.add_data(decoded))
    }

    pub fn can_be_displayed(&self) -> bool {
        self.aggregator.can_be_displayed()
    }

    pub fn set_number_of_classes(&mut self, n: i32) {
        self.aggregator.set_number_of_classes(n);
    }

    pub fn dec_number_of_classes(&mut self) {
        self.aggregator.dec_number_of_classes();
    }

    pub fn inc_number_of_properties(&mut self, inc: i32) {
        self.aggregator.inc_number_of_properties(inc);
    }

    pub fn to_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.aggregator)?)
    }
}

impl DiagramSession {
    pub fn aggregator(&self) -> &DiagramAggregator {
        &self.aggregator
    }
}
